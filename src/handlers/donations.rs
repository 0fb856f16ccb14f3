use axum::{Json, extract::State};

use crate::db::queries;
use crate::error::HopeError;
use crate::middleware::JsonBody;
use crate::router::HopeState;
use crate::types::{DonationReceipt, DonationRequest};

/// POST /api/process_donation
pub async fn process_donation(
    State(state): State<HopeState>,
    JsonBody(req): JsonBody<DonationRequest>,
) -> Result<Json<DonationReceipt>, HopeError> {
    let donation = req.validate()?;

    let mut conn = state.db.acquire().await?;
    let result = queries::record_donation(&mut conn, &donation).await;
    conn.release().await;

    let invoice_id = result.map_err(|e| e.during("processing donation"))?;
    Ok(Json(DonationReceipt {
        message: "Donation processed successfully!".to_string(),
        invoice_id,
    }))
}

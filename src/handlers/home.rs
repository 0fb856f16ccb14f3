use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../../assets/index.html");

/// GET /
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

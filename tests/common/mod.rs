#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use hopesprouts::db::ConnectionProvider;
use hopesprouts::{HopeState, hope_router};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Router over a throwaway SQLite file, removed on drop.
pub struct TestApp {
    pub router: Router,
    pub db: ConnectionProvider,
    path: PathBuf,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "hopesprouts-test-{}-{}-{}.sqlite",
            std::process::id(),
            nanos,
            NEXT_DB.fetch_add(1, Ordering::SeqCst)
        ));

        let database_url = format!("sqlite:{}", path.display());
        let db = ConnectionProvider::new(&database_url).expect("invalid database url");
        db.init_schema().await.expect("failed to initialize schema");

        let router = hope_router(HopeState::new(db.clone()));
        Self { router, db, path }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let resp = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    /// Enroll a student through the API and return its id.
    pub async fn enroll(&self, name: &str, email: &str) -> i64 {
        let resp = self
            .post_json(
                "/api/enroll_student",
                serde_json::json!({"name": name, "email": email, "track": "coding"}),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.body);
        resp.body["student_id"]
            .as_i64()
            .expect("enrollment response carries student_id")
    }

    pub async fn count(&self, table: &str) -> i64 {
        let mut conn = self.db.acquire().await.expect("connection");
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let n: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&mut *conn)
            .await
            .expect("count query");
        conn.release().await;
        n
    }

    pub async fn execute(&self, sql: &str) {
        let mut conn = self.db.acquire().await.expect("connection");
        sqlx::query(sql)
            .execute(&mut *conn)
            .await
            .expect("statement failed");
        conn.release().await;
    }

    pub async fn donations_received(&self, student_id: i64) -> f64 {
        let mut conn = self.db.acquire().await.expect("connection");
        let v: f64 =
            sqlx::query_scalar("SELECT donations_received FROM students WHERE student_id = ?")
                .bind(student_id)
                .fetch_one(&mut *conn)
                .await
                .expect("student row");
        conn.release().await;
        v
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(PathBuf::from(side));
        }
    }
}

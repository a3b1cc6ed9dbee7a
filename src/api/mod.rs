//! HTTP adapter
//!
//! Exposes the expense service under `/expense` with JSON envelope responses.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;

use std::sync::Arc;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::storage::ExpenseStore;

use handlers::{create_expense, delete_expense, get_expense, list_expenses, update_expense};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ExpenseStore>,
}

impl AppState {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Bind `addr` and serve the expense routes until the process exits
pub async fn serve(store: ExpenseStore, addr: &str) -> anyhow::Result<()> {
    let document = store.path().display().to_string();
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://{} (document: {})", addr, document);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/expense", get(list_expenses).post(create_expense))
        .route(
            "/expense/:id",
            get(get_expense).patch(update_expense).delete(delete_expense),
        )
        .layer(from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseId};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(expenses: Vec<Expense>) -> (TempDir, Router) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expense.json"));
        store.save(expenses).unwrap();
        (temp_dir, router(AppState::new(store)))
    }

    fn coffee() -> Expense {
        Expense::with_date(
            ExpenseId::new(1),
            "coffee",
            5.0,
            "food",
            Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
        )
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_all() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(app, "GET", "/expense", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "Success");
        assert_eq!(body["data"][0]["name"], "coffee");
        assert_eq!(body["data"][0]["date"], "2025-01-10T08:00:00Z");
    }

    #[tokio::test]
    async fn test_create_then_category_total() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/expense",
            Some(r#"{"name":"tea","nominal":3,"category":"food"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["code"], 201);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"][1]["id"], 2);

        let (status, body) = send(app, "GET", "/expense?category=Food", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Get Total Expense By Category Success");
        assert_eq!(
            body["data"],
            json!([{"category": "Food", "totalExpenses": 8.0}])
        );
    }

    #[tokio::test]
    async fn test_date_range_total() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(
            app,
            "GET",
            "/expense?startdate=2025-01-01&enddate=2025-01-31",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Get Total Expense By Date Success");
        assert_eq!(
            body["data"],
            json!([{"startDate": "2025-01-01", "endDate": "2025-01-31", "totalExpenses": 5.0}])
        );
    }

    #[tokio::test]
    async fn test_inverted_range_is_bad_request() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(
            app,
            "GET",
            "/expense?startdate=2025-02-01&enddate=2025-01-01",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "code": 400,
                "message": "startdate is newer than enddate (2025-02-01 > 2025-01-01)"
            })
        );
    }

    #[tokio::test]
    async fn test_detail() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(app.clone(), "GET", "/expense/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Expense detail");
        assert_eq!(body["data"]["nominal"], 5.0);

        let (status, body) = send(app.clone(), "GET", "/expense/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Id must be integer: abc");

        let (status, body) = send(app, "GET", "/expense/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Expense with id 7 not found");
    }

    #[tokio::test]
    async fn test_create_with_missing_field() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(
            app,
            "POST",
            "/expense",
            Some(r#"{"name":"tea","category":"food"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Name, nominal, and category cannot be empty");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(app, "POST", "/expense", Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_patch_keeps_id_and_date() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(app, "PATCH", "/expense/1", Some(r#"{"nominal":7}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!([{
                "id": 1,
                "name": "coffee",
                "nominal": 7.0,
                "category": "food",
                "date": "2025-01-10T08:00:00Z"
            }])
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, app) = test_app(vec![coffee()]);

        let (status, body) = send(app.clone(), "DELETE", "/expense/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);

        let (status, body) = send(app, "DELETE", "/expense/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "DELETE data success");
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("missing.json"));
        let app = router(AppState::new(store));

        let (status, body) = send(app, "GET", "/expense", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 500);
    }
}

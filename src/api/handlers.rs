//! Handlers for the `/expense` routes
//!
//! Each handler translates request input into a service call, runs it on the
//! blocking pool (the service does synchronous file I/O), and wraps the result
//! in the response envelope.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{error::ApiError, extractors::JsonBody, response::ApiResponse, AppState};
use crate::error::ExpenseResult;
use crate::models::{ExpenseListing, ExpenseUpdate, NewExpense};
use crate::services::{ExpenseQuery, ExpenseService};

pub type ApiResult = Result<(StatusCode, Json<ApiResponse<Value>>), ApiError>;

/// Query string accepted by `GET /expense`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub startdate: Option<String>,
    pub enddate: Option<String>,
}

impl From<ListParams> for ExpenseQuery {
    fn from(params: ListParams) -> Self {
        ExpenseQuery {
            category: params.category,
            start_date: params.startdate,
            end_date: params.enddate,
        }
    }
}

async fn run_service<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(ExpenseService<'_>) -> ExpenseResult<T> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(ExpenseService::new(&store)))
        .await
        .map_err(|e| ApiError::internal_error(format!("Worker task failed: {}", e)))?
        .map_err(ApiError::from)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal_error(format!("Failed to serialize: {}", e)))
}

/// GET /expense - List expenses, or total them by category or date range
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult {
    let query = ExpenseQuery::from(params);
    let listing = run_service(&state, move |service| service.list(&query)).await?;

    let (message, data) = match listing {
        ExpenseListing::All(expenses) => ("Success", to_json(&expenses)?),
        ExpenseListing::ByCategory(summary) => {
            ("Get Total Expense By Category Success", to_json(&[summary])?)
        }
        ExpenseListing::ByDateRange(summary) => {
            ("Get Total Expense By Date Success", to_json(&[summary])?)
        }
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(StatusCode::OK, message, data)),
    ))
}

/// GET /expense/:id - Get one expense
pub async fn get_expense(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let expense = run_service(&state, move |service| service.get(&id)).await?;

    Ok((
        StatusCode::OK,
        Json(
            ApiResponse::success(StatusCode::OK, "Expense detail", to_json(&expense)?)
                .with_status("success"),
        ),
    ))
}

/// POST /expense - Create an expense
pub async fn create_expense(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewExpense>,
) -> ApiResult {
    let expenses = run_service(&state, move |service| service.create(input)).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(
                StatusCode::CREATED,
                "Expense created successfully",
                to_json(&expenses)?,
            )
            .with_status("success"),
        ),
    ))
}

/// PATCH /expense/:id - Update some fields of an expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<ExpenseUpdate>,
) -> ApiResult {
    let expenses = run_service(&state, move |service| service.update(&id, &update)).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            StatusCode::OK,
            "Success",
            to_json(&expenses)?,
        )),
    ))
}

/// DELETE /expense/:id - Delete an expense
pub async fn delete_expense(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let expenses = run_service(&state, move |service| service.delete(&id)).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            StatusCode::OK,
            "DELETE data success",
            to_json(&expenses)?,
        )),
    ))
}

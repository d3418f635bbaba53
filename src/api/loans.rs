//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::record::RecordDetails};

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Patron ID
    pub patron_id: i32,
    /// Book ID
    pub book_id: i32,
}

/// Borrow response with the assigned record and due date
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Borrowing record ID
    pub record_id: i32,
    /// Due date
    pub due_date: NaiveDate,
    /// Status message
    pub message: String,
}

/// Return response with the closed record
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Return date
    pub return_date: NaiveDate,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 404, description = "Patron or book not found"),
        (status = 422, description = "No copies available")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let record = state
        .services
        .loans
        .borrow(request.patron_id, request.book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            record_id: record.record_id,
            due_date: record.due_date,
            message: "Book borrowed successfully".to_string(),
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Borrowing record ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Record not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(record_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let record = state.services.loans.return_record(record_id).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        // close() always sets the return date
        return_date: record.return_date.unwrap_or(record.due_date),
    }))
}

/// View one borrowing record with its derived status
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Borrowing record ID")
    ),
    responses(
        (status = 200, description = "Record details", body = RecordDetails),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_record(
    State(state): State<crate::AppState>,
    Path(record_id): Path<i32>,
) -> AppResult<Json<RecordDetails>> {
    let details = state.services.loans.get_record(record_id).await?;
    Ok(Json(details))
}

/// List all active (open) loans
#[utoipa::path(
    get,
    path = "/loans/active",
    tag = "loans",
    responses(
        (status = 200, description = "Open loans with derived status", body = Vec<RecordDetails>)
    )
)]
pub async fn list_active(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<RecordDetails>>> {
    let records = state.services.loans.list_active().await?;
    Ok(Json(records))
}

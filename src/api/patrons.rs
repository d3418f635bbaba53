//! Patron management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, PatronQuery, UpdatePatron},
    models::record::RecordDetails,
};

/// List patrons, optionally filtered by name substring
#[utoipa::path(
    get,
    path = "/patrons",
    tag = "patrons",
    params(
        ("name" = Option<String>, Query, description = "Substring match against first or last name")
    ),
    responses(
        (status = 200, description = "List of patrons", body = Vec<Patron>)
    )
)]
pub async fn list_patrons(
    State(state): State<crate::AppState>,
    Query(query): Query<PatronQuery>,
) -> AppResult<Json<Vec<Patron>>> {
    let patrons = state.services.patrons.search_patrons(&query).await?;
    Ok(Json(patrons))
}

/// Get patron details by ID
#[utoipa::path(
    get,
    path = "/patrons/{id}",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Patron details", body = Patron),
        (status = 404, description = "Patron not found")
    )
)]
pub async fn get_patron(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Patron>> {
    let patron = state.services.patrons.get_patron(id).await?;
    Ok(Json(patron))
}

/// Register a new patron
#[utoipa::path(
    post,
    path = "/patrons",
    tag = "patrons",
    request_body = CreatePatron,
    responses(
        (status = 201, description = "Patron registered", body = Patron),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_patron(
    State(state): State<crate::AppState>,
    Json(patron): Json<CreatePatron>,
) -> AppResult<(StatusCode, Json<Patron>)> {
    patron
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.patrons.create_patron(patron).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing patron. Absent fields keep their current value;
/// the registration date is immutable.
#[utoipa::path(
    put,
    path = "/patrons/{id}",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    request_body = UpdatePatron,
    responses(
        (status = 200, description = "Patron updated", body = Patron),
        (status = 404, description = "Patron not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_patron(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(patron): Json<UpdatePatron>,
) -> AppResult<Json<Patron>> {
    patron
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state.services.patrons.update_patron(id, patron).await?;
    Ok(Json(updated))
}

/// Delete a patron
#[utoipa::path(
    delete,
    path = "/patrons/{id}",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 204, description = "Patron deleted"),
        (status = 404, description = "Patron not found"),
        (status = 409, description = "Patron has borrowing records")
    )
)]
pub async fn delete_patron(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.patrons.delete_patron(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a patron's full borrowing history
#[utoipa::path(
    get,
    path = "/patrons/{id}/loans",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Borrowing history, most recent first", body = Vec<RecordDetails>),
        (status = 404, description = "Patron not found")
    )
)]
pub async fn patron_history(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RecordDetails>>> {
    let records = state.services.loans.patron_history(id).await?;
    Ok(Json(records))
}

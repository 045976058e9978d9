use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use harbor_types::api::{BankCreateRequest, Claims, StatusResponse};
use harbor_types::models::Bank;

use crate::error::ApiError;
use crate::state::AppState;

/// Mirror the singleton fee bank; the caller becomes its admin.
pub async fn create_bank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BankCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.create_bank(&req.bank_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Bank created successfully".to_string(),
    }))
}

pub async fn get_bank(
    State(state): State<AppState>,
    Path(bank_id): Path<String>,
) -> Result<Json<Bank>, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_bank(&bank_id))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::not_found("bank not found"))?;

    Ok(Json(Bank {
        bank_id: row.bank_id,
        admin_wallet: row.admin_wallet,
        balance: row.balance,
    }))
}

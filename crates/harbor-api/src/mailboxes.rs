use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use harbor_types::api::{Claims, MailboxCreateRequest, StatusResponse};
use harbor_types::models::Mailbox;

use crate::error::ApiError;
use crate::state::AppState;

/// Look up a wallet's mailbox.
pub async fn get_mailbox(
    State(state): State<AppState>,
    Path(owner_wallet): Path<String>,
) -> Result<Json<Mailbox>, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_mailbox_by_owner(&owner_wallet))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::not_found("mailbox not found"))?;

    Ok(Json(Mailbox {
        mailbox_id: row.mailbox_id,
        owner_wallet: row.owner_wallet,
    }))
}

/// Mirror an on-chain mailbox creation. Public: the frontend calls this
/// right after the init_mailbox transaction settles.
pub async fn create_mailbox(
    State(state): State<AppState>,
    Json(req): Json<MailboxCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.create_mailbox(&req.mailbox_id, &req.owner_wallet))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Mailbox created successfully".to_string(),
    }))
}

/// Mirror an on-chain mailbox deletion; owner-only.
pub async fn delete_mailbox(
    State(state): State<AppState>,
    Path(mailbox_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_mailbox(&mailbox_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Mailbox deleted successfully".to_string(),
    }))
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use harbor_types::api::{Claims, ProfileUpdateRequest, StatusResponse};
use harbor_types::models::User;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<User>, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_user(&wallet_address))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(User {
        address: row.address,
        username: row.username,
        display_name: row.display_name,
        bio: row.bio,
        avatar_cid: row.avatar_cid,
    }))
}

/// Update the caller's bio, the only mutable profile field. The on-chain
/// profile update has already settled when this mirror write happens.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.update_bio(&claims.sub, &req.new_bio))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

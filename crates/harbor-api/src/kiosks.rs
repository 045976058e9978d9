use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use harbor_db::models::NewKioskItem;
use harbor_db::ownership::assert_owner;
use harbor_types::api::{Claims, KioskCreateRequest, KioskItemCreateRequest, StatusResponse};
use harbor_types::models::{Kiosk, KioskItem};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_kiosk(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<KioskCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.create_kiosk(&req.kiosk_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Kiosk created successfully".to_string(),
    }))
}

pub async fn add_kiosk_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<KioskItemCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = NewKioskItem {
        item_id: req.item_id,
        kiosk_id: req.kiosk_id,
        title: req.title,
        content_cid: req.content_cid,
        price: req.price,
    };

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.add_kiosk_item(&item, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Kiosk item published successfully".to_string(),
    }))
}

pub async fn get_kiosks(State(state): State<AppState>) -> Result<Json<Vec<Kiosk>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_kiosks())
        .await
        .map_err(ApiError::join)??;

    Ok(Json(
        rows.into_iter()
            .map(|row| Kiosk {
                kiosk_id: row.kiosk_id,
                owner_wallet: row.owner_wallet,
            })
            .collect(),
    ))
}

pub async fn get_kiosk(
    State(state): State<AppState>,
    Path(kiosk_id): Path<String>,
) -> Result<Json<Kiosk>, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_kiosk(&kiosk_id))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::not_found("kiosk not found"))?;

    Ok(Json(Kiosk {
        kiosk_id: row.kiosk_id,
        owner_wallet: row.owner_wallet,
    }))
}

/// Storefront listing for one kiosk.
pub async fn get_store_items(
    State(state): State<AppState>,
    Path(kiosk_id): Path<String>,
) -> Result<Json<Vec<KioskItem>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_kiosk_items(&kiosk_id))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(
        rows.into_iter()
            .map(|row| KioskItem {
                item_id: row.item_id,
                kiosk_id: row.kiosk_id,
                title: row.title,
                content_cid: row.content_cid,
                price: row.price,
            })
            .collect(),
    ))
}

pub async fn delete_kiosk_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.remove_kiosk_item(&item_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Kiosk item deleted successfully".to_string(),
    }))
}

pub async fn delete_kiosk(
    State(state): State<AppState>,
    Path(kiosk_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_kiosk(&kiosk_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Kiosk deleted successfully".to_string(),
    }))
}

/// Drop a purchased item from the mirror. Payment settlement happened
/// on-chain before the frontend calls this.
pub async fn buy_kiosk_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.purchase_item(&item_id))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Kiosk item purchased successfully".to_string(),
    }))
}

/// Originate a funds withdrawal through the relay; owner-only. The relay
/// verdict decides the request's fate, with no retries.
pub async fn withdraw_funds(
    State(state): State<AppState>,
    Path(kiosk_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let id = kiosk_id.clone();
    let kiosk = tokio::task::spawn_blocking(move || db.db.get_kiosk(&id))
        .await
        .map_err(ApiError::join)??
        .ok_or_else(|| ApiError::not_found("kiosk not found"))?;
    assert_owner(&kiosk.owner_wallet, &claims.sub, "kiosk")?;

    state.chain.withdraw_funds(&kiosk_id).await?;

    Ok(Json(StatusResponse {
        message: "Withdrawal submitted".to_string(),
    }))
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::warn;

use harbor_db::models::NewMessage;
use harbor_types::api::{
    Claims, MessageView, NftTransferRequest, StatusResponse, StoreMessageRequest,
    StoreMessageResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Store one mirrored message. The body, if any, is encrypted before it
/// reaches the store; the CID is persisted verbatim as the canonical
/// reference. An encryption failure aborts the write with nothing persisted.
pub async fn store_message(
    State(state): State<AppState>,
    Json(req): Json<StoreMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let content = match req.body.as_deref() {
        Some(body) => Some(state.cipher.encrypt(body)?),
        None => None,
    };

    let msg = NewMessage {
        id: req.id,
        sender: req.sender,
        receiver: req.receiver,
        cid: req.cid,
        content,
        timestamp: req.timestamp,
        nft_object_id: req.nft_object_id,
        claim_price: req.claim_price,
        mailbox_id: req.mailbox_id,
    };

    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.insert_message(&msg))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StoreMessageResponse {
        message: "Message stored successfully".to_string(),
        id: row.id,
    }))
}

/// Every message where the caller is sender or receiver. Decryption is
/// per-record: a record that no longer decrypts is returned with the
/// `undecryptable` flag instead of failing the whole listing.
pub async fn get_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    let db = state.clone();
    let wallet = claims.sub.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.messages_for_participant(&wallet))
        .await
        .map_err(ApiError::join)??;

    let views = rows
        .into_iter()
        .map(|row| {
            let (content, undecryptable) = match row.content.as_deref() {
                None => (None, false),
                Some(stored) => match state.cipher.decrypt(stored) {
                    Ok(plaintext) => (Some(plaintext), false),
                    Err(e) => {
                        warn!("undecryptable content on message {}: {}", row.id, e);
                        (None, true)
                    }
                },
            };
            MessageView {
                id: row.id,
                sender: row.sender,
                receiver: row.receiver,
                cid: row.cid,
                content,
                timestamp: row.timestamp,
                nft_object_id: row.nft_object_id,
                claim_price: row.claim_price,
                mailbox_id: row.mailbox_id,
                undecryptable,
            }
        })
        .collect();

    Ok(Json(views))
}

/// Mirror an on-chain message deletion; mailbox-owner-only.
pub async fn delete_message(
    State(state): State<AppState>,
    Path((mailbox_id, message_id)): Path<(String, i64)>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_message(&mailbox_id, message_id, &claims.sub))
        .await
        .map_err(ApiError::join)??;

    Ok(Json(StatusResponse {
        message: "Message deleted successfully".to_string(),
    }))
}

/// Originate an NFT transfer through the relay. A relay rejection is fatal
/// to this request; reconciliation is the frontend's problem.
pub async fn transfer_nft(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<NftTransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.chain.transfer_nft(&req.recipient, &req.nft_id).await?;

    Ok(Json(StatusResponse {
        message: "NFT transfer submitted".to_string(),
    }))
}

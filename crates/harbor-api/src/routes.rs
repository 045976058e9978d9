use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::state::AppState;
use crate::{auth, bank, kiosks, mailboxes, messages, middleware::require_auth, profile};

/// Full REST surface. Public routes mirror state the frontend reports after
/// on-chain settlement; protected routes require a bearer session token.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/token", post(auth::token))
        .route("/register", post(auth::register))
        .route("/create_mailbox", post(mailboxes::create_mailbox))
        .route("/store_message", post(messages::store_message))
        .route("/user/{wallet_address}", get(profile::get_user))
        .route("/mailbox/{owner_wallet}", get(mailboxes::get_mailbox))
        .route("/kiosks", get(kiosks::get_kiosks))
        .route("/kiosk/{kiosk_id}", get(kiosks::get_kiosk))
        .route("/store/{kiosk_id}", get(kiosks::get_store_items))
        .route("/buy_kiosk_item/{item_id}", post(kiosks::buy_kiosk_item))
        .route("/bank/{bank_id}", get(bank::get_bank))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/messages", get(messages::get_messages))
        .route(
            "/delete_message/{mailbox_id}/{message_id}",
            delete(messages::delete_message),
        )
        .route(
            "/delete_mailbox/{mailbox_id}",
            delete(mailboxes::delete_mailbox),
        )
        .route("/update_profile", post(profile::update_profile))
        .route("/create_kiosk", post(kiosks::create_kiosk))
        .route("/add_kiosk_item", post(kiosks::add_kiosk_item))
        .route(
            "/delete_kiosk_item/{item_id}",
            delete(kiosks::delete_kiosk_item),
        )
        .route("/delete_kiosk/{kiosk_id}", delete(kiosks::delete_kiosk))
        .route("/withdraw_funds/{kiosk_id}", post(kiosks::withdraw_funds))
        .route("/transfer_nft", post(messages::transfer_nft))
        .route("/create_bank", post(bank::create_bank))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public).merge(protected)
}

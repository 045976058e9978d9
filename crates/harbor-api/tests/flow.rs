//! End-to-end handler tests over an in-memory store. The chain relay client
//! points at a dead address; none of the flows exercised here submit to it.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use harbor_api::routes::router;
use harbor_api::state::AppStateInner;
use harbor_chain::ChainClient;
use harbor_crypto::{MessageCipher, keys};
use harbor_db::Database;
use harbor_types::api::Claims;

const JWT_SECRET: &str = "test-secret";

fn app() -> Router {
    let state = Arc::new(AppStateInner {
        db: Database::open_in_memory().expect("in-memory database"),
        cipher: MessageCipher::new(keys::generate_key()),
        chain: ChainClient::new("http://127.0.0.1:1", "0x0"),
        jwt_secret: JWT_SECRET.to_string(),
    });
    router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_bearer(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn register_body(wallet: &str, username: &str) -> Value {
    json!({
        "wallet_address": wallet,
        "username": username,
        "display_name": "Test",
        "bio": "",
        "avatar_cid": "",
        "password": "password123",
    })
}

async fn register_and_login(app: &Router, wallet: &str, username: &str) -> String {
    let (status, _) = send(app, post_json("/register", register_body(wallet, username))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        post_json(
            "/auth/token",
            json!({"wallet_address": wallet, "password": "password123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_mailbox_store_and_list_roundtrip() {
    let app = app();
    let token = register_and_login(&app, "0xA", "alice").await;

    // Second registration is rejected without touching the first.
    let (status, _) = send(&app, post_json("/register", register_body("0xA", "mallory"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json(
            "/create_mailbox",
            json!({"mailbox_id": "mbx1", "owner_wallet": "0xA"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        post_json(
            "/store_message",
            json!({
                "sender": "0xA",
                "receiver": "0xB",
                "cid": "Qm123",
                "body": "hello",
                "timestamp": 1000,
                "mailbox_id": "mbx1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().unwrap() > 0);

    let (status, body) = send(&app, get_bearer("/messages", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["cid"], "Qm123");
    assert_eq!(messages[0]["content"], "hello");
    assert_eq!(messages[0]["undecryptable"], false);
}

#[tokio::test]
async fn store_message_validation_failures() {
    let app = app();
    register_and_login(&app, "0xA", "alice").await;
    let (status, _) = send(
        &app,
        post_json(
            "/create_mailbox",
            json!({"mailbox_id": "mbx1", "owner_wallet": "0xA"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Empty CID.
    let (status, body) = send(
        &app,
        post_json(
            "/store_message",
            json!({
                "sender": "0xA", "receiver": "0xB", "cid": "",
                "timestamp": 1000, "mailbox_id": "mbx1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "CID cannot be empty");

    // NFT fields must come together.
    let (status, _) = send(
        &app,
        post_json(
            "/store_message",
            json!({
                "sender": "0xA", "receiver": "0xB", "cid": "Qm123",
                "timestamp": 1000, "mailbox_id": "mbx1",
                "nft_object_id": "0xNFT",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown mailbox.
    let (status, _) = send(
        &app,
        post_json(
            "/store_message",
            json!({
                "sender": "0xA", "receiver": "0xB", "cid": "Qm123",
                "timestamp": 1000, "mailbox_id": "mbx-none",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_endpoints_reject_missing_and_expired_tokens() {
    let app = app();

    let (status, _) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/messages")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A token whose validity window has elapsed.
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Claims {
            sub: "0xA".to_string(),
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        },
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, _) = send(&app, get_bearer("/messages", &expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn kiosk_mutations_enforce_ownership() {
    let app = app();
    let owner_token = register_and_login(&app, "0xA", "alice").await;
    let other_token = register_and_login(&app, "0xB", "bob").await;

    // create_kiosk is protected; a bare request must be rejected.
    let (status, _) = send(&app, post_json("/create_kiosk", json!({"kiosk_id": "k1"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut req = post_json("/create_kiosk", json!({"kiosk_id": "k1"}));
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {owner_token}").parse().unwrap(),
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let mut req = post_json(
        "/add_kiosk_item",
        json!({
            "item_id": "i1", "kiosk_id": "k1", "title": "Item",
            "content_cid": "QmItem", "price": 100,
        }),
    );
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {other_token}").parse().unwrap(),
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("GET")
            .uri("/store/k1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

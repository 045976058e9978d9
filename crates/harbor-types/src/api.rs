use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// JWT claims shared by the REST middleware and the token issuer. Canonical
/// definition lives here in harbor-types to eliminate duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject wallet address.
    pub sub: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenRequest {
    pub wallet_address: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub wallet_address: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_cid: String,
    pub password: String,
}

/// Plain `{"message": ...}` acknowledgement used by all mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

// -- Mailboxes --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailboxCreateRequest {
    pub mailbox_id: String,
    pub owner_wallet: String,
}

// -- Messages --

/// Covers both the plain and the NFT-bearing message shapes. `id` mirrors the
/// on-chain sequence number when the caller supplies it; otherwise the store
/// assigns one. `nft_object_id` and `claim_price` go together or not at all.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreMessageRequest {
    pub id: Option<i64>,
    pub sender: String,
    pub receiver: String,
    pub cid: String,
    pub body: Option<String>,
    pub timestamp: i64,
    pub nft_object_id: Option<String>,
    pub claim_price: Option<i64>,
    pub mailbox_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreMessageResponse {
    pub message: String,
    pub id: i64,
}

/// A message as returned to the caller. `content` is the decrypted body when
/// one was stored; `undecryptable` marks a record whose stored ciphertext
/// could not be decrypted with the configured key.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub sender: String,
    pub receiver: String,
    pub cid: String,
    pub content: Option<String>,
    pub timestamp: i64,
    pub nft_object_id: Option<String>,
    pub claim_price: Option<i64>,
    pub mailbox_id: String,
    pub undecryptable: bool,
}

// -- Profile --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdateRequest {
    pub new_bio: String,
}

// -- Kiosks --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KioskCreateRequest {
    pub kiosk_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KioskItemCreateRequest {
    pub item_id: String,
    pub kiosk_id: String,
    pub title: String,
    pub content_cid: String,
    pub price: i64,
}

// -- NFT transfer --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NftTransferRequest {
    pub recipient: String,
    pub nft_id: String,
}

// -- Bank --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BankCreateRequest {
    pub bank_id: String,
}

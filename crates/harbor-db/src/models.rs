/// Database row types — these map directly to SQLite rows.
/// Distinct from the harbor-types API models to keep the store layer
/// independent of the HTTP surface.

pub struct UserRow {
    pub address: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_cid: String,
    pub password: String,
    pub created_at: String,
}

pub struct NewUser {
    pub address: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_cid: String,
    /// Argon2id hash, never a plaintext credential.
    pub password_hash: String,
}

pub struct MailboxRow {
    pub id: i64,
    pub mailbox_id: String,
    pub owner_wallet: String,
}

pub struct MessageRow {
    pub id: i64,
    pub sender: String,
    pub receiver: String,
    pub cid: String,
    /// Ciphertext produced by the cipher service, or NULL when the sender
    /// supplied no body. Plaintext is never persisted.
    pub content: Option<String>,
    pub timestamp: i64,
    pub nft_object_id: Option<String>,
    pub claim_price: Option<i64>,
    pub mailbox_id: String,
}

pub struct NewMessage {
    /// On-chain sequence number when supplied; assigned locally otherwise.
    pub id: Option<i64>,
    pub sender: String,
    pub receiver: String,
    pub cid: String,
    pub content: Option<String>,
    pub timestamp: i64,
    pub nft_object_id: Option<String>,
    pub claim_price: Option<i64>,
    pub mailbox_id: String,
}

pub struct KioskRow {
    pub id: i64,
    pub kiosk_id: String,
    pub owner_wallet: String,
}

pub struct KioskItemRow {
    pub id: i64,
    pub item_id: String,
    pub kiosk_id: String,
    pub title: String,
    pub content_cid: String,
    pub price: i64,
}

pub struct NewKioskItem {
    pub item_id: String,
    pub kiosk_id: String,
    pub title: String,
    pub content_cid: String,
    pub price: i64,
}

pub struct BankRow {
    pub bank_id: String,
    pub admin_wallet: String,
    pub balance: i64,
}

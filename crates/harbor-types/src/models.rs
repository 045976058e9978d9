use serde::{Deserialize, Serialize};

/// Off-chain mirror of an on-chain user profile. The wallet address is the
/// identity key and never changes after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub address: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_cid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mailbox {
    pub mailbox_id: String,
    pub owner_wallet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kiosk {
    pub kiosk_id: String,
    pub owner_wallet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskItem {
    pub item_id: String,
    pub kiosk_id: String,
    pub title: String,
    pub content_cid: String,
    pub price: i64,
}

/// Singleton fee ledger controlled by a single admin wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub bank_id: String,
    pub admin_wallet: String,
    pub balance: i64,
}

use std::sync::Arc;

use harbor_chain::ChainClient;
use harbor_crypto::MessageCipher;
use harbor_db::Database;

pub type AppState = Arc<AppStateInner>;

/// Shared, read-only-after-startup state. Handlers are otherwise stateless;
/// the only cross-request coordination is SQLite's own locking.
pub struct AppStateInner {
    pub db: Database,
    pub cipher: MessageCipher,
    pub chain: ChainClient,
    pub jwt_secret: String,
}

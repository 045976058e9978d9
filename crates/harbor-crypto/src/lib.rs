/// Harbor Crypto
///
/// Encryption-at-rest for mirrored message bodies (AES-256-GCM under a
/// single service key). The CID stays the canonical reference to the
/// off-chain content; the encrypted local copy is a cache, never the record
/// of truth, so a lost key costs reads but not data.
pub mod cipher;
pub mod keys;

pub use cipher::{CipherError, MessageCipher};

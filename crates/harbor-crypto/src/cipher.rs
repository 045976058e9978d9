use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, rand_core::RngCore},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

/// Sentinel stored in place of a ciphertext when the sender supplied an
/// empty body. Not valid base64, so it can never collide with real output.
pub const EMPTY_BODY_MARKER: &str = "!empty";

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    Encryption(String),
    #[error("ciphertext cannot be decrypted with the configured key")]
    Decryption,
    #[error("malformed stored ciphertext: {0}")]
    Malformed(String),
}

/// Symmetric cipher for message bodies. The key is loaded once at startup
/// (see [`crate::keys`]) and read-only afterwards.
#[derive(Clone)]
pub struct MessageCipher {
    key: [u8; 32],
}

impl MessageCipher {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Encrypt a message body for storage. Output is base64(nonce || ciphertext)
    /// with a fresh random 96-bit nonce per call. An empty body yields the
    /// explicit no-content marker rather than an empty ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        if plaintext.is_empty() {
            return Ok(EMPTY_BODY_MARKER.to_string());
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));

        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CipherError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(nonce_bytes.len() + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(out))
    }

    /// Decrypt a stored body. `Decryption` means the value was produced under
    /// a different key or the ciphertext is corrupt; `Malformed` means the
    /// stored value is not even a valid envelope. Callers listing many
    /// records recover per-record instead of aborting.
    pub fn decrypt(&self, stored: &str) -> Result<String, CipherError> {
        if stored == EMPTY_BODY_MARKER {
            return Ok(String::new());
        }

        let raw = BASE64
            .decode(stored)
            .map_err(|e| CipherError::Malformed(e.to_string()))?;
        if raw.len() < 12 {
            return Err(CipherError::Malformed("shorter than nonce".into()));
        }
        let (nonce_bytes, ciphertext) = raw.split_at(12);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::Decryption)?;

        String::from_utf8(plaintext).map_err(|e| CipherError::Malformed(e.to_string()))
    }
}

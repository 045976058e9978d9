use std::fs;
use std::io;
use std::path::Path;

use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Generate a random 256-bit service key.
pub fn generate_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode a key to base64 for the key file.
pub fn key_to_base64(key: &[u8; 32]) -> String {
    BASE64.encode(key)
}

/// Decode a base64 key.
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32]> {
    let bytes = BASE64.decode(encoded)?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("invalid key length"))?;
    Ok(key)
}

/// Load the service key from `path`, generating and persisting a fresh one
/// on first start. The key is configuration with an explicit lifecycle: a
/// generated key is written to disk before it is ever used, so ciphertext
/// stored under it stays readable across restarts.
pub fn load_or_generate(path: &Path) -> Result<[u8; 32]> {
    match fs::read_to_string(path) {
        Ok(encoded) => key_from_base64(encoded.trim())
            .with_context(|| format!("invalid key file {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let key = generate_key();
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, key_to_base64(&key))
                .with_context(|| format!("failed to persist key file {}", path.display()))?;
            Ok(key)
        }
        Err(e) => Err(e).with_context(|| format!("failed to read key file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_roundtrip() {
        let key = generate_key();
        let encoded = key_to_base64(&key);
        assert_eq!(key_from_base64(&encoded).unwrap(), key);
    }

    #[test]
    fn load_or_generate_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.key");

        let first = load_or_generate(&path).unwrap();
        let second = load_or_generate(&path).unwrap();
        assert_eq!(first, second);

        // The persisted file is the base64 of the generated key.
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(key_from_base64(on_disk.trim()).unwrap(), first);
    }

    #[test]
    fn rejects_truncated_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.key");
        std::fs::write(&path, "AAAA").unwrap();

        assert!(load_or_generate(&path).is_err());
    }
}

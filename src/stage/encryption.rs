//! Passphrase-based encryption stage.
//!
//! This stage works text-in/text-out so it can sit between the base64 and
//! binary-encoding steps of the pipeline:
//! - HKDF-SHA256 derives a 256-bit key from the passphrase
//! - ChaCha20-Poly1305 provides authenticated encryption
//! - output is base64 of `nonce (12 bytes) || ciphertext (incl. auth tag)`
//!
//! A wrong passphrase fails the AEAD tag check and is reported as an error,
//! unlike the seed-keyed stages which corrupt silently.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

use super::Encryption;

/// HKDF info string for passphrase-based key derivation.
const HKDF_INFO: &[u8] = b"PIXELHIDE-V1-SYMMETRIC";

/// Salt for HKDF (fixed so the same passphrase always derives the same key).
const HKDF_SALT: &[u8] = b"PIXELHIDE-V1-SALT";

/// Nonce size for ChaCha20Poly1305.
const NONCE_SIZE: usize = 12;

/// Encryption stage errors.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid ciphertext: too short")]
    CiphertextTooShort,

    #[error("Invalid ciphertext: not valid base64")]
    CiphertextNotBase64,

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

/// ChaCha20-Poly1305 [`Encryption`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassphraseEncryption;

/// Derives a 256-bit symmetric key from a passphrase.
fn derive_key(passphrase: &str) -> Result<[u8; 32], EncryptionError> {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), passphrase.as_bytes());
    let mut key = [0u8; 32];
    hk.expand(HKDF_INFO, &mut key)
        .map_err(|_| EncryptionError::KeyDerivationFailed)?;
    Ok(key)
}

impl Encryption for PassphraseEncryption {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String, EncryptionError> {
        let key = derive_key(passphrase)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let cipher = ChaCha20Poly1305::new_from_slice(&key)
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(&combined))
    }

    fn decrypt(&self, ciphertext: &str, passphrase: &str) -> Result<String, EncryptionError> {
        let combined = BASE64
            .decode(ciphertext.trim())
            .map_err(|_| EncryptionError::CiphertextNotBase64)?;

        // Minimum: 12 (nonce) + 16 (auth tag)
        if combined.len() < NONCE_SIZE + 16 {
            return Err(EncryptionError::CiphertextTooShort);
        }

        let (nonce_bytes, payload) = combined.split_at(NONCE_SIZE);
        let key = derive_key(passphrase)?;

        let cipher = ChaCha20Poly1305::new_from_slice(&key)
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))?;

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), payload)
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| EncryptionError::DecryptionFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let stage = PassphraseEncryption;
        let plaintext = "aGVsbG8gcGl4ZWxz";

        let encrypted = stage.encrypt(plaintext, "my_secret").unwrap();
        let decrypted = stage.decrypt(&encrypted, "my_secret").unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_output_is_text() {
        let stage = PassphraseEncryption;
        let encrypted = stage.encrypt("payload", "pass").unwrap();

        assert!(encrypted.is_ascii());
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let stage = PassphraseEncryption;
        let encrypted = stage.encrypt("secret data", "correct").unwrap();

        let result = stage.decrypt(&encrypted, "wrong");
        assert!(matches!(result, Err(EncryptionError::DecryptionFailed(_))));
    }

    #[test]
    fn test_empty_plaintext() {
        let stage = PassphraseEncryption;

        let encrypted = stage.encrypt("", "test").unwrap();
        let decrypted = stage.decrypt(&encrypted, "test").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_ciphertext_too_short() {
        let stage = PassphraseEncryption;
        let short = BASE64.encode([0u8; 10]);

        let result = stage.decrypt(&short, "test");
        assert!(matches!(result, Err(EncryptionError::CiphertextTooShort)));
    }

    #[test]
    fn test_non_base64_ciphertext() {
        let stage = PassphraseEncryption;

        let result = stage.decrypt("not valid base64!!!", "test");
        assert!(matches!(result, Err(EncryptionError::CiphertextNotBase64)));
    }

    #[test]
    fn test_corrupted_ciphertext_fails() {
        let stage = PassphraseEncryption;
        let encrypted = stage.encrypt("secret data", "pass").unwrap();

        let mut raw = BASE64.decode(&encrypted).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        let tampered = BASE64.encode(&raw);

        assert!(stage.decrypt(&tampered, "pass").is_err());
    }

    #[test]
    fn test_deterministic_key_derivation() {
        let key1 = derive_key("same passphrase").unwrap();
        let key2 = derive_key("same passphrase").unwrap();

        assert_eq!(key1, key2);
    }
}

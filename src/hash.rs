//! Digest, armor and encryption pass-throughs.
//!
//! These are thin wrappers over the external primitives: the strand's
//! responsibility is feeding its raw bytes through and wrapping the result
//! back up with the encoding tag preserved. Digests render as lowercase
//! hex.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{AeadCore, XChaCha20Poly1305, XNonce};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};
use crate::strand::Strand;

// XChaCha20 nonce length in bytes, prepended to the ciphertext.
const NONCE_LEN: usize = 24;

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

impl Strand {
    // === Digests ===

    /// Returns the CRC-32 checksum of the UTF-8 bytes.
    pub fn crc32(&self) -> u32 {
        crc32fast::hash(self.as_str().as_bytes())
    }

    /// Returns the MD5 digest as lowercase hex.
    pub fn md5(&self) -> Self {
        self.derive(hex(&Md5::digest(self.as_str().as_bytes())))
    }

    /// Returns the SHA-1 digest as lowercase hex.
    pub fn sha1(&self) -> Self {
        self.derive(hex(&Sha1::digest(self.as_str().as_bytes())))
    }

    /// Returns the SHA-256 digest as lowercase hex.
    pub fn sha256(&self) -> Self {
        self.derive(hex(&Sha256::digest(self.as_str().as_bytes())))
    }

    /// Returns the SHA-512 digest as lowercase hex.
    pub fn sha512(&self) -> Self {
        self.derive(hex(&Sha512::digest(self.as_str().as_bytes())))
    }

    /// Dispatches to a digest by name: `crc32`, `md5`, `sha1`, `sha256`
    /// or `sha512` (case-insensitive). An unknown name fails with
    /// [`Error::InvalidArgument`].
    pub fn hash(&self, algorithm: &str) -> Result<Self> {
        match algorithm.to_ascii_lowercase().as_str() {
            "crc32" => Ok(self.derive(format!("{:08x}", self.crc32()))),
            "md5" => Ok(self.md5()),
            "sha1" => Ok(self.sha1()),
            "sha256" => Ok(self.sha256()),
            "sha512" => Ok(self.sha512()),
            other => Err(Error::invalid_argument(format!(
                "unknown hash algorithm {other:?}"
            ))),
        }
    }

    // === Armor ===

    /// Encodes the UTF-8 bytes as standard base64.
    pub fn base64_encode(&self) -> Self {
        self.derive(BASE64.encode(self.as_str().as_bytes()))
    }

    /// Decodes standard base64 back into text.
    ///
    /// Fails with [`Error::InvalidInput`] when the payload is not base64
    /// or does not decode to valid UTF-8.
    pub fn base64_decode(&self) -> Result<Self> {
        let bytes = BASE64
            .decode(self.as_str())
            .map_err(|e| Error::invalid_input(format!("invalid base64: {e}")))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::invalid_input("base64 payload is not valid UTF-8"))?;
        Ok(self.derive(text))
    }

    /// Encodes the UTF-8 bytes as lowercase hex.
    pub fn hex_encode(&self) -> Self {
        self.derive(hex(self.as_str().as_bytes()))
    }

    /// Decodes a hex payload back into text.
    ///
    /// Fails with [`Error::InvalidInput`] on odd length, non-hex digits
    /// or a payload that is not valid UTF-8.
    pub fn hex_decode(&self) -> Result<Self> {
        let s = self.as_str();
        if s.len() % 2 != 0 {
            return Err(Error::invalid_input("hex payload has odd length"));
        }
        let mut bytes = Vec::with_capacity(s.len() / 2);
        for pair in s.as_bytes().chunks_exact(2) {
            let hi = (pair[0] as char)
                .to_digit(16)
                .ok_or_else(|| Error::invalid_input("non-hex digit in payload"))?;
            let lo = (pair[1] as char)
                .to_digit(16)
                .ok_or_else(|| Error::invalid_input("non-hex digit in payload"))?;
            bytes.push((hi * 16 + lo) as u8);
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::invalid_input("hex payload is not valid UTF-8"))?;
        Ok(self.derive(text))
    }

    // === Password hashing ===

    /// Hashes the content with bcrypt at the given cost factor.
    ///
    /// Fails with [`Error::InvalidArgument`] for a cost outside bcrypt's
    /// accepted range.
    pub fn bcrypt(&self, cost: u32) -> Result<Self> {
        bcrypt::hash(self.as_str(), cost)
            .map(|h| self.derive(h))
            .map_err(|e| Error::invalid_argument(format!("bcrypt: {e}")))
    }

    /// Verifies the content against a bcrypt hash. Malformed hashes
    /// verify as `false`.
    pub fn bcrypt_verify(&self, hashed: &str) -> bool {
        bcrypt::verify(self.as_str(), hashed).unwrap_or(false)
    }

    // === Authenticated encryption ===

    /// Encrypts with XChaCha20-Poly1305 under a key derived from
    /// SHA-256 of `key`. The random nonce is prepended and the whole
    /// payload base64-armored.
    pub fn encrypt(&self, key: &str) -> Result<Self> {
        let cipher = XChaCha20Poly1305::new(&derive_key(key).into());
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, self.as_str().as_bytes())
            .map_err(|_| Error::invalid_input("encryption failed"))?;
        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);
        Ok(self.derive(BASE64.encode(payload)))
    }

    /// Decrypts an [`encrypt`](Self::encrypt) payload.
    ///
    /// A wrong key, tampered or truncated ciphertext fails with
    /// [`Error::CryptoIntegrity`]; garbage is never returned.
    pub fn decrypt(&self, key: &str) -> Result<Self> {
        let payload = BASE64
            .decode(self.as_str())
            .map_err(|_| Error::CryptoIntegrity)?;
        if payload.len() < NONCE_LEN {
            return Err(Error::CryptoIntegrity);
        }
        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let cipher = XChaCha20Poly1305::new(&derive_key(key).into());
        let plaintext = cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::CryptoIntegrity)?;
        let text = String::from_utf8(plaintext).map_err(|_| Error::CryptoIntegrity)?;
        Ok(self.derive(text))
    }
}

fn derive_key(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}

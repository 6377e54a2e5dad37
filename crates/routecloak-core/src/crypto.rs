//! Keyed, deterministic codec for URL path segments.
//!
//! Turns a short plain segment name such as `continents` into an opaque,
//! URL-safe token and back. The transform is a synthetic-IV construction over
//! AES-256-GCM, so the same name always yields the same token for a given
//! secret, and any token not produced under that secret fails authentication.
//!
//! # Token format
//!
//! - The plain name is framed as `len (1 byte) || name || zero padding` into a
//!   fixed 32-byte block, so token length does not depend on the name.
//! - Nonce: first 12 bytes of `HMAC-SHA256(siv_key, block)`.
//! - Token: unpadded base64url of `nonce (12) || ciphertext (32) || tag (16)`,
//!   always [`TOKEN_LEN`] characters from `[A-Za-z0-9_-]`.
//!
//! # Security model
//!
//! None. The secret is compiled into (or configured for) a client that must
//! decode tokens on its own, so the scheme only keeps module names out of
//! casual view in the address bar.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CodecError;

type HmacSha256 = Hmac<Sha256>;

/// Passphrase used when no route secret is configured.
///
/// Shipped in every client build. Changing it invalidates all previously
/// issued links and bookmarks.
pub const DEFAULT_ROUTE_SECRET: &str = "routecloak-admin-panel-v1";

/// Longest plain segment name the codec accepts.
pub const MAX_SEGMENT_LEN: usize = 31;

/// Length of every token produced by [`SegmentCodec::encrypt_segment`].
pub const TOKEN_LEN: usize = RAW_TOKEN_LEN / 3 * 4;

const BLOCK_LEN: usize = MAX_SEGMENT_LEN + 1;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const RAW_TOKEN_LEN: usize = NONCE_LEN + BLOCK_LEN + TAG_LEN;

const HKDF_SALT: &[u8] = b"routecloak-segment-v1";
const ENC_INFO: &[u8] = b"routecloak-segment-enc";
const SIV_INFO: &[u8] = b"routecloak-segment-siv";

/// A 256-bit key derived from the route secret, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct SegmentKey([u8; 32]);

impl SegmentKey {
    fn derive(secret: &[u8], info: &[u8]) -> Result<Self, CodecError> {
        let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), secret);
        let mut derived = [0u8; 32];
        hk.expand(info, &mut derived)
            .map_err(|e| CodecError::KeyDerivation {
                context: String::from_utf8_lossy(info).into_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self(derived))
    }

    fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Bidirectional segment codec bound to one route secret.
///
/// Cheap to share behind an `Arc`; holds only the two derived keys.
#[derive(Clone)]
pub struct SegmentCodec {
    enc_key: SegmentKey,
    siv_key: SegmentKey,
}

impl fmt::Debug for SegmentCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentCodec")
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl SegmentCodec {
    /// Derive a codec from a route secret.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptySecret`] for an empty secret, or
    /// [`CodecError::KeyDerivation`] if HKDF expansion fails.
    pub fn new(secret: &str) -> Result<Self, CodecError> {
        if secret.is_empty() {
            return Err(CodecError::EmptySecret);
        }
        Ok(Self {
            enc_key: SegmentKey::derive(secret.as_bytes(), ENC_INFO)?,
            siv_key: SegmentKey::derive(secret.as_bytes(), SIV_INFO)?,
        })
    }

    /// Codec for [`DEFAULT_ROUTE_SECRET`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::KeyDerivation`] if HKDF expansion fails.
    pub fn with_default_secret() -> Result<Self, CodecError> {
        Self::new(DEFAULT_ROUTE_SECRET)
    }

    /// Encode a plain segment name into a URL-safe token.
    ///
    /// Deterministic: the same name under the same secret always gives the
    /// same token.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptySegment`], [`CodecError::SegmentTooLong`] or
    /// [`CodecError::InvalidCharacter`] if `plain` is not a valid segment
    /// name, and [`CodecError::Encryption`] if the AEAD operation fails.
    pub fn encrypt_segment(&self, plain: &str) -> Result<String, CodecError> {
        validate_segment(plain)?;
        let block = frame(plain)?;
        let nonce = self.synthetic_nonce(&block)?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.enc_key.as_bytes()));
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), block.as_slice())
            .map_err(|e| CodecError::Encryption {
                reason: e.to_string(),
            })?;

        let mut combined = Vec::with_capacity(RAW_TOKEN_LEN);
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    /// Decode a token taken from a URL path segment.
    ///
    /// Returns `None` for anything that was not produced by
    /// [`encrypt_segment`](Self::encrypt_segment) under this secret. Input is
    /// length- and alphabet-checked before any crypto runs, so cost is bounded
    /// regardless of what the URL contains.
    pub fn decrypt_segment(&self, token: &str) -> Option<String> {
        if token.len() != TOKEN_LEN || !token.bytes().all(is_token_byte) {
            return None;
        }

        let raw = URL_SAFE_NO_PAD.decode(token).ok()?;
        if raw.len() != RAW_TOKEN_LEN {
            return None;
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.enc_key.as_bytes()));
        let block = cipher.decrypt(Nonce::from_slice(nonce), ciphertext).ok()?;

        let expected = self.synthetic_nonce(&block).ok()?;
        if !bool::from(expected.as_slice().ct_eq(nonce)) {
            return None;
        }

        let plain = unframe(&block)?;
        validate_segment(plain).ok()?;
        Some(plain.to_owned())
    }

    fn synthetic_nonce(&self, block: &[u8]) -> Result<[u8; NONCE_LEN], CodecError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.siv_key.as_bytes()).map_err(|e| {
            CodecError::Encryption {
                reason: e.to_string(),
            }
        })?;
        mac.update(block);
        let digest = mac.finalize().into_bytes();

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&digest[..NONCE_LEN]);
        Ok(nonce)
    }
}

/// Check that `plain` is a valid segment name.
///
/// Accepted: 1 to [`MAX_SEGMENT_LEN`] bytes of `[a-z0-9-]`, not starting or
/// ending with `-`.
///
/// # Errors
///
/// Returns the [`CodecError`] variant describing the first problem found.
pub fn validate_segment(plain: &str) -> Result<(), CodecError> {
    if plain.is_empty() {
        return Err(CodecError::EmptySegment);
    }
    if plain.len() > MAX_SEGMENT_LEN {
        return Err(CodecError::SegmentTooLong {
            len: plain.len(),
            max: MAX_SEGMENT_LEN,
        });
    }

    let last = plain.len().saturating_sub(1);
    for (position, ch) in plain.char_indices() {
        let allowed = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-';
        let edge_hyphen = ch == '-' && (position == 0 || position == last);
        if !allowed || edge_hyphen {
            return Err(CodecError::InvalidCharacter { ch, position });
        }
    }
    Ok(())
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn frame(plain: &str) -> Result<[u8; BLOCK_LEN], CodecError> {
    let len = u8::try_from(plain.len()).map_err(|_| CodecError::SegmentTooLong {
        len: plain.len(),
        max: MAX_SEGMENT_LEN,
    })?;
    let mut block = [0u8; BLOCK_LEN];
    block[0] = len;
    block[1..=plain.len()].copy_from_slice(plain.as_bytes());
    Ok(block)
}

fn unframe(block: &[u8]) -> Option<&str> {
    let (&len, body) = block.split_first()?;
    let len = usize::from(len);
    if len == 0 || len > MAX_SEGMENT_LEN || body.len() != MAX_SEGMENT_LEN {
        return None;
    }
    let (name, padding) = body.split_at(len);
    if padding.iter().any(|&b| b != 0) {
        return None;
    }
    std::str::from_utf8(name).ok()
}

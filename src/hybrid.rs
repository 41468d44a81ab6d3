//! Hybrid encryption for payloads of any length.
//!
//! ElGamal's domain is bounded by the modulus, so anything beyond
//! roughly 240 bytes cannot pass through it directly. Instead the
//! payload goes through ChaCha20-Poly1305 under a fresh 256-bit key,
//! and only that key, interpreted as a big-endian integer, is
//! ElGamal-wrapped under the recipient's public key. The symmetric key
//! exists for the duration of one call and is never persisted.
//!
//! Decryption against a blob addressed to someone else is the normal
//! case, not an exception: the ElGamal unwrap "succeeds" with a wrong
//! key and produces a wrong symmetric key, and the AEAD tag then
//! refuses to authenticate. Every failure collapses into the same
//! `None` so the scan over stored blobs leaks nothing about why a blob
//! was rejected.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::GroupParams;
use crate::elgamal::{self, Ciphertext};
use crate::errors::Error;
use crate::serde_impl::{b64, b64_fixed};

/// Symmetric key length in bytes.
pub const KEY_LEN: usize = 32;
/// AEAD nonce length in bytes (the wire calls it `iv`).
pub const NONCE_LEN: usize = 12;

/// An AEAD-encrypted payload plus the ElGamal-wrapped symmetric key.
///
/// Serializes with decimal-string key-wrap components and base64 byte
/// fields, matching the bulletin board's JSON blobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridCiphertext {
    /// The symmetric key, ElGamal-encrypted under the recipient's
    /// public key.
    pub key_wrap: Ciphertext,
    /// AEAD nonce.
    #[serde(rename = "iv", with = "b64_fixed")]
    pub nonce: [u8; NONCE_LEN],
    /// AEAD ciphertext, authentication tag included.
    #[serde(with = "b64")]
    pub data: Vec<u8>,
}

/// Encrypts `plaintext` of any length for the holder of `public_key`.
///
/// # Errors
///
/// [`Error::SymmetricCipher`] if the AEAD refuses the input;
/// [`Error::MessageTooLarge`] if the key integer does not fit the group
/// (only possible with a modulus below 256 bits).
pub fn encrypt<R>(
    params: &GroupParams,
    public_key: &BigUint,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<HybridCiphertext, Error>
where
    R: RngCore + CryptoRng,
{
    let mut key_bytes = [0u8; KEY_LEN];
    rng.fill_bytes(&mut key_bytes);
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key_bytes));
    let data = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::SymmetricCipher)?;

    let key_int = BigUint::from_bytes_be(&key_bytes);
    let key_wrap = elgamal::encrypt(params, public_key, &key_int, rng)?;

    Ok(HybridCiphertext {
        key_wrap,
        nonce,
        data,
    })
}

/// Attempts to decrypt a hybrid blob with `private_key`.
///
/// Returns the plaintext only when the blob was addressed to this key;
/// in every other case (wrong recipient, tampered data, malformed
/// blob) the single uniform answer is `None`. Callers are expected to
/// run this against every stored blob and keep the one that opens.
pub fn decrypt(
    params: &GroupParams,
    private_key: &BigUint,
    ciphertext: &HybridCiphertext,
) -> Option<Vec<u8>> {
    let key_int = elgamal::decrypt(params, private_key, &ciphertext.key_wrap).ok()?;
    // A candidate key wider than 32 bytes cannot be ours; a narrower
    // one regains its leading zero bytes here.
    let key_bytes = codec::to_fixed_bytes(&key_int, KEY_LEN)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key_bytes));
    cipher
        .decrypt(Nonce::from_slice(&ciphertext.nonce), ciphertext.data.as_slice())
        .ok()
}

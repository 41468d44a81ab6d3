//! Structured payloads as padded integers bounded by the modulus.
//!
//! ElGamal works on integers, so a payload must become one. The payload
//! is serialized to JSON, prefixed with a fresh 16-byte random pad, and
//! the combined bytes are read big-endian as an integer. The pad is not
//! a key: it exists solely so an adversary cannot recognize a
//! low-entropy plaintext by its integer value (a dictionary attack on
//! short messages), and it is discarded after decoding.
//!
//! Leading zero bytes vanish when bytes become an integer, so the total
//! byte length travels alongside the value; decoding rebuilds exactly
//! that many bytes before stripping the pad.

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::GroupParams;
use crate::errors::Error;
use crate::serde_impl::decimal;

/// Length of the random pad prepended to every payload.
pub const PAD_LEN: usize = 16;

/// A payload converted to an integer below the modulus, plus the byte
/// length needed to reverse the conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedMessage {
    #[serde(with = "decimal")]
    pub value: BigUint,
    pub byte_len: usize,
}

/// Serializes `payload`, prepends a fresh random pad, and reads the
/// result as a big-endian integer.
///
/// # Errors
///
/// [`Error::PayloadTooLarge`] when the combined bytes encode to an
/// integer at or above the modulus (roughly 240 payload bytes for the
/// built-in group); [`Error::Serialization`] if the payload cannot be
/// serialized.
pub fn encode<T, R>(params: &GroupParams, payload: &T, rng: &mut R) -> Result<EncodedMessage, Error>
where
    T: Serialize,
    R: RngCore + CryptoRng,
{
    let body = serde_json::to_vec(payload).map_err(|e| Error::Serialization(e.to_string()))?;
    let mut buf = vec![0u8; PAD_LEN];
    rng.fill_bytes(&mut buf);
    buf.extend_from_slice(&body);
    let value = BigUint::from_bytes_be(&buf);
    if &value >= params.modulus() {
        return Err(Error::PayloadTooLarge { len: buf.len() });
    }
    Ok(EncodedMessage {
        value,
        byte_len: buf.len(),
    })
}

/// Reverses [`encode`]: rebuilds exactly `byte_len` bytes (restoring
/// any leading zeros), strips the pad, and parses the remainder.
///
/// Returns `None` on any failure (an impossible length, a payload that
/// is not valid JSON), so a caller can run it over many candidate
/// integers and keep only the ones that parse. The reason for a miss is
/// deliberately not reported.
pub fn decode<T>(value: &BigUint, byte_len: usize) -> Option<T>
where
    T: DeserializeOwned,
{
    let buf = to_fixed_bytes(value, byte_len)?;
    serde_json::from_slice(buf.get(PAD_LEN..)?).ok()
}

/// Big-endian bytes of `value`, left-padded with zeros to exactly
/// `len` bytes. `None` when the value does not fit.
pub(crate) fn to_fixed_bytes(value: &BigUint, len: usize) -> Option<Vec<u8>> {
    let raw = value.to_bytes_be();
    if raw.len() > len {
        return None;
    }
    let mut buf = vec![0u8; len - raw.len()];
    buf.extend_from_slice(&raw);
    Some(buf)
}

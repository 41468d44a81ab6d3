//! Serde adapters for the bulletin-board wire format.
//!
//! Every integer that crosses the boundary travels as a decimal string
//! (JSON numbers cannot carry 2048-bit values), and every byte field
//! travels as standard base64. The adapters plug into field-level
//! `#[serde(with = ...)]` attributes on the wire types; [`GroupParams`]
//! gets a hand-written impl because its wire form carries only `P` and
//! `g`; the subgroup order is recomputed, never trusted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::GroupParams;
use crate::errors::Error;

/// Decimal-string representation for `BigUint` fields.
pub mod decimal {
    use super::*;

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_decimal(&text).map_err(D::Error::custom)
    }
}

/// Standard-base64 representation for variable-length byte fields.
pub mod b64 {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(D::Error::custom)
    }
}

/// Standard-base64 representation for fixed-length byte fields.
pub mod b64_fixed {
    use super::*;

    pub fn serialize<S, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(text.as_bytes()).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("unexpected byte-field length"))
    }
}

impl Serialize for GroupParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("GroupParams", 2)?;
        state.serialize_field("P", &self.modulus().to_str_radix(10))?;
        state.serialize_field("g", &self.generator().to_str_radix(10))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GroupParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(rename = "P")]
            modulus: String,
            g: String,
        }

        let wire = Wire::deserialize(deserializer)?;
        let modulus = parse_decimal(&wire.modulus).map_err(D::Error::custom)?;
        let generator = parse_decimal(&wire.g).map_err(D::Error::custom)?;
        Ok(GroupParams::new_unchecked(modulus, generator))
    }
}

/// Renders a sorted key list the way the chair publishes it: decimal
/// strings, order preserved.
pub fn keys_to_wire(keys: &[BigUint]) -> Vec<String> {
    keys.iter().map(|key| key.to_str_radix(10)).collect()
}

/// Parses a published key list back into integers.
///
/// # Errors
///
/// [`Error::Serialization`] on the first string that is not a decimal
/// integer.
pub fn keys_from_wire<S: AsRef<str>>(strings: &[S]) -> Result<Vec<BigUint>, Error> {
    strings
        .iter()
        .map(|s| parse_decimal(s.as_ref()))
        .collect()
}

fn parse_decimal(text: &str) -> Result<BigUint, Error> {
    BigUint::parse_bytes(text.as_bytes(), 10)
        .ok_or_else(|| Error::Serialization(format!("not a decimal integer: {text:?}")))
}

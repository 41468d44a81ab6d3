//! Error types for the crate.
//!
//! Errors here cover caller bugs (oversized messages, non-invertible
//! operands) and protocol precondition violations (too few participants,
//! duplicate keys). Expected negative outcomes (a hybrid blob that is
//! not addressed to the caller, a public key absent from the sorted
//! cycle) are deliberately *not* errors; those operations return
//! `Option` so callers can scan many candidates without special-casing
//! each miss.
//!
//! The errors are implemented with `thiserror` so they are easy to
//! convert and debug in higher-level code.

use thiserror::Error;

/// Errors returned by the protocol and its arithmetic primitives.
#[derive(Debug, Error)]
pub enum Error {
    /// The plaintext integer is not below the group modulus.
    #[error("message of {bits} bits does not fit below the group modulus")]
    MessageTooLarge { bits: u64 },
    /// The padded, serialized payload encodes to an integer at or above
    /// the group modulus.
    #[error("encoded payload of {len} bytes does not fit below the group modulus")]
    PayloadTooLarge { len: usize },
    /// `gcd(a, modulus) != 1`, so no modular inverse exists.
    #[error("no modular inverse: operand shares a factor with the modulus")]
    InverseNotFound,
    /// The bounded retry loop never produced a subgroup key.
    #[error("key generation found no quadratic-residue key after {attempts} attempts")]
    KeyGenerationExhausted { attempts: usize },
    /// Caller-supplied group parameters failed validation.
    #[error("invalid group parameters: {0}")]
    InvalidParams(String),
    /// A payload could not be serialized, or a wire field could not be
    /// parsed.
    #[error("serialization failure: {0}")]
    Serialization(String),
    /// The authenticated symmetric cipher refused to encrypt.
    #[error("authenticated encryption failed")]
    SymmetricCipher,
    /// Fewer registrations than the protocol minimum.
    #[error("too few participants: need at least {required}, got {provided}")]
    TooFewParticipants { required: usize, provided: usize },
    /// Two registrations decrypted to the same public key, which would
    /// break the one-to-one assignment guarantee.
    #[error("duplicate public key in the registration set")]
    DuplicateKey,
}

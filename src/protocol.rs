//! Chair and participant flows over the bulletin board.
//!
//! The storage service is an external collaborator that only shuttles
//! opaque blobs; everything cryptographic happens here, client-side, as
//! pure functions. The room moves through three phases:
//!
//! 1. **Registration**: each participant generates a [`Keypair`] and
//!    posts their public key encrypted under the chair's session public
//!    key ([`register`]).
//! 2. **Sort**: the chair fetches every registration, decrypts with the
//!    session private key, sorts the keys ascending, and publishes the
//!    list ([`sort_registrations`]). This is the only step where one
//!    party sees all plaintext keys, but keys rather than identities, so an
//!    honest-but-curious chair learns who-gives-to-whom only as edges
//!    between anonymous keys.
//! 3. **Address exchange**: each participant reads their neighbors off
//!    the published list ([`my_assignment`]), seals their own shipping
//!    address for their santa ([`seal_address`]), and scans all posted
//!    blobs for the one addressed to them ([`open_addressed_to_me`]).
//!
//! The chair cannot be cryptographically prevented from substituting or
//! omitting keys during the sort; the design accepts that limitation
//! (the sorted list is public, so participants can at least detect a
//! missing own key).
//!
//! # Example
//!
//! ```
//! use cryptosanta::{protocol, GroupParams, Keypair};
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), cryptosanta::Error> {
//! let params = GroupParams::modp_2048();
//! let session = Keypair::generate(&params, &mut OsRng)?;
//!
//! // Three participants register.
//! let people: Vec<Keypair> = (0..3)
//!     .map(|_| Keypair::generate(&params, &mut OsRng))
//!     .collect::<Result<_, _>>()?;
//! let blobs: Vec<_> = people
//!     .iter()
//!     .map(|kp| protocol::register(&params, &session.public_key, &kp.public_key, &mut OsRng))
//!     .collect::<Result<_, _>>()?;
//!
//! // The chair sorts; everyone learns their neighbors.
//! let sorted = protocol::sort_registrations(&params, &session.private_key, &blobs)?;
//! let me = protocol::my_assignment(&sorted, &people[0].public_key).expect("registered");
//! assert_ne!(me.recipient, people[0].public_key);
//! # Ok(())
//! # }
//! ```

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{instrument, trace};

use crate::config::GroupParams;
use crate::cycle::{self, CycleAssignment};
use crate::elgamal::{self, Ciphertext};
use crate::errors::Error;
use crate::hybrid::{self, HybridCiphertext};
use crate::keys::Keypair;

/// Fewer participants than this makes the cycle degenerate (self- or
/// mutual-pair assignments), so the chair refuses to sort.
pub const MIN_PARTICIPANTS: usize = 3;

/// The structured payload of the address-exchange phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftAddress {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Produces a registration blob: the participant's public key encrypted
/// under the chair's session public key.
///
/// # Errors
///
/// [`Error::MessageTooLarge`] if the public key is not below the
/// modulus, which indicates mismatched group parameters.
#[instrument(level = "info", skip_all)]
pub fn register<R>(
    params: &GroupParams,
    session_public_key: &BigUint,
    own_public_key: &BigUint,
    rng: &mut R,
) -> Result<Ciphertext, Error>
where
    R: RngCore + CryptoRng,
{
    elgamal::encrypt(params, session_public_key, own_public_key, rng)
}

/// Chair only: decrypts every registration and produces the sorted key
/// cycle.
///
/// # Errors
///
/// [`Error::TooFewParticipants`] below [`MIN_PARTICIPANTS`];
/// [`Error::DuplicateKey`] when two registrations decrypt to the same
/// key (a duplicate would give one key two santas and break the
/// one-to-one guarantee, so it is rejected here, the earliest point
/// where the chair can see plaintext keys).
#[instrument(level = "info", skip_all, fields(registrations = blobs.len()))]
pub fn sort_registrations(
    params: &GroupParams,
    session_private_key: &BigUint,
    blobs: &[Ciphertext],
) -> Result<Vec<BigUint>, Error> {
    if blobs.len() < MIN_PARTICIPANTS {
        return Err(Error::TooFewParticipants {
            required: MIN_PARTICIPANTS,
            provided: blobs.len(),
        });
    }
    let mut keys = blobs
        .iter()
        .map(|blob| elgamal::decrypt(params, session_private_key, blob))
        .collect::<Result<Vec<_>, _>>()?;
    keys.sort_unstable();
    if keys.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(Error::DuplicateKey);
    }
    trace!(participants = keys.len(), "sorted key cycle fixed");
    Ok(keys)
}

/// Reads the caller's neighbors off the published sorted list.
///
/// `None` means the key is not in the cycle, typically a registration
/// that arrived after the chair sorted.
pub fn my_assignment(sorted_keys: &[BigUint], own_public_key: &BigUint) -> Option<CycleAssignment> {
    cycle::assignment(sorted_keys, own_public_key)
}

/// Seals the caller's shipping address for their santa.
///
/// The blob is posted publicly; only the santa's private key opens it.
///
/// # Errors
///
/// Propagates hybrid-encryption errors; serialization of the address
/// itself surfaces as [`Error::Serialization`].
#[instrument(level = "info", skip_all)]
pub fn seal_address<R>(
    params: &GroupParams,
    santa_public_key: &BigUint,
    address: &GiftAddress,
    rng: &mut R,
) -> Result<HybridCiphertext, Error>
where
    R: RngCore + CryptoRng,
{
    let body = serde_json::to_vec(address).map_err(|e| Error::Serialization(e.to_string()))?;
    hybrid::encrypt(params, santa_public_key, &body, rng)
}

/// Scans every posted blob for the one addressed to the caller.
///
/// Attempts run in parallel; each is independent and at most one can
/// authenticate, so ordering is irrelevant. A blob that fails for any
/// reason is skipped without comment, which is what keeps key
/// ownership unobservable.
#[instrument(level = "info", skip_all, fields(blobs = blobs.len()))]
pub fn open_addressed_to_me(
    params: &GroupParams,
    keypair: &Keypair,
    blobs: &[HybridCiphertext],
) -> Option<GiftAddress> {
    blobs.par_iter().find_map_any(|blob| {
        let body = hybrid::decrypt(params, &keypair.private_key, blob)?;
        serde_json::from_slice(&body).ok()
    })
}

/// Hex-encoded SHA-256 of the chair secret, the token the storage
/// service compares against on privileged writes. Computing the digest
/// is client-side; checking it is not this crate's job.
pub fn chair_secret_hash(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

//! # cryptosanta: secret-santa assignment without a trusted matchmaker
//!
//! This crate implements the cryptographic core of a gift-exchange
//! protocol in which gift-giving pairs are a deterministic function of
//! the participants' public keys, discoverable by no single party. It
//! runs over the quadratic-residue subgroup of a fixed 2048-bit
//! safe-prime multiplicative group.
//!
//! ## Architecture
//!
//! - **[`config`]**: The shared group: safe-prime modulus, subgroup
//!   generator, subgroup order. Passed explicitly everywhere so
//!   independent rooms can use different groups.
//! - **[`arith`]**: Modular exponentiation, inversion, uniform range
//!   sampling, and a Miller-Rabin test underneath everything else.
//! - **[`keys`]**: Keypair generation filtered to quadratic residues,
//!   so no key carries a sortable side-channel.
//! - **[`elgamal`]**: The raw probabilistic encrypt/decrypt primitives
//!   on integers below the modulus.
//! - **[`codec`]**: Structured payloads as pad-prefixed integers, safe
//!   against dictionary attacks on short messages.
//! - **[`hybrid`]**: ChaCha20-Poly1305 payloads with ElGamal-wrapped
//!   keys, for plaintexts of any length.
//! - **[`cycle`]**: The sorted-key cycle: santa on one side, recipient
//!   on the other.
//! - **[`protocol`]**: Chair and participant flows stitched from the
//!   above, speaking the bulletin board's wire format.
//! - **[`serde_impl`]**: Decimal-string and base64 serde adapters for
//!   that wire format.
//!
//! ## Protocol Workflow
//!
//! 1. **Registration**: every participant generates a [`Keypair`] and
//!    posts their public key encrypted under the chair's session key
//!    ([`protocol::register`]).
//! 2. **Sort**: the chair decrypts all registrations and publishes the
//!    keys in ascending numeric order
//!    ([`protocol::sort_registrations`]).
//! 3. **Assignment**: each participant locates their own key in the
//!    published list; the predecessor gives to them, they give to the
//!    successor ([`protocol::my_assignment`]).
//! 4. **Address exchange**: each participant seals their shipping
//!    address for their santa ([`protocol::seal_address`]) and scans
//!    all posted blobs for the one that opens with their key
//!    ([`protocol::open_addressed_to_me`]).
//!
//! ## Quick Example
//!
//! ```
//! use cryptosanta::{elgamal, GroupParams, Keypair};
//! use num_bigint::BigUint;
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), cryptosanta::Error> {
//! let params = GroupParams::modp_2048();
//! let keypair = Keypair::generate(&params, &mut OsRng)?;
//!
//! let message = BigUint::from(1225u32);
//! let ciphertext = elgamal::encrypt(&params, &keypair.public_key, &message, &mut OsRng)?;
//! let decrypted = elgamal::decrypt(&params, &keypair.private_key, &ciphertext)?;
//! assert_eq!(decrypted, message);
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Considerations
//!
//! - **Honest-but-curious chair**: the chair sees every plaintext
//!   public key during the sort, but keys carry no identities; nothing
//!   here proves the chair sorted honestly or did not fabricate keys.
//! - **Scan-based delivery**: a participant finding their address blob
//!   tries every blob and keeps the one that authenticates. A miss and
//!   a hit are indistinguishable in control flow until the AEAD tag
//!   check resolves, so the scan reveals nothing about key ownership.
//! - **No traffic-analysis protection**: who posts and fetches which
//!   blob when is visible to the storage layer by design.

pub mod arith;
pub mod codec;
pub mod config;
pub mod cycle;
pub mod elgamal;
pub mod errors;
pub mod hybrid;
pub mod keys;
pub mod protocol;
pub mod serde_impl;

pub use codec::EncodedMessage;
pub use config::GroupParams;
pub use cycle::CycleAssignment;
pub use elgamal::Ciphertext;
pub use errors::Error;
pub use hybrid::HybridCiphertext;
pub use keys::Keypair;
pub use protocol::GiftAddress;

//! Keypair generation constrained to the quadratic-residue subgroup.
//!
//! Every published public key must be a quadratic residue. If some keys
//! were residues and others were not, an observer could partition
//! participants by a property independent of the sort and weaken the
//! cycle's unlinkability, so candidates failing Euler's criterion are
//! discarded and regenerated. With the built-in generator (itself a
//! residue) every candidate passes on the first try; the filter earns
//! its keep for caller-supplied groups whose generator has full order,
//! where residues are exactly half the candidates.

use num_bigint::BigUint;
use num_traits::One;
use rand_core::{CryptoRng, RngCore};

use crate::arith;
use crate::config::GroupParams;
use crate::errors::Error;

/// Retry bound for the residue filter. With residues at worst half the
/// candidates, 64 misses in a row indicates broken parameters, not bad
/// luck.
const MAX_KEYGEN_ATTEMPTS: usize = 64;

/// A participant's ElGamal keypair.
///
/// The private exponent is owned exclusively by the participant who
/// generated it and never crosses the wire in plaintext; only the
/// public key is ever serialized (inside an encrypted registration).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypair {
    /// Secret exponent `x` in `[2, q - 1]`.
    pub private_key: BigUint,
    /// `g^x mod P`, guaranteed a quadratic residue.
    pub public_key: BigUint,
}

impl Keypair {
    /// Generates a fresh keypair whose public key passes Euler's
    /// criterion.
    ///
    /// # Errors
    ///
    /// [`Error::KeyGenerationExhausted`] if the bounded retry loop never
    /// produces a residue, which only happens with unsound parameters.
    pub fn generate<R>(params: &GroupParams, rng: &mut R) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
    {
        let two = BigUint::from(2u32);
        for _ in 0..MAX_KEYGEN_ATTEMPTS {
            let private_key = arith::random_in_range(rng, &two, params.order());
            let public_key = arith::mod_pow(
                &params.generator().clone().into(),
                &private_key,
                params.modulus(),
            );
            if is_quadratic_residue(params, &public_key) {
                return Ok(Keypair {
                    private_key,
                    public_key,
                });
            }
        }
        Err(Error::KeyGenerationExhausted {
            attempts: MAX_KEYGEN_ATTEMPTS,
        })
    }
}

/// Euler's criterion: `value^q ≡ 1 (mod P)` exactly when `value` is a
/// quadratic residue.
pub fn is_quadratic_residue(params: &GroupParams, value: &BigUint) -> bool {
    arith::mod_pow(&value.clone().into(), params.order(), params.modulus()).is_one()
}

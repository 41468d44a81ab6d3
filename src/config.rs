//! Group parameters shared by every participant of a room.
//!
//! The protocol runs in the quadratic-residue subgroup of `Z_P*` for a
//! safe prime `P`: the subgroup has prime order `q = (P-1)/2`, so every
//! non-identity element generates it and discrete-log assumptions hold.
//! Parameters are plain values passed to every operation, never hidden
//! process-wide state, so independent rooms with different groups can
//! coexist in one process.
//!
//! [`GroupParams::modp_2048`] returns the built-in group every deployment
//! of the original protocol uses: the 2048-bit MODP safe prime from
//! RFC 3526 §3 with generator 2. For that prime `P ≡ 7 (mod 8)`, which
//! makes 2 a quadratic residue and therefore a generator of the order-q
//! subgroup.
//!
//! # Example
//!
//! ```
//! use cryptosanta::GroupParams;
//!
//! let params = GroupParams::modp_2048();
//! assert_eq!(params.modulus().bits(), 2048);
//! ```

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::{CryptoRng, RngCore};

use crate::arith;
use crate::errors::Error;

/// Miller-Rabin rounds used when validating caller-supplied parameters.
const PRIMALITY_ROUNDS: usize = 20;

/// The 2048-bit MODP group modulus from RFC 3526 §3, hexadecimal.
const MODP_2048_HEX: &[u8] = b"\
FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74\
020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437\
4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05\
98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB\
9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718\
3995497CEA956AE515D2261898FA051015728E5A8AACAA68FFFFFFFFFFFFFFFF";

/// The multiplicative group a room agrees on: a safe-prime modulus, a
/// generator of its quadratic-residue subgroup, and the subgroup order.
///
/// Fields are private so the `order = (modulus - 1) / 2` relationship
/// cannot drift; accessors hand out borrows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupParams {
    modulus: BigUint,
    generator: BigUint,
    order: BigUint,
}

impl GroupParams {
    /// The built-in 2048-bit group (RFC 3526 §3, generator 2).
    ///
    /// The constant is fixed and well-studied, so no primality test
    /// runs here.
    pub fn modp_2048() -> Self {
        let modulus = BigUint::parse_bytes(MODP_2048_HEX, 16)
            .expect("built-in modulus constant parses");
        let order = (&modulus - 1u32) >> 1;
        GroupParams {
            modulus,
            generator: BigUint::from(2u32),
            order,
        }
    }

    /// Builds parameters from a caller-supplied modulus and generator,
    /// validating both.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParams`] when the modulus is not a safe prime or
    /// the generator does not generate the order-q subgroup.
    pub fn new<R>(modulus: BigUint, generator: BigUint, rng: &mut R) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
    {
        let params = Self::new_unchecked(modulus, generator);
        params.validate(rng)?;
        Ok(params)
    }

    /// Builds parameters without validation. Used when deserializing
    /// from a source that will be validated separately, or not at all
    /// (the room creator is trusted to publish sound parameters).
    pub fn new_unchecked(modulus: BigUint, generator: BigUint) -> Self {
        let order = (&modulus - 1u32) >> 1;
        GroupParams {
            modulus,
            generator,
            order,
        }
    }

    /// Checks that the modulus is a safe prime and the generator
    /// generates the quadratic-residue subgroup.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParams`] naming the first failed check.
    pub fn validate<R>(&self, rng: &mut R) -> Result<(), Error>
    where
        R: RngCore + CryptoRng,
    {
        if self.modulus < BigUint::from(7u32) || self.modulus.is_even() {
            return Err(Error::InvalidParams(
                "modulus must be an odd prime of at least 3 bits".into(),
            ));
        }
        if !arith::is_probable_prime(&self.modulus, PRIMALITY_ROUNDS, rng) {
            return Err(Error::InvalidParams("modulus is not prime".into()));
        }
        if !arith::is_probable_prime(&self.order, PRIMALITY_ROUNDS, rng) {
            return Err(Error::InvalidParams(
                "subgroup order (modulus - 1) / 2 is not prime".into(),
            ));
        }
        if self.generator <= BigUint::one() || self.generator >= self.modulus {
            return Err(Error::InvalidParams(
                "generator must lie in [2, modulus)".into(),
            ));
        }
        // g generates the order-q subgroup iff g^q = 1; q prime rules
        // out smaller orders, and g > 1 rules out the identity.
        let in_subgroup =
            arith::mod_pow(&self.generator.clone().into(), &self.order, &self.modulus);
        if !in_subgroup.is_one() {
            return Err(Error::InvalidParams(
                "generator does not generate the quadratic-residue subgroup".into(),
            ));
        }
        Ok(())
    }

    /// The prime modulus `P`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The subgroup generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// The subgroup order `q = (P - 1) / 2`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn modp_2048_shape() {
        let params = GroupParams::modp_2048();
        assert_eq!(params.modulus().bits(), 2048);
        assert_eq!(params.generator(), &BigUint::from(2u32));
        assert_eq!(
            (params.order() << 1) + 1u32,
            params.modulus().clone(),
            "order must be (P - 1) / 2"
        );
        // Euler's criterion: 2 is a quadratic residue for this prime,
        // so it generates the order-q subgroup.
        let euler = arith::mod_pow(
            &params.generator().clone().into(),
            params.order(),
            params.modulus(),
        );
        assert!(euler.is_one());
    }

    #[test]
    fn accepts_small_safe_prime() {
        // 23 = 2 * 11 + 1, both prime; 2^11 ≡ 1 (mod 23)
        let mut rng = StdRng::from_entropy();
        let params = GroupParams::new(BigUint::from(23u32), BigUint::from(2u32), &mut rng)
            .expect("valid group");
        assert_eq!(params.order(), &BigUint::from(11u32));
    }

    #[test]
    fn rejects_composite_modulus() {
        let mut rng = StdRng::from_entropy();
        let err = GroupParams::new(BigUint::from(21u32), BigUint::from(2u32), &mut rng);
        assert!(matches!(err, Err(Error::InvalidParams(_))));
    }

    #[test]
    fn rejects_non_safe_prime() {
        // 29 is prime but (29 - 1) / 2 = 14 is not
        let mut rng = StdRng::from_entropy();
        let err = GroupParams::new(BigUint::from(29u32), BigUint::from(2u32), &mut rng);
        assert!(matches!(err, Err(Error::InvalidParams(_))));
    }

    #[test]
    fn rejects_non_residue_generator() {
        // 5 is a primitive root mod 23: order 22, not 11
        let mut rng = StdRng::from_entropy();
        let err = GroupParams::new(BigUint::from(23u32), BigUint::from(5u32), &mut rng);
        assert!(matches!(err, Err(Error::InvalidParams(_))));
    }

    #[test]
    fn rejects_identity_and_out_of_range_generator() {
        let mut rng = StdRng::from_entropy();
        for g in [0u32, 1, 23, 24] {
            let err = GroupParams::new(BigUint::from(23u32), BigUint::from(g), &mut rng);
            assert!(matches!(err, Err(Error::InvalidParams(_))), "g = {g}");
        }
    }
}

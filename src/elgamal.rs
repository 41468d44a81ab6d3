//! ElGamal encryption over the integer domain `[0, P)`.
//!
//! These are the raw asymmetric primitives: registration blobs encrypt
//! a public key directly, and the hybrid cipher wraps a symmetric key
//! through them. Encryption is probabilistic: a fresh ephemeral
//! exponent is drawn per call, so encrypting the same message twice
//! under the same key yields unrelated ciphertexts. That is a required
//! security property, not an optimization concern.
//!
//! Decryption has no failure mode for a wrong key: it succeeds
//! arithmetically and yields a well-formed but meaningless integer.
//! The protocol leans on this: "try every stored blob, only yours
//! decrypts meaningfully" only works if a mismatched decryption is
//! indistinguishable from a matched one at this layer.

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::config::GroupParams;
use crate::errors::Error;
use crate::serde_impl::decimal;

/// One ElGamal-encrypted integer, `(c1, c2)` both in `[0, P)`.
///
/// Serializes with decimal-string components, the JSON-safe form the
/// bulletin board stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    #[serde(with = "decimal")]
    pub c1: BigUint,
    #[serde(with = "decimal")]
    pub c2: BigUint,
}

/// Encrypts `message` under `public_key`.
///
/// # Errors
///
/// [`Error::MessageTooLarge`] when `message >= P`.
pub fn encrypt<R>(
    params: &GroupParams,
    public_key: &BigUint,
    message: &BigUint,
    rng: &mut R,
) -> Result<Ciphertext, Error>
where
    R: RngCore + CryptoRng,
{
    if message >= params.modulus() {
        return Err(Error::MessageTooLarge {
            bits: message.bits(),
        });
    }
    let two = BigUint::from(2u32);
    let k = arith::random_in_range(rng, &two, params.order());
    let c1 = arith::mod_pow(&params.generator().clone().into(), &k, params.modulus());
    let shared = arith::mod_pow(&public_key.clone().into(), &k, params.modulus());
    let c2 = (message * shared) % params.modulus();
    Ok(Ciphertext { c1, c2 })
}

/// Decrypts a ciphertext with the matching private key.
///
/// With a non-matching key this still returns `Ok`, just not the
/// original message. The only error is a degenerate blob whose shared
/// secret has no inverse (`c1 = 0`), which no honest encryption
/// produces.
pub fn decrypt(
    params: &GroupParams,
    private_key: &BigUint,
    ciphertext: &Ciphertext,
) -> Result<BigUint, Error> {
    let shared = arith::mod_pow(&ciphertext.c1.clone().into(), private_key, params.modulus());
    let inverse = arith::mod_inv(&shared, params.modulus())?;
    Ok((&ciphertext.c2 * inverse) % params.modulus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_params() -> GroupParams {
        let mut rng = StdRng::from_entropy();
        GroupParams::new(BigUint::from(23u32), BigUint::from(2u32), &mut rng).expect("valid group")
    }

    #[test]
    fn roundtrip_small_group() {
        let params = small_params();
        let mut rng = StdRng::from_entropy();
        let keypair = Keypair::generate(&params, &mut rng).expect("keygen");
        for m in 1u32..23 {
            let message = BigUint::from(m);
            let ct = encrypt(&params, &keypair.public_key, &message, &mut rng).expect("encrypt");
            let back = decrypt(&params, &keypair.private_key, &ct).expect("decrypt");
            assert_eq!(back, message);
        }
    }

    #[test]
    fn roundtrip_modp_2048() {
        let params = GroupParams::modp_2048();
        let mut rng = StdRng::from_entropy();
        let keypair = Keypair::generate(&params, &mut rng).expect("keygen");
        let message = arith::random_in_range(
            &mut rng,
            &BigUint::from(1u32),
            params.modulus(),
        );
        let ct = encrypt(&params, &keypair.public_key, &message, &mut rng).expect("encrypt");
        let back = decrypt(&params, &keypair.private_key, &ct).expect("decrypt");
        assert_eq!(back, message);
    }

    #[test]
    fn encryption_is_probabilistic() {
        let params = GroupParams::modp_2048();
        let mut rng = StdRng::from_entropy();
        let keypair = Keypair::generate(&params, &mut rng).expect("keygen");
        let message = BigUint::from(42u32);
        let first = encrypt(&params, &keypair.public_key, &message, &mut rng).expect("encrypt");
        let second = encrypt(&params, &keypair.public_key, &message, &mut rng).expect("encrypt");
        assert_ne!(first, second, "fresh ephemeral k per call");
        let a = decrypt(&params, &keypair.private_key, &first).expect("decrypt");
        let b = decrypt(&params, &keypair.private_key, &second).expect("decrypt");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_message_at_or_above_modulus() {
        let params = small_params();
        let mut rng = StdRng::from_entropy();
        let keypair = Keypair::generate(&params, &mut rng).expect("keygen");
        for m in [23u32, 24, 1000] {
            let err = encrypt(&params, &keypair.public_key, &BigUint::from(m), &mut rng);
            assert!(matches!(err, Err(Error::MessageTooLarge { .. })), "{m}");
        }
    }

    #[test]
    fn wrong_key_decrypts_to_garbage_not_error() {
        let params = GroupParams::modp_2048();
        let mut rng = StdRng::from_entropy();
        let alice = Keypair::generate(&params, &mut rng).expect("keygen");
        let eve = Keypair::generate(&params, &mut rng).expect("keygen");
        let message = BigUint::from(7u32);
        let ct = encrypt(&params, &alice.public_key, &message, &mut rng).expect("encrypt");
        let got = decrypt(&params, &eve.private_key, &ct).expect("wrong key still decrypts");
        assert_ne!(got, message);
    }
}

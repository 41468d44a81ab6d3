//! Giver/receiver derivation from the sorted key cycle.
//!
//! Once the chair publishes the numerically sorted list of public keys,
//! the assignment is fixed: each key's santa is its predecessor in the
//! list and its recipient is its successor, wrapping at the ends. No
//! randomness enters: any observer holding the list can
//! recompute every edge, but only the holder of a private key can prove
//! which public key is theirs, so no edge can be attributed to a
//! person.

use num_bigint::BigUint;

/// The two neighbors of one key in the cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleAssignment {
    /// The public key of whoever gives to the owner of the looked-up
    /// key.
    pub santa: BigUint,
    /// The public key the owner of the looked-up key gives to.
    pub recipient: BigUint,
}

/// Locates `own_key` in the sorted list and returns its neighbors.
///
/// Requires an exact match; `None` means the key is not in the cycle
/// (for instance, a registration that arrived after the sort was
/// taken). The function is deterministic and total for any non-empty
/// list; with a single key it degenerates to a self-assignment, which
/// the protocol layer rules out by requiring a minimum of three
/// participants before a sort is accepted.
pub fn assignment(sorted_keys: &[BigUint], own_key: &BigUint) -> Option<CycleAssignment> {
    let n = sorted_keys.len();
    let i = sorted_keys.iter().position(|key| key == own_key)?;
    Some(CycleAssignment {
        santa: sorted_keys[(i + n - 1) % n].clone(),
        recipient: sorted_keys[(i + 1) % n].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn interior_and_wrapping_neighbors() {
        let sorted = keys(&[10, 20, 30, 40, 50]);
        let mid = assignment(&sorted, &BigUint::from(30u64)).expect("present");
        assert_eq!(mid.santa, BigUint::from(20u64));
        assert_eq!(mid.recipient, BigUint::from(40u64));

        let first = assignment(&sorted, &BigUint::from(10u64)).expect("present");
        assert_eq!(first.santa, BigUint::from(50u64));
        assert_eq!(first.recipient, BigUint::from(20u64));

        let last = assignment(&sorted, &BigUint::from(50u64)).expect("present");
        assert_eq!(last.santa, BigUint::from(40u64));
        assert_eq!(last.recipient, BigUint::from(10u64));
    }

    #[test]
    fn absent_key_is_not_found() {
        let sorted = keys(&[10, 20, 30]);
        assert_eq!(assignment(&sorted, &BigUint::from(25u64)), None);
        assert_eq!(assignment(&[], &BigUint::from(10u64)), None);
    }

    #[test]
    fn single_key_self_assigns() {
        let sorted = keys(&[77]);
        let only = assignment(&sorted, &BigUint::from(77u64)).expect("present");
        assert_eq!(only.santa, BigUint::from(77u64));
        assert_eq!(only.recipient, BigUint::from(77u64));
    }

    #[test]
    fn every_key_appears_once_as_santa_and_recipient() {
        let sorted = keys(&[3, 11, 17, 29, 31, 47]);
        let santas: Vec<_> = sorted
            .iter()
            .map(|k| assignment(&sorted, k).expect("present").santa)
            .collect();
        let recipients: Vec<_> = sorted
            .iter()
            .map(|k| assignment(&sorted, k).expect("present").recipient)
            .collect();
        for key in &sorted {
            assert_eq!(santas.iter().filter(|s| *s == key).count(), 1);
            assert_eq!(recipients.iter().filter(|r| *r == key).count(), 1);
        }
    }
}

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

/// Probabilistic primality oracle used to size the prime field.
///
/// A positive answer means "probably prime" at whatever confidence the
/// implementation is configured for, which is sufficient for
/// demonstration-scale domain parameters.
pub trait PrimalityTest {
    fn is_probable_prime<R: RngCore + CryptoRng>(&self, candidate: &BigUint, rng: &mut R)
        -> bool;
}

const SMALL_PRIMES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin with a caller-fixed number of witness rounds.
///
/// An odd composite survives a single round with probability at most 1/4,
/// so the error bound is `4^-rounds`.
#[derive(Clone, Copy, Debug)]
pub struct MillerRabin {
    rounds: usize,
}

impl MillerRabin {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self { rounds: 20 }
    }
}

impl PrimalityTest for MillerRabin {
    fn is_probable_prime<R: RngCore + CryptoRng>(
        &self,
        candidate: &BigUint,
        rng: &mut R,
    ) -> bool {
        let two = BigUint::from(2u32);
        if candidate < &two {
            return false;
        }
        for small in SMALL_PRIMES {
            let small = BigUint::from(small);
            if candidate == &small {
                return true;
            }
            if (candidate % small).is_zero() {
                return false;
            }
        }

        // candidate - 1 = 2^s * d with d odd
        let n_minus_one = candidate - BigUint::one();
        // NOTE unwrap is fine because the candidate is odd and > 2 here,
        // so candidate - 1 is even and nonzero
        let s = n_minus_one.trailing_zeros().unwrap();
        let d = &n_minus_one >> s;

        'witness: for _ in 0..self.rounds {
            let base = rng.gen_biguint_range(&two, &n_minus_one);
            let mut x = base.modpow(&d, candidate);
            if x.is_one() || x == n_minus_one {
                continue;
            }
            for _ in 1..s {
                x = x.modpow(&two, candidate);
                if x == n_minus_one {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check(candidate: u32) -> bool {
        let mut rng = StdRng::seed_from_u64(42);
        MillerRabin::default().is_probable_prime(&BigUint::from(candidate), &mut rng)
    }

    #[test]
    fn accepts_known_primes() {
        for prime in [2u32, 3, 5, 17, 31, 127, 257, 521, 7919, 65537] {
            assert!(check(prime), "{prime} should test prime");
        }
    }

    #[test]
    fn rejects_composites() {
        // 561 and 41041 are Carmichael numbers, the classic Fermat-test
        // traps; 1681 = 41^2 and 1763 = 41 * 43 have no factor below the
        // trial-division cutoff, so they exercise the witness rounds
        for composite in [0u32, 1, 4, 100, 561, 1681, 1763, 7917, 41041] {
            assert!(!check(composite), "{composite} should test composite");
        }
    }

    #[test]
    fn rejects_even_candidates() {
        for even in [128u32, 1024, 65536] {
            assert!(!check(even));
        }
    }
}

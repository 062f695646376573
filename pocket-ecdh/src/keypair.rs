use pocket_curve::{ArithmeticError, DomainParameters, Point};

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

#[derive(Error, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum KeypairError {
    #[error("public point does not match the private scalar")]
    InvalidKeypair,
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// One party's private scalar and the public point derived from it.
///
/// The private scalar never leaves the struct; the public point is what gets
/// handed to the peer.
#[derive(Clone, Debug)]
pub struct Keypair {
    private: BigUint,
    public: Point,
}

impl Keypair {
    /// Derives the public point `private * G` over the given domain.
    pub fn new(private: BigUint, params: &DomainParameters) -> Result<Self, KeypairError> {
        let public = params.curve().scalar_mul(params.generator(), &private)?;
        Ok(Self { private, public })
    }

    /// Like [`Keypair::new`], but for a transported keypair: fails unless
    /// the claimed public point matches the private scalar.
    pub fn new_checked(
        private: BigUint,
        public: Point,
        params: &DomainParameters,
    ) -> Result<Self, KeypairError> {
        let expected = params.curve().scalar_mul(params.generator(), &private)?;
        if public != expected {
            return Err(KeypairError::InvalidKeypair);
        }
        Ok(Self { private, public })
    }

    /// Fresh keypair with a private scalar drawn uniformly from
    /// `[0, 2^(bit_width - 1)]`.
    ///
    /// Weak scalars are not rejected; in particular a zero draw produces an
    /// identity public point, which the cipher layer refuses to work with.
    pub fn random<R: RngCore + CryptoRng>(
        rng: &mut R,
        bit_width: u64,
        params: &DomainParameters,
    ) -> Result<Self, KeypairError> {
        let bound = (BigUint::one() << bit_width.saturating_sub(1)) + BigUint::one();
        let private = rng.gen_biguint_below(&bound);
        Self::new(private, params)
    }

    pub fn pubkey(&self) -> &Point {
        &self.public
    }

    pub fn privkey(&self) -> &BigUint {
        &self.private
    }

    /// The shared point: own private scalar times the peer's public point.
    ///
    /// Both parties arrive at the same point because scalar multiplication
    /// commutes: `a * (b * G) = b * (a * G)`.
    pub fn shared_secret(
        &self,
        peer_public: &Point,
        params: &DomainParameters,
    ) -> Result<Point, ArithmeticError> {
        params.curve().scalar_mul(peer_public, &self.private)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pocket_curve::Curve;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uint(n: u32) -> BigUint {
        BigUint::from(n)
    }

    // y^2 = x^3 + x + 1 over F_17 with the order-9 generator (13, 1)
    fn params_17() -> DomainParameters {
        let curve = Curve::new(uint(1), uint(1), uint(17)).unwrap();
        DomainParameters::new(curve, Point::new(uint(13), uint(1))).unwrap()
    }

    #[test]
    fn public_point_is_the_generator_multiple() {
        let params = params_17();
        let keypair = Keypair::new(uint(2), &params).unwrap();
        // 2 * (13, 1) = 4 * (0, 1) = (9, 12)
        assert_eq!(keypair.pubkey(), &Point::new(uint(9), uint(12)));
        assert_eq!(keypair.privkey(), &uint(2));
    }

    #[test]
    fn checked_constructor_rejects_a_mismatched_point() {
        let params = params_17();
        let public = Point::new(uint(9), uint(12));
        assert!(Keypair::new_checked(uint(2), public.clone(), &params).is_ok());
        assert!(matches!(
            Keypair::new_checked(uint(3), public, &params),
            Err(KeypairError::InvalidKeypair)
        ));
    }

    #[test]
    fn zero_scalar_derives_the_identity_public_point() {
        let params = params_17();
        let keypair = Keypair::new(uint(0), &params).unwrap();
        assert!(keypair.pubkey().is_infinity());
    }

    #[test]
    fn both_parties_compute_the_same_shared_point() {
        let params = params_17();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let alice = Keypair::random(&mut rng, 6, &params).unwrap();
            let bob = Keypair::random(&mut rng, 6, &params).unwrap();
            let from_alice = alice.shared_secret(bob.pubkey(), &params).unwrap();
            let from_bob = bob.shared_secret(alice.pubkey(), &params).unwrap();
            assert_eq!(from_alice, from_bob);
        }
    }
}

use crate::keypair::Keypair;
use pocket_curve::{ArithmeticError, DomainParameters, Point};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum CipherError {
    #[error("shared point is the group identity, no mask can be derived")]
    IdentitySharedPoint,
    #[error("mask scalar is zero")]
    ZeroMask,
    #[error("masked code {0} is not an exact multiple of the mask")]
    InexactDivision(BigUint),
    #[error("unmasked code {0} does not fit a symbol")]
    SymbolOverflow(BigUint),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Multiplicative mask derived from a shared curve point.
///
/// The mask is the plain integer sum `x + y` of the shared point's
/// coordinates, with no modular reduction, and masking multiplies each
/// symbol code by it. This is an invertible demonstration transform, not a
/// cipher: it leaks structure freely and authenticates nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingKey {
    mask: BigUint,
}

impl MaskingKey {
    /// Fails on the identity point, which has no coordinates to sum, and on
    /// a zero sum, which would destroy every symbol it masks.
    pub fn from_shared_point(shared: &Point) -> Result<Self, CipherError> {
        let (x, y) = shared
            .coordinates()
            .ok_or(CipherError::IdentitySharedPoint)?;
        let mask = x + y;
        if mask.is_zero() {
            return Err(CipherError::ZeroMask);
        }
        Ok(Self { mask })
    }

    pub fn mask_scalar(&self) -> &BigUint {
        &self.mask
    }

    pub fn mask(&self, codes: &[u32]) -> Vec<BigUint> {
        codes
            .iter()
            .map(|code| &self.mask * BigUint::from(*code))
            .collect()
    }

    /// Reverses [`MaskingKey::mask`] by exact division.
    ///
    /// A code the mask does not divide evenly means the message was masked
    /// with a different scalar or damaged in transit; there is no way to
    /// recover, so the whole message is rejected.
    pub fn unmask(&self, masked: &[BigUint]) -> Result<Vec<u32>, CipherError> {
        masked
            .iter()
            .map(|value| {
                let (quotient, remainder) = value.div_rem(&self.mask);
                if !remainder.is_zero() {
                    return Err(CipherError::InexactDivision(value.clone()));
                }
                quotient
                    .to_u32()
                    .ok_or_else(|| CipherError::SymbolOverflow(quotient.clone()))
            })
            .collect()
    }
}

/// Masked symbol codes paired with the sender's public point, which is
/// everything the receiver needs to derive the same mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedMessage {
    pub codes: Vec<BigUint>,
    pub sender_public: Point,
}

/// Masks `codes` for the receiver: derive the shared point from the
/// receiver's public point, turn it into a mask, multiply.
pub fn seal(
    codes: &[u32],
    sender: &Keypair,
    receiver_public: &Point,
    params: &DomainParameters,
) -> Result<MaskedMessage, CipherError> {
    let shared = sender.shared_secret(receiver_public, params)?;
    let key = MaskingKey::from_shared_point(&shared)?;
    Ok(MaskedMessage {
        codes: key.mask(codes),
        sender_public: sender.pubkey().clone(),
    })
}

/// Recovers the symbol codes of a [`seal`]ed message.
pub fn open(
    message: &MaskedMessage,
    receiver: &Keypair,
    params: &DomainParameters,
) -> Result<Vec<u32>, CipherError> {
    let shared = receiver.shared_secret(&message.sender_public, params)?;
    let key = MaskingKey::from_shared_point(&shared)?;
    key.unmask(&message.codes)
}

#[cfg(test)]
mod test {
    use super::*;
    use pocket_curve::Curve;

    fn uint(n: u32) -> BigUint {
        BigUint::from(n)
    }

    fn params_17() -> DomainParameters {
        let curve = Curve::new(uint(1), uint(1), uint(17)).unwrap();
        DomainParameters::new(curve, Point::new(uint(13), uint(1))).unwrap()
    }

    #[test]
    fn mask_is_the_coordinate_sum() {
        let key = MaskingKey::from_shared_point(&Point::new(uint(13), uint(1))).unwrap();
        assert_eq!(key.mask_scalar(), &uint(14));
    }

    #[test]
    fn refuses_the_identity_point() {
        assert_eq!(
            MaskingKey::from_shared_point(&Point::Infinity),
            Err(CipherError::IdentitySharedPoint)
        );
    }

    #[test]
    fn refuses_a_zero_mask() {
        // (0, 0) sits on y^2 = x^3 + x over F_17 and sums to a zero mask
        let curve = Curve::new(uint(1), uint(0), uint(17)).unwrap();
        let origin = Point::new(uint(0), uint(0));
        assert!(curve.contains(&origin));
        assert_eq!(
            MaskingKey::from_shared_point(&origin),
            Err(CipherError::ZeroMask)
        );
    }

    #[test]
    fn round_trip_is_exact() {
        let key = MaskingKey::from_shared_point(&Point::new(uint(13), uint(1))).unwrap();
        let codes: Vec<u32> = "Hi there".chars().map(u32::from).collect();
        let masked = key.mask(&codes);
        assert_eq!(masked[0], uint(72 * 14));
        assert_eq!(key.unmask(&masked).unwrap(), codes);
    }

    #[test]
    fn inexact_division_is_rejected() {
        let key = MaskingKey::from_shared_point(&Point::new(uint(13), uint(1))).unwrap();
        assert_eq!(
            key.unmask(&[uint(15)]),
            Err(CipherError::InexactDivision(uint(15)))
        );
    }

    #[test]
    fn seal_and_open_agree_across_the_exchange() {
        let params = params_17();
        let alice = Keypair::new(uint(3), &params).unwrap();
        let bob = Keypair::new(uint(5), &params).unwrap();

        let codes: Vec<u32> = "Hello, this is ECDH".chars().map(u32::from).collect();
        let message = seal(&codes, &alice, bob.pubkey(), &params).unwrap();
        assert_eq!(&message.sender_public, alice.pubkey());
        assert_eq!(open(&message, &bob, &params).unwrap(), codes);
    }

    #[test]
    fn opening_with_the_wrong_key_fails_or_garbles() {
        let params = params_17();
        let alice = Keypair::new(uint(3), &params).unwrap();
        let bob = Keypair::new(uint(5), &params).unwrap();
        let eve = Keypair::new(uint(7), &params).unwrap();

        let codes: Vec<u32> = "secret".chars().map(u32::from).collect();
        let message = seal(&codes, &alice, bob.pubkey(), &params).unwrap();
        match open(&message, &eve, &params) {
            Ok(recovered) => assert_ne!(recovered, codes),
            Err(
                CipherError::InexactDivision(_)
                | CipherError::IdentitySharedPoint
                | CipherError::ZeroMask,
            ) => {}
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }
}

use crate::curve::{Curve, CurveError};
use crate::modular::ArithmeticError;
use crate::point::Point;
use crate::primality::PrimalityTest;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Redraw budget for the singular-coefficient rejection loop.
const COEFFICIENT_ATTEMPTS: usize = 100;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("bit width {0} cannot hold a prime field modulus")]
    BitWidthTooSmall(u64),
    #[error("no probable prime of {bit_width} bits found in {attempts} attempts")]
    PrimeGeneration { bit_width: u64, attempts: usize },
    #[error("no non-singular coefficient pair found in {0} attempts")]
    CoefficientSearch(usize),
    #[error("proposed generator is not on the curve")]
    GeneratorOffCurve,
    #[error("point pool exhausted without finding a generator")]
    NoGenerator,
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// The immutable `(E, G, p)` triple both parties of an exchange agree on.
///
/// Construction is the only mutating phase; afterwards the value is shared
/// freely. There is deliberately no process-wide default instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParameters {
    curve: Curve,
    generator: Point,
}

impl DomainParameters {
    /// Draws a fresh prime, coefficient pair and generator.
    ///
    /// Prime search and generator search are both bounded, so this either
    /// returns usable parameters or a [`DomainError`] naming the stage that
    /// gave up. Expect it to take a while: the curve construction inside
    /// enumerates all `O(p^2)` candidate points.
    pub fn random<T, R>(bit_width: u64, oracle: &T, rng: &mut R) -> Result<Self, DomainError>
    where
        T: PrimalityTest,
        R: RngCore + CryptoRng,
    {
        let p = random_prime(bit_width, oracle, rng)?;
        let (a, b) = random_coefficients(bit_width, &p, rng)?;
        let curve = Curve::new(a, b, p)?;
        let generator = select_generator(&curve, rng)?;
        Ok(Self { curve, generator })
    }

    /// Wraps an existing curve and generator, re-validating the generator's
    /// order the same way [`select_generator`] does.
    pub fn new(curve: Curve, generator: Point) -> Result<Self, DomainError> {
        if !curve.contains(&generator) {
            return Err(DomainError::GeneratorOffCurve);
        }
        if !has_unique_order_witness(&curve, &generator)? {
            return Err(DomainError::NoGenerator);
        }
        Ok(Self { curve, generator })
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn generator(&self) -> &Point {
        &self.generator
    }

    pub fn prime(&self) -> &BigUint {
        self.curve.prime()
    }
}

/// A probable prime drawn uniformly from `[2^(w-1), 2^w)`.
///
/// The attempt budget is `100 * (log2(w) + 1)` draws.
pub fn random_prime<T, R>(bit_width: u64, oracle: &T, rng: &mut R) -> Result<BigUint, DomainError>
where
    T: PrimalityTest,
    R: RngCore + CryptoRng,
{
    if bit_width < 3 {
        return Err(DomainError::BitWidthTooSmall(bit_width));
    }
    let attempts = 100 * (bit_width.ilog2() as usize + 1);
    let low = BigUint::one() << (bit_width - 1);
    let high = BigUint::one() << bit_width;
    for _ in 0..attempts {
        let candidate = rng.gen_biguint_range(&low, &high);
        if oracle.is_probable_prime(&candidate, rng) {
            return Ok(candidate);
        }
    }
    Err(DomainError::PrimeGeneration {
        bit_width,
        attempts,
    })
}

/// A coefficient pair drawn uniformly from `[0, 2^(w-1)]`, redrawn until the
/// curve it defines over `p` is non-singular.
pub fn random_coefficients<R>(
    bit_width: u64,
    p: &BigUint,
    rng: &mut R,
) -> Result<(BigUint, BigUint), DomainError>
where
    R: RngCore + CryptoRng,
{
    if bit_width == 0 {
        return Err(DomainError::BitWidthTooSmall(bit_width));
    }
    let bound = (BigUint::one() << (bit_width - 1)) + BigUint::one();
    for _ in 0..COEFFICIENT_ATTEMPTS {
        let a = rng.gen_biguint_below(&bound);
        let b = rng.gen_biguint_below(&bound);
        if !Curve::is_singular(&a, &b, p) {
            return Ok((a, b));
        }
    }
    Err(DomainError::CoefficientSearch(COEFFICIENT_ATTEMPTS))
}

/// Picks a generator by drawing random candidates from a shrinking pool of
/// the curve's points.
///
/// A candidate qualifies when its order is witnessed exactly once in
/// `[1, p]`: walking the multiples `G, 2G, ..., pG`, exactly one lands on
/// the identity. Rejected candidates leave the pool, and an empty pool is a
/// hard failure.
pub fn select_generator<R>(curve: &Curve, rng: &mut R) -> Result<Point, DomainError>
where
    R: RngCore + CryptoRng,
{
    let mut pool: Vec<Point> = curve
        .points()
        .iter()
        .filter(|point| !point.is_infinity())
        .cloned()
        .collect();
    while !pool.is_empty() {
        let index = rng.gen_biguint_below(&BigUint::from(pool.len()));
        // NOTE unwrap is fine because the draw is below `pool.len()`,
        // which itself fits in usize
        let candidate = pool.swap_remove(index.to_usize().unwrap());
        if has_unique_order_witness(curve, &candidate)? {
            return Ok(candidate);
        }
    }
    Err(DomainError::NoGenerator)
}

// Walks candidate, 2*candidate, ..., p*candidate by repeated addition and
// counts how many multiples hit the identity. Scalar multiplication of zero
// returns the identity here, so the window starts at 1 rather than 0.
fn has_unique_order_witness(curve: &Curve, candidate: &Point) -> Result<bool, ArithmeticError> {
    let mut witnesses = 0usize;
    let mut multiple = candidate.clone();
    let mut i = BigUint::one();
    while &i <= curve.prime() {
        if multiple.is_infinity() {
            witnesses += 1;
        }
        multiple = curve.add(&multiple, candidate)?;
        i += 1u32;
    }
    Ok(witnesses == 1)
}

use crate::modular::{mod_add, mod_inverse, mod_mul, mod_sub, ArithmeticError};
use crate::point::Point;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CurveError {
    #[error("4a^3 + 27b^2 = 0 mod {0}, the curve is singular")]
    Singular(BigUint),
    #[error("modulus {0} is below the field characteristic required by the short Weierstrass form")]
    ModulusTooSmall(BigUint),
}

/// The group of `y^2 = x^3 + ax + b` over the prime field of order `p`,
/// together with its exhaustively enumerated point set.
///
/// Enumeration costs `O(p^2)` field operations, so `p` must stay at
/// demonstration scale. The struct is immutable once constructed and all
/// group-law methods are read-only, so one instance can serve any number of
/// callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    a: BigUint,
    b: BigUint,
    p: BigUint,
    points: Vec<Point>,
}

impl Curve {
    /// Validates the coefficients and enumerates the point set.
    pub fn new(a: BigUint, b: BigUint, p: BigUint) -> Result<Self, CurveError> {
        if p < BigUint::from(5u32) {
            return Err(CurveError::ModulusTooSmall(p));
        }
        let a = a % &p;
        let b = b % &p;
        if Self::is_singular(&a, &b, &p) {
            return Err(CurveError::Singular(p));
        }
        let points = Self::enumerate(&a, &b, &p);
        Ok(Self { a, b, p, points })
    }

    /// Whether `4a^3 + 27b^2 = 0 mod p`, i.e. the cubic has a repeated root
    /// and some points would have no well-defined tangent.
    pub fn is_singular(a: &BigUint, b: &BigUint, p: &BigUint) -> bool {
        let a_cubed = mod_mul(&mod_mul(a, a, p), a, p);
        let b_squared = mod_mul(b, b, p);
        ((BigUint::from(4u32) * a_cubed + BigUint::from(27u32) * b_squared) % p).is_zero()
    }

    fn enumerate(a: &BigUint, b: &BigUint, p: &BigUint) -> Vec<Point> {
        let mut points = vec![Point::Infinity];
        let mut x = BigUint::zero();
        while &x < p {
            let rhs = Self::equation_rhs(&x, a, b, p);
            let mut y = BigUint::zero();
            while &y < p {
                if mod_mul(&y, &y, p) == rhs {
                    points.push(Point::new(x.clone(), y.clone()));
                }
                y += 1u32;
            }
            x += 1u32;
        }
        points
    }

    fn equation_rhs(x: &BigUint, a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
        let x_cubed = mod_mul(&mod_mul(x, x, p), x, p);
        (x_cubed + mod_mul(a, x, p) + b) % p
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    pub fn prime(&self) -> &BigUint {
        &self.p
    }

    /// Every point of the group, the identity included.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn contains(&self, point: &Point) -> bool {
        match point.coordinates() {
            None => true,
            Some((x, y)) => {
                x < &self.p
                    && y < &self.p
                    && mod_mul(y, y, &self.p) == Self::equation_rhs(x, &self.a, &self.b, &self.p)
            }
        }
    }

    // None encodes a vertical line: a chord between points sharing an x
    // coordinate, or the tangent at a point with y = 0. The chord-tangent
    // sum is then the identity.
    fn slope(
        &self,
        x1: &BigUint,
        y1: &BigUint,
        x2: &BigUint,
        y2: &BigUint,
    ) -> Result<Option<BigUint>, ArithmeticError> {
        if x1 == x2 && y1 != y2 {
            return Ok(None);
        }
        let (numer, denom) = if x1 == x2 {
            if y1.is_zero() {
                return Ok(None);
            }
            // tangent: (3*x1^2 + a) / (2*y1)
            let numer = mod_add(
                &mod_mul(&BigUint::from(3u32), &mod_mul(x1, x1, &self.p), &self.p),
                &self.a,
                &self.p,
            );
            let denom = mod_mul(&BigUint::from(2u32), y1, &self.p);
            (numer, denom)
        } else {
            // chord: (y2 - y1) / (x2 - x1)
            (mod_sub(y2, y1, &self.p), mod_sub(x2, x1, &self.p))
        };
        let inverse = mod_inverse(&denom, &self.p)?;
        Ok(Some(mod_mul(&numer, &inverse, &self.p)))
    }

    /// Chord-tangent addition.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point, ArithmeticError> {
        let (x1, y1) = match lhs.coordinates() {
            None => return Ok(rhs.clone()),
            Some(coords) => coords,
        };
        let (x2, y2) = match rhs.coordinates() {
            None => return Ok(lhs.clone()),
            Some(coords) => coords,
        };
        let gamma = match self.slope(x1, y1, x2, y2)? {
            None => return Ok(Point::Infinity),
            Some(gamma) => gamma,
        };
        let x3 = mod_sub(&mod_mul(&gamma, &gamma, &self.p), &(x1 + x2), &self.p);
        let y3 = mod_sub(
            &mod_mul(&gamma, &mod_sub(x1, &x3, &self.p), &self.p),
            y1,
            &self.p,
        );
        Ok(Point::new(x3, y3))
    }

    pub fn double(&self, point: &Point) -> Result<Point, ArithmeticError> {
        self.add(point, point)
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point.coordinates() {
            None => Point::Infinity,
            Some((x, y)) => Point::new(x.clone(), mod_sub(&BigUint::zero(), y, &self.p)),
        }
    }

    /// `k * point` by double-and-add over the bits of `k`, least significant
    /// first, carrying the running doubled point forward.
    ///
    /// `k = 0` yields the group identity.
    pub fn scalar_mul(&self, point: &Point, k: &BigUint) -> Result<Point, ArithmeticError> {
        let mut product = Point::Infinity;
        let mut addend = point.clone();
        for i in 0..k.bits() {
            if k.bit(i) {
                product = self.add(&product, &addend)?;
            }
            addend = self.double(&addend)?;
        }
        Ok(product)
    }
}

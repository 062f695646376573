use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("{element} has no inverse modulo {modulus}")]
    NoInverse { element: BigUint, modulus: BigUint },
}

/// Bezout triple `(g, x, y)` with `g = gcd(m, n) = x*m + y*n`.
pub fn extended_gcd(m: &BigInt, n: &BigInt) -> (BigInt, BigInt, BigInt) {
    if n.is_zero() {
        return (m.clone(), BigInt::one(), BigInt::zero());
    }
    let q = m / n;
    let r = m % n;
    let (g, u, v) = extended_gcd(n, &r);
    let y = &u - &q * &v;
    (g, v, y)
}

/// Inverse of `s` modulo `p`, normalized into `[0, p)`.
///
/// Fails whenever `gcd(s, p) != 1`. For a prime modulus that only happens
/// when `s` is a multiple of `p`, which indicates a logic error upstream and
/// is surfaced rather than papered over.
pub fn mod_inverse(s: &BigUint, p: &BigUint) -> Result<BigUint, ArithmeticError> {
    let p_int = BigInt::from(p.clone());
    let (g, x, _) = extended_gcd(&BigInt::from(s.clone()), &p_int);
    if !g.is_one() {
        return Err(ArithmeticError::NoInverse {
            element: s.clone(),
            modulus: p.clone(),
        });
    }
    let reduced = x.mod_floor(&p_int);
    // NOTE unwrap is fine because the floor remainder of a positive
    // modulus is never negative
    Ok(reduced.to_biguint().unwrap())
}

pub(crate) fn mod_add(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

// BigUint subtraction underflows, so lift into [p, 2p) first when needed.
pub(crate) fn mod_sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    let a = a % p;
    let b = b % p;
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

pub(crate) fn mod_mul(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

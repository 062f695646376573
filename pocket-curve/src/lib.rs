//! Demonstration-scale elliptic curve groups over prime fields.
//!
//! Curves are small enough to enumerate exhaustively, which keeps the group
//! law, generator selection and parameter generation inspectable. Nothing in
//! this crate is constant-time or side-channel hardened.
#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

mod curve;
mod domain;
mod modular;
mod point;
mod primality;

pub use curve::{Curve, CurveError};
pub use domain::{
    random_coefficients, random_prime, select_generator, DomainError, DomainParameters,
};
pub use modular::{extended_gcd, mod_inverse, ArithmeticError};
pub use point::Point;
pub use primality::{MillerRabin, PrimalityTest};

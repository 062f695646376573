use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use std::fmt;

/// A point on a short Weierstrass curve: the group identity, or an affine
/// coordinate pair with both coordinates reduced modulo the field prime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// Affine coordinates, unless this is the point at infinity.
    pub fn coordinates(&self) -> Option<(&BigUint, &BigUint)> {
        match self {
            Self::Infinity => None,
            Self::Affine { x, y } => Some((x, y)),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "Infinity"),
            Self::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors() {
        let point = Point::new(BigUint::from(4u32), BigUint::from(16u32));
        assert!(!point.is_infinity());
        let (x, y) = point.coordinates().unwrap();
        assert_eq!(x, &BigUint::from(4u32));
        assert_eq!(y, &BigUint::from(16u32));

        assert!(Point::Infinity.is_infinity());
        assert!(Point::Infinity.coordinates().is_none());
    }

    #[test]
    fn display() {
        let point = Point::new(BigUint::from(13u32), BigUint::from(1u32));
        assert_eq!(point.to_string(), "(13, 1)");
        assert_eq!(Point::Infinity.to_string(), "Infinity");
    }
}

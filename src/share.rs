use crate::bigint_utils::decimal;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One evaluation `(x, P(x))` of the secret-encoding polynomial.
///
/// Shares are immutable once built: the fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    x: u64,
    #[serde(with = "decimal")]
    y: BigInt,
}

impl Share {
    pub fn new(x: u64, y: BigInt) -> Self {
        Self { x, y }
    }

    /// Evaluation point, `1..=n` for shares produced by [`crate::generate`].
    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    pub fn into_parts(self) -> (u64, BigInt) {
        (self.x, self.y)
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

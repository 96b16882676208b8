use crate::bigint_utils::decimal;
use crate::error::{Result, ShareError};
use num_bigint::BigInt;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Bit length of the default coefficient bound (coefficients drawn from `[1, 2^256]`).
pub const DEFAULT_COEFFICIENT_BOUND_BITS: usize = 256;

/// Coefficient range of the notebook walkthrough. Too small to hide the secret.
pub const LEGACY_COEFFICIENT_BOUND: u32 = 100;

/// Sharing parameters: `total` shares (n), `threshold` (t) and the inclusive
/// upper bound for the random polynomial coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingParams {
    pub total: usize,
    pub threshold: usize,
    #[serde(with = "decimal")]
    pub coefficient_bound: BigInt,
}

pub fn default_coefficient_bound() -> BigInt {
    BigInt::one() << DEFAULT_COEFFICIENT_BOUND_BITS
}

impl SharingParams {
    /// `n` shares, threshold `t`, coefficients up to [`default_coefficient_bound`].
    pub fn new(total: usize, threshold: usize) -> Result<Self> {
        Self::with_bound(total, threshold, default_coefficient_bound())
    }

    pub fn with_bound(total: usize, threshold: usize, coefficient_bound: BigInt) -> Result<Self> {
        let params = Self {
            total,
            threshold,
            coefficient_bound,
        };
        params.validate()?;
        Ok(params)
    }

    /// Like [`SharingParams::new`] but the bound is widened to at least `|secret|`.
    pub fn for_secret(total: usize, threshold: usize, secret: &BigInt) -> Result<Self> {
        let bound = default_coefficient_bound().max(secret.abs());
        Self::with_bound(total, threshold, bound)
    }

    /// Coefficients in `[1, 100]`. Only useful to reproduce the walkthrough;
    /// [`crate::generate`] warns when sharing with such a narrow range.
    pub fn legacy(total: usize, threshold: usize) -> Result<Self> {
        Self::with_bound(total, threshold, BigInt::from(LEGACY_COEFFICIENT_BOUND))
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold < 1 {
            return Err(ShareError::InvalidParameters(
                "threshold must be at least 1".to_string(),
            ));
        }
        if self.total < self.threshold {
            return Err(ShareError::InvalidParameters(format!(
                "total shares ({}) must be >= threshold ({})",
                self.total, self.threshold
            )));
        }
        if self.coefficient_bound < BigInt::one() {
            return Err(ShareError::InvalidParameters(format!(
                "coefficient bound must be >= 1, got {}",
                self.coefficient_bound
            )));
        }
        Ok(())
    }

    /// True when the coefficient range is narrower than the default.
    pub fn is_weak(&self) -> bool {
        self.threshold > 1 && self.coefficient_bound < default_coefficient_bound()
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read params '{}'", path.display()))?;
        let params: Self = serde_json::from_str(&content)
            .with_context(|| format!("Malformed params '{}'", path.display()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.validate()?;
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

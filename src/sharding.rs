use crate::error::{Result, ShareError};
use crate::interpolation::{self, evaluate_at};
use crate::params::SharingParams;
use crate::share::Share;
use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use rand::rngs::OsRng;
use std::collections::HashSet;
use tracing::{debug, warn};

// Shamir secret sharing over the integers

/// Split `secret` into `params.total` shares, any `params.threshold` of which
/// recover it.
///
/// The polynomial is `P(x) = secret + c1*x + ... + c_{t-1}*x^{t-1}` with each
/// `c_i` drawn uniformly from `[1, coefficient_bound]`. Shares are returned
/// for `x = 1..=n` in ascending order. Pass a seeded RNG for reproducible
/// output.
pub fn generate<R: Rng + ?Sized>(
    secret: &BigInt,
    params: &SharingParams,
    rng: &mut R,
) -> Result<Vec<Share>> {
    params.validate()?;
    if params.is_weak() {
        warn!(
            bound_bits = params.coefficient_bound.bits(),
            "coefficient bound is small; fewer than threshold shares may reveal the secret"
        );
    }

    // 1. Coefficients: a_0 is the secret, a_1..a_{t-1} random
    let lower = BigInt::one();
    let upper = &params.coefficient_bound + 1u32; // exclusive
    let mut coefficients = Vec::with_capacity(params.threshold);
    coefficients.push(secret.clone());
    for _ in 1..params.threshold {
        coefficients.push(rng.gen_bigint_range(&lower, &upper));
    }

    // 2. Evaluate at x = 1..=total
    let shares: Vec<Share> = (1..=params.total as u64)
        .map(|x| Share::new(x, evaluate_polynomial(&coefficients, x)))
        .collect();

    debug!(
        total = params.total,
        threshold = params.threshold,
        bound_bits = params.coefficient_bound.bits(),
        "generated shares"
    );
    Ok(shares)
}

/// [`generate`] drawing coefficients from the operating system RNG.
pub fn generate_with_os_rng(secret: &BigInt, params: &SharingParams) -> Result<Vec<Share>> {
    generate(secret, params, &mut OsRng)
}

/// Recover the secret from at least `threshold` shares.
///
/// The first `threshold` shares form the quorum and fix a polynomial of
/// degree `threshold - 1`; its value at zero is the secret. Any further
/// shares must lie on that same polynomial.
///
/// Errors:
/// - `InvalidParameters` if `threshold` is zero or a share has `x = 0`
/// - `DuplicateShareIndex` if two shares have the same `x`
/// - `InsufficientShares` if fewer than `threshold` shares are given
/// - `InconsistentShares` if the quorum does not lie on a polynomial with
///   integer coefficients, or an extra share disagrees with the quorum
pub fn reconstruct(shares: &[Share], threshold: usize) -> Result<BigInt> {
    if threshold < 1 {
        return Err(ShareError::InvalidParameters(
            "threshold must be at least 1".to_string(),
        ));
    }
    if shares.iter().any(|share| share.x() == 0) {
        return Err(ShareError::InvalidParameters(
            "share index x must be positive".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(share.x()) {
            return Err(ShareError::DuplicateShareIndex(share.x()));
        }
    }

    if shares.len() < threshold {
        return Err(ShareError::InsufficientShares {
            required: threshold,
            provided: shares.len(),
        });
    }

    let (quorum, extra) = shares.split_at(threshold);

    // Shares from generate lie on an integer polynomial; anything else is corrupt
    let polynomial = interpolation::coefficients(quorum)
        .into_iter()
        .enumerate()
        .map(|(degree, coeff)| {
            if coeff.is_integer() {
                Ok(coeff.to_integer())
            } else {
                Err(ShareError::InconsistentShares(format!(
                    "quorum polynomial has non-integral coefficient {} at degree {}",
                    coeff, degree
                )))
            }
        })
        .collect::<Result<Vec<BigInt>>>()?;

    // integral coefficients make the Lagrange value at zero exact
    let secret = evaluate_at(quorum, &BigInt::zero()).to_integer();

    for share in extra {
        if &evaluate_polynomial(&polynomial, share.x()) != share.y() {
            return Err(ShareError::InconsistentShares(format!(
                "share at x = {} does not lie on the polynomial fixed by the quorum",
                share.x()
            )));
        }
    }

    debug!(
        threshold,
        provided = shares.len(),
        "reconstructed secret"
    );
    Ok(secret)
}

/// Horner evaluation of `a_0 + a_1*x + ... + a_k*x^k`.
fn evaluate_polynomial(coefficients: &[BigInt], x: u64) -> BigInt {
    let x = BigInt::from(x);
    coefficients
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, coeff| acc * &x + coeff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn horner_matches_expanded_form() {
        let coefficients = [BigInt::from(12345), BigInt::from(7), BigInt::from(3)];
        for x in 1..=5u64 {
            let expected = 12345 + 7 * x as i64 + 3 * (x * x) as i64;
            assert_eq!(evaluate_polynomial(&coefficients, x), BigInt::from(expected));
        }
    }

    #[test]
    fn coefficients_stay_within_bound() {
        // with bound 1 every random coefficient is exactly 1
        let params = SharingParams::with_bound(4, 3, BigInt::one()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let shares = generate(&BigInt::from(10), &params, &mut rng).unwrap();

        let ys: Vec<BigInt> = shares.iter().map(|s| s.y().clone()).collect();
        // 10 + x + x^2
        assert_eq!(
            ys,
            vec![
                BigInt::from(12),
                BigInt::from(16),
                BigInt::from(22),
                BigInt::from(30)
            ]
        );
    }

    #[test]
    fn threshold_one_hands_out_the_secret() {
        let params = SharingParams::new(3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let shares = generate(&BigInt::from(-99), &params, &mut rng).unwrap();

        assert!(shares.iter().all(|s| s.y() == &BigInt::from(-99)));
        assert_eq!(reconstruct(&shares[2..], 1).unwrap(), BigInt::from(-99));
    }

    #[test]
    fn rejects_zero_threshold_and_zero_index() {
        let shares = vec![Share::new(1, BigInt::from(5))];
        assert!(matches!(
            reconstruct(&shares, 0),
            Err(ShareError::InvalidParameters(_))
        ));

        let with_zero = vec![Share::new(0, BigInt::from(5)), Share::new(1, BigInt::from(6))];
        assert!(matches!(
            reconstruct(&with_zero, 2),
            Err(ShareError::InvalidParameters(_))
        ));
    }

    #[test]
    fn generate_revalidates_params() {
        let params = SharingParams {
            total: 2,
            threshold: 3,
            coefficient_bound: BigInt::from(100),
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate(&BigInt::from(1), &params, &mut rng),
            Err(ShareError::InvalidParameters(_))
        ));
    }

    #[test]
    fn os_rng_round_trip() {
        let params = SharingParams::new(6, 4).unwrap();
        let secret = BigInt::from(31337);
        let shares = generate_with_os_rng(&secret, &params).unwrap();
        assert_eq!(shares.len(), 6);
        assert_eq!(reconstruct(&shares[2..], 4).unwrap(), secret);
    }
}

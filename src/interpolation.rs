use crate::share::Share;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

// Exact interpolation over the rationals. No floating point anywhere:
// every intermediate value is a reduced BigRational.

/// Value at `at` of the unique polynomial of degree `points.len() - 1`
/// through `points`:
///
/// `P(at) = Σ_i y_i · Π_{j≠i} (at − x_j) / (x_i − x_j)`
///
/// The x coordinates must be pairwise distinct.
pub(crate) fn evaluate_at(points: &[Share], at: &BigInt) -> BigRational {
    let mut total = BigRational::zero();

    for (i, point_i) in points.iter().enumerate() {
        let x_i = BigInt::from(point_i.x());

        // Lagrange basis L_i(at), kept as numerator / denominator
        let mut numerator = point_i.y().clone();
        let mut denominator = BigInt::from(1);

        for (j, point_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let x_j = BigInt::from(point_j.x());

            numerator *= at - &x_j;
            denominator *= &x_i - &x_j;
        }

        total += BigRational::new(numerator, denominator);
    }

    total
}

/// Coefficients `[a_0, a_1, ..., a_{m-1}]` of the polynomial through the `m`
/// points, lowest degree first. The x coordinates must be pairwise distinct.
///
/// Newton divided differences, then the Newton form is expanded into the
/// monomial basis.
pub(crate) fn coefficients(points: &[Share]) -> Vec<BigRational> {
    if points.is_empty() {
        return Vec::new();
    }
    let xs: Vec<BigInt> = points.iter().map(|p| BigInt::from(p.x())).collect();

    // diffs[i] ends up as f[x_0, ..., x_i]
    let mut diffs: Vec<BigRational> = points
        .iter()
        .map(|p| BigRational::from_integer(p.y().clone()))
        .collect();
    for level in 1..points.len() {
        for i in (level..points.len()).rev() {
            let span = BigRational::from_integer(&xs[i] - &xs[i - level]);
            diffs[i] = (&diffs[i] - &diffs[i - 1]) / span;
        }
    }

    // Horner on the Newton form: poly = poly * (x - x_k) + diffs[k]
    let last = points.len() - 1;
    let mut poly = vec![diffs[last].clone()];
    for k in (0..last).rev() {
        let root = BigRational::from_integer(xs[k].clone());
        let mut next = vec![BigRational::zero(); poly.len() + 1];
        for (degree, coeff) in poly.iter().enumerate() {
            next[degree + 1] += coeff;
            next[degree] -= &root * coeff;
        }
        next[0] += &diffs[k];
        poly = next;
    }

    poly
}

//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: cumulative distribution function (CDF)
//! - `norm_pdf`: probability density function (PDF)
//! - `norm_inv_cdf`: inverse CDF (quantile function)
//!
//! The CDF uses the Abramowitz & Stegun complementary-error-function
//! approximation (max error 1.5e-7); the inverse CDF uses Acklam's rational
//! approximation with lower/central/upper branches (max relative error about
//! 1.15e-9). Both are plenty for mapping Monte Carlo uniforms to shocks.

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Abramowitz and Stegun formula 7.1.26, maximum error 1.5e-7 for all x.
#[inline]
fn erfc_approx(x: f64) -> f64 {
    // Abramowitz and Stegun constants (7.1.26)
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);

    // Horner's method for polynomial evaluation
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes `P(X <= x)` for `X ~ N(0, 1)` via `Φ(x) = 0.5 * erfc(-x / √2)`.
///
/// # Accuracy
///
/// At least 1e-7 absolute for all finite x.
///
/// # Examples
/// ```
/// use event_core::math::normal::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc_approx(-x / SQRT_2)
}

/// Standard normal probability density function.
///
/// `φ(x) = (1 / √(2π)) · exp(-x² / 2)`.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse standard normal CDF (quantile function).
///
/// Acklam's rational approximation with three branches: lower tail, central
/// region, and upper tail. Used to turn copula uniforms into Gaussian shocks.
///
/// # Edge cases
///
/// - `p` NaN or outside `[0, 1]` returns NaN
/// - `p == 0` returns negative infinity, `p == 1` positive infinity
///
/// Callers feeding the simulation clamp uniforms to the open interval first,
/// so the infinite branches are never hit in the hot loop.
///
/// # Examples
/// ```
/// use event_core::math::normal::norm_inv_cdf;
///
/// assert!(norm_inv_cdf(0.5).abs() < 1e-9);
/// assert!((norm_inv_cdf(0.975) - 1.96).abs() < 1e-2);
/// ```
pub fn norm_inv_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    // Acklam's coefficients.
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        // Φ(-x) + Φ(x) = 1 for all x (within approximation accuracy)
        let test_values = [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for x in test_values {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        // Reference values from standard normal tables
        assert_relative_eq!(norm_cdf(1.0), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0), 0.022750131948179195, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(3.0), 0.9986501019683699, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_bounds() {
        let test_values: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        for x in test_values {
            let result = norm_cdf(x);
            assert!(result >= 0.0, "CDF < 0 at x = {}", x);
            assert!(result <= 1.0, "CDF > 1 at x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for i in 0..values.len() - 1 {
            assert!(
                norm_cdf(values[i + 1]) > norm_cdf(values[i]),
                "CDF not monotonic at x = {}",
                values[i]
            );
        }
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        assert_relative_eq!(norm_pdf(0.0), FRAC_1_SQRT_2PI, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(1.0), 0.24197072451914337, epsilon = 1e-7);
        assert_relative_eq!(norm_pdf(2.0), 0.05399096651318806, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-10);
        }
    }

    // ==========================================================
    // norm_inv_cdf tests
    // ==========================================================

    #[test]
    fn test_inv_cdf_known_quantiles() {
        assert!(norm_inv_cdf(0.5).abs() < 1e-9);
        // Φ⁻¹(0.8413447...) ≈ 1
        assert_relative_eq!(norm_inv_cdf(0.8413447460685429), 1.0, epsilon = 1e-6);
        // The 95% and 97.5% normal critical values
        assert_relative_eq!(norm_inv_cdf(0.95), 1.6448536269514722, epsilon = 1e-6);
        assert_relative_eq!(norm_inv_cdf(0.975), 1.959963984540054, epsilon = 1e-6);
    }

    #[test]
    fn test_inv_cdf_antisymmetry() {
        for i in 1..100 {
            let p = i as f64 / 100.0;
            assert_relative_eq!(norm_inv_cdf(p), -norm_inv_cdf(1.0 - p), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_inv_cdf_round_trips_cdf() {
        for i in 1..=999 {
            let p = i as f64 / 1000.0;
            let x = norm_inv_cdf(p);
            let p_back = norm_cdf(x);
            assert!(
                (p_back - p).abs() < 2e-7,
                "p={} x={} p_back={}",
                p,
                x,
                p_back
            );
        }
    }

    #[test]
    fn test_inv_cdf_edge_cases() {
        assert!(norm_inv_cdf(f64::NAN).is_nan());
        assert!(norm_inv_cdf(-0.1).is_nan());
        assert!(norm_inv_cdf(1.1).is_nan());
        assert_eq!(norm_inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0), f64::INFINITY);
    }

    #[test]
    fn test_inv_cdf_tail_branches() {
        // Exercise both tail branches of the rational approximation.
        let lower = norm_inv_cdf(0.001);
        let upper = norm_inv_cdf(0.999);
        assert_relative_eq!(lower, -3.090232306167813, epsilon = 1e-6);
        assert_relative_eq!(upper, 3.090232306167813, epsilon = 1e-6);
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // Probabilities spanning both tail branches and the central branch
        fn probability_strategy() -> impl Strategy<Value = f64> {
            1e-5..0.99999f64
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            /// Φ(Φ⁻¹(p)) must return p within the combined approximation error.
            #[test]
            fn prop_inv_cdf_round_trips_cdf(p in probability_strategy()) {
                let x = norm_inv_cdf(p);
                let p_back = norm_cdf(x);
                prop_assert!(
                    (p_back - p).abs() < 5e-7,
                    "round-trip drift at p = {}: x = {}, p_back = {}",
                    p, x, p_back
                );
            }

            /// The CDF approximation must preserve ordering for separated inputs.
            #[test]
            fn prop_cdf_increasing(x in -4.0..4.0f64, gap in 0.05..1.0f64) {
                prop_assert!(
                    norm_cdf(x + gap) > norm_cdf(x),
                    "CDF not increasing from {} to {}",
                    x, x + gap
                );
            }

            /// Φ⁻¹(p) = -Φ⁻¹(1 - p) across the branch stitch points.
            #[test]
            fn prop_inv_cdf_antisymmetric(p in 1e-5..0.5f64) {
                let lower = norm_inv_cdf(p);
                let upper = norm_inv_cdf(1.0 - p);
                prop_assert!(
                    (lower + upper).abs() < 1e-8 * (1.0 + lower.abs()),
                    "antisymmetry broken at p = {}: {} vs {}",
                    p, lower, upper
                );
            }

            /// The density is positive, symmetric, and maximal at the origin.
            #[test]
            fn prop_pdf_shape(x in -8.0..8.0f64) {
                let density = norm_pdf(x);
                prop_assert!(density > 0.0);
                prop_assert!(density <= norm_pdf(0.0));
                prop_assert!((density - norm_pdf(-x)).abs() < 1e-15);
            }
        }
    }
}

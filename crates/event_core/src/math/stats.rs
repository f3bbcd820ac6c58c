//! Moment and autocorrelation statistics over observation slices.
//!
//! Conventions: variance uses the unbiased (n-1) denominator, matching the
//! estimators' use of sample variance for annualised volatility; skewness and
//! kurtosis use the population (maximum-likelihood) central moments as in the
//! Jarque-Bera statistic. All functions are total. Degenerate inputs (too few
//! points, zero dispersion) return the neutral value documented per function
//! instead of NaN; callers enforce data-sufficiency before estimating.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Unbiased sample variance (n-1 denominator). Returns 0.0 for fewer than
/// two points.
pub fn sample_variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    let sum_sq: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    sum_sq / (xs.len() - 1) as f64
}

/// Unbiased sample standard deviation.
pub fn sample_std(xs: &[f64]) -> f64 {
    sample_variance(xs).sqrt()
}

/// Population skewness `m3 / m2^(3/2)`. Returns 0.0 when the second central
/// moment vanishes or there are fewer than two points.
pub fn skewness(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    let n = xs.len() as f64;
    let m2: f64 = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    if m2 <= 0.0 {
        return 0.0;
    }
    let m3: f64 = xs.iter().map(|x| (x - m).powi(3)).sum::<f64>() / n;
    m3 / m2.powf(1.5)
}

/// Population kurtosis `m4 / m2²` (not excess; the normal distribution gives
/// 3). Returns 3.0 when the second central moment vanishes or there are fewer
/// than two points, so a constant series reads as neutral.
pub fn kurtosis(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 3.0;
    }
    let m = mean(xs);
    let n = xs.len() as f64;
    let m2: f64 = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    if m2 <= 0.0 {
        return 3.0;
    }
    let m4: f64 = xs.iter().map(|x| (x - m).powi(4)).sum::<f64>() / n;
    m4 / (m2 * m2)
}

/// Log-likelihood of `xs` under an i.i.d. Gaussian with the given mean and
/// variance: `-n/2·ln(2π·σ²) - Σ(x-μ)²/(2σ²)`.
///
/// `variance` must be positive; non-positive variance returns negative
/// infinity (an impossible model rather than NaN).
pub fn gaussian_log_likelihood(xs: &[f64], mean: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let n = xs.len() as f64;
    let sum_sq: f64 = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
    -0.5 * n * (2.0 * std::f64::consts::PI * variance).ln() - sum_sq / (2.0 * variance)
}

/// Lag-k sample autocorrelation
/// `Σ_{t=k}^{n-1} (x_t - x̄)(x_{t-k} - x̄) / Σ_{t=0}^{n-1} (x_t - x̄)²`.
///
/// Returns 0.0 when the lag leaves fewer than two overlapping pairs or the
/// series has no dispersion.
pub fn autocorrelation(xs: &[f64], lag: usize) -> f64 {
    if lag == 0 {
        return 1.0;
    }
    if xs.len() <= lag + 1 {
        return 0.0;
    }
    let m = mean(xs);
    let denom: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    if denom <= 0.0 {
        return 0.0;
    }
    let numer: f64 = xs
        .windows(lag + 1)
        .map(|w| (w[lag] - m) * (w[0] - m))
        .sum();
    numer / denom
}

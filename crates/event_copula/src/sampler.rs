//! Build-once samplers producing coupled uniform vectors.
//!
//! A [`CopulaSampler`] is constructed once per simulation (validating
//! parameters and factorising the correlation matrix up front) and then
//! drives millions of draws through [`CopulaSampler::sample_into`] without
//! further allocation. Elliptical families map correlated normals through
//! their marginal CDF; Archimedean families use the conditional-distribution
//! method (Clayton) and Marshall-Olkin frailty sampling (Gumbel).
//!
//! Every emitted uniform is clamped to the open interval
//! `[UNIFORM_FLOOR, 1 - UNIFORM_FLOOR]` so downstream inverse-CDF
//! transforms never receive an exact 0 or 1.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, Exp1, StandardNormal};
use statrs::distribution::{ContinuousCDF, StudentsT};

use event_core::math::norm_cdf;

use crate::config::{CopulaConfig, CopulaFamily};
use crate::correlation::CorrelationMatrix;
use crate::error::CopulaError;

/// Distance kept from the ends of the unit interval.
pub const UNIFORM_FLOOR: f64 = 1e-12;

/// A copula fixed to a family, parameters, and dimension, ready to sample.
#[derive(Debug)]
pub struct CopulaSampler {
    dimension: usize,
    kind: SamplerKind,
}

#[derive(Debug)]
enum SamplerKind {
    Independent,
    Gaussian {
        chol: Vec<f64>,
    },
    StudentT {
        chol: Vec<f64>,
        nu: f64,
        mixer: ChiSquared<f64>,
        marginal: StudentsT,
    },
    Clayton {
        theta: f64,
    },
    Gumbel {
        theta: f64,
    },
}

impl CopulaSampler {
    /// Validates the configuration, expands the pairwise correlation to an
    /// equicorrelated matrix at the given dimension, and factorises it for
    /// the elliptical families.
    ///
    /// # Errors
    ///
    /// Everything [`CopulaConfig::validate`] raises, plus
    /// [`CopulaError::NotPositiveDefinite`] when the equicorrelated matrix
    /// fails factorisation (pairwise ρ below `−1/(k−1)`), and
    /// [`CopulaError::DimensionMismatch`] for a zero dimension.
    pub fn new(config: &CopulaConfig, dimension: usize) -> Result<Self, CopulaError> {
        config.validate()?;
        if dimension == 0 {
            return Err(CopulaError::DimensionMismatch {
                expected: 1,
                got: 0,
            });
        }
        let kind = match *config {
            CopulaConfig::Gaussian { rho } => SamplerKind::Gaussian {
                chol: CorrelationMatrix::equicorrelated(dimension, rho)?.cholesky()?,
            },
            CopulaConfig::StudentT {
                rho,
                degrees_of_freedom,
            } => SamplerKind::StudentT {
                chol: CorrelationMatrix::equicorrelated(dimension, rho)?.cholesky()?,
                nu: degrees_of_freedom,
                mixer: ChiSquared::new(degrees_of_freedom).map_err(|e| {
                    CopulaError::invalid_parameters("student_t", e.to_string())
                })?,
                marginal: StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
                    CopulaError::invalid_parameters("student_t", e.to_string())
                })?,
            },
            CopulaConfig::Clayton { theta } => SamplerKind::Clayton { theta },
            CopulaConfig::Gumbel { theta } => SamplerKind::Gumbel { theta },
        };
        Ok(Self { dimension, kind })
    }

    /// A sampler emitting independent uniforms, used when no copula is
    /// configured and for marginal re-simulation.
    pub fn independent(dimension: usize) -> Self {
        Self {
            dimension,
            kind: SamplerKind::Independent,
        }
    }

    /// Number of coupled variables per draw.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The configured family, or `None` for the independent sampler.
    pub fn family(&self) -> Option<CopulaFamily> {
        match self.kind {
            SamplerKind::Independent => None,
            SamplerKind::Gaussian { .. } => Some(CopulaFamily::Gaussian),
            SamplerKind::StudentT { .. } => Some(CopulaFamily::StudentT),
            SamplerKind::Clayton { .. } => Some(CopulaFamily::Clayton),
            SamplerKind::Gumbel { .. } => Some(CopulaFamily::Gumbel),
        }
    }

    /// Draws one coupled uniform vector into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from the sampler dimension.
    pub fn sample_into<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        assert_eq!(
            out.len(),
            self.dimension,
            "output buffer length must equal the copula dimension"
        );
        match &self.kind {
            SamplerKind::Independent => {
                for u in out.iter_mut() {
                    *u = clamp_open(rng.gen());
                }
            }
            SamplerKind::Gaussian { chol } => {
                fill_standard_normal(rng, out);
                lower_triangular_mul_in_place(chol, out);
                for u in out.iter_mut() {
                    *u = clamp_open(norm_cdf(*u));
                }
            }
            SamplerKind::StudentT {
                chol,
                nu,
                mixer,
                marginal,
            } => {
                fill_standard_normal(rng, out);
                lower_triangular_mul_in_place(chol, out);
                let g: f64 = mixer.sample(rng);
                let scale = (nu / g.max(f64::MIN_POSITIVE)).sqrt();
                for u in out.iter_mut() {
                    *u = clamp_open(marginal.cdf(*u * scale));
                }
            }
            SamplerKind::Clayton { theta } => sample_clayton(rng, *theta, out),
            SamplerKind::Gumbel { theta } => sample_gumbel(rng, *theta, out),
        }
    }

    /// Draws `n` coupled uniform vectors, allocating one `Vec` per draw.
    /// The hot loop should prefer [`CopulaSampler::sample_into`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|_| {
                let mut out = vec![0.0; self.dimension];
                self.sample_into(rng, &mut out);
                out
            })
            .collect()
    }
}

#[inline]
fn clamp_open(u: f64) -> f64 {
    u.clamp(UNIFORM_FLOOR, 1.0 - UNIFORM_FLOOR)
}

fn fill_standard_normal<R: Rng + ?Sized>(rng: &mut R, out: &mut [f64]) {
    for z in out.iter_mut() {
        *z = rng.sample(StandardNormal);
    }
}

/// `z ← L·z` for lower-triangular `L`, in place. Rows are processed last to
/// first so each row still reads the original inputs below it.
fn lower_triangular_mul_in_place(l: &[f64], z: &mut [f64]) {
    let n = z.len();
    for i in (0..n).rev() {
        let mut y = 0.0;
        for j in 0..=i {
            y += l[i * n + j] * z[j];
        }
        z[i] = y;
    }
}

/// Conditional-distribution sampling of the k-dimensional Clayton copula.
///
/// Writing `S_j = Σ_{i≤j} u_i^{-θ} - (j-1)`, the conditional CDF of the
/// next coordinate solves in closed form:
/// `u_{j+1} = (S_j·(w-1) + 1)^{-1/θ}` with `w = v^{-θ/(1+θ·j)}` for a fresh
/// uniform `v`, and `S_{j+1} = S_j·w`.
fn sample_clayton<R: Rng + ?Sized>(rng: &mut R, theta: f64, out: &mut [f64]) {
    if out.is_empty() {
        return;
    }
    let first = clamp_open(rng.gen());
    out[0] = first;
    let mut s = first.powf(-theta);
    for j in 1..out.len() {
        let v = clamp_open(rng.gen());
        let w = v.powf(-theta / (1.0 + theta * j as f64));
        out[j] = clamp_open((s * (w - 1.0) + 1.0).powf(-1.0 / theta));
        s *= w;
    }
}

/// Marshall-Olkin sampling of the Gumbel copula: one positive-stable
/// frailty `S` shared across coordinates, then `u_i = exp(-(E_i/S)^{1/θ})`
/// for iid unit exponentials.
fn sample_gumbel<R: Rng + ?Sized>(rng: &mut R, theta: f64, out: &mut [f64]) {
    if theta <= 1.0 {
        // θ = 1 is exact independence
        for u in out.iter_mut() {
            *u = clamp_open(rng.gen());
        }
        return;
    }
    let alpha = 1.0 / theta;
    let s = positive_stable(rng, alpha);
    for u in out.iter_mut() {
        let e: f64 = rng.sample(Exp1);
        *u = clamp_open((-(e / s).powf(alpha)).exp());
    }
}

/// Kanter's representation of the positive stable law with Laplace
/// transform `exp(-t^α)`, `0 < α < 1`.
fn positive_stable<R: Rng + ?Sized>(rng: &mut R, alpha: f64) -> f64 {
    let v: f64 = clamp_open(rng.gen());
    let w: f64 = rng.sample(Exp1);
    let pv = std::f64::consts::PI * v;
    (alpha * pv).sin() * ((1.0 - alpha) * pv).sin().powf((1.0 - alpha) / alpha)
        / pv.sin().powf(1.0 / alpha)
        / w.powf((1.0 - alpha) / alpha)
}

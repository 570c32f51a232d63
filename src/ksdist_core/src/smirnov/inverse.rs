//! # Inverse survival function
//!
//! There is no closed form inverse in general, so the quantile is found with a
//! bracketed Newton iteration against any [`SurvivalFunction`].
// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::config::SmirnovConfig;
use crate::fitting::bracketed_newton;
use crate::smirnov::{SurvivalFunction, smirnov_asymptotic_quantile};

/// Relative step used for the central difference derivative estimate.
const DERIVATIVE_STEP: f64 = 1e-7;

/// How a [`Quantile`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionStatus {
    /// Boundary convention or closed form, no iteration was needed.
    Exact,

    /// Root finder reached the requested tolerance.
    Converged {
        /// Iterations used.
        iterations: usize,
    },

    /// Root finder stopped early, the value is the best available estimate.
    NotConverged {
        /// Iterations used.
        iterations: usize,
    },

    /// Input was outside of the domain, the value is NaN.
    Invalid,
}

/// Result of inverting a survival function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    /// Threshold `x` whose survival probability is the requested `p`.
    pub x: f64,

    /// How the threshold was found.
    pub status: InversionStatus,
}

impl Quantile {
    /// Quantile known without iteration.
    pub(crate) fn exact(x: f64) -> Self {
        Self {
            x,
            status: InversionStatus::Exact,
        }
    }

    /// Quantile for inputs outside of the domain.
    pub(crate) fn invalid() -> Self {
        Self {
            x: f64::NAN,
            status: InversionStatus::Invalid,
        }
    }

    /// True when the value is exact or the root finder converged.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        matches!(
            self.status,
            InversionStatus::Exact | InversionStatus::Converged { .. }
        )
    }
}

/// Find `x` such that `dist.sf(n, x) == p`.
///
/// The root is bracketed between `1 - p^(1/n)`, below which the first order
/// statistic alone exceeds the probability, and the one-sided DKW bound
/// `sqrt(-ln(p) / 2n)`. Either side is widened to the edge of `[0, 1]` when it does
/// not bracket the root, which can happen for approximations of the distribution.
/// The iteration is seeded from the inverse of the asymptotic approximation and uses
/// a central difference estimate of the derivative.
///
/// `dist` must satisfy the [`SurvivalFunction`] contract, most importantly being
/// non-increasing in `x`, otherwise the returned value may not be a root.
///
/// NaN `p` or `n == 0` gives NaN, `p <= 0` gives 1 and `p >= 1` gives 0.
#[must_use]
pub fn invert_survival<S>(dist: &S, n: u64, p: f64, config: &SmirnovConfig) -> Quantile
where
    S: SurvivalFunction + ?Sized,
{
    if p.is_nan() || n == 0 {
        return Quantile::invalid();
    }
    if p <= 0.0 {
        return Quantile::exact(1.0);
    }
    if p >= 1.0 {
        return Quantile::exact(0.0);
    }
    let n_f = n as f64;

    let func = |x: f64| dist.sf(n, x) - p;
    let der = |x: f64| {
        let step = DERIVATIVE_STEP * x.max(1e-3);
        let low = (x - step).max(0.0);
        let high = (x + step).min(1.0);
        (dist.sf(n, high) - dist.sf(n, low)) / (high - low)
    };

    let mut lower = 1.0 - p.powf(1.0 / n_f);
    if func(lower) <= 0.0 {
        lower = 0.0;
    }
    let mut upper = (-p.ln() / (2.0 * n_f)).sqrt().min(1.0);
    if func(upper) >= 0.0 {
        upper = 1.0;
    }
    let start = smirnov_asymptotic_quantile(n, p);

    match bracketed_newton(
        func,
        der,
        (lower, upper),
        start,
        config.rtol,
        config.max_iterations,
    ) {
        Ok(root) if root.converged => Quantile {
            x: root.x,
            status: InversionStatus::Converged {
                iterations: root.iterations,
            },
        },
        Ok(root) => {
            log::debug!(
                "Inverse for n={n}, p={p} did not converge in {} iterations, best estimate {}.",
                root.iterations,
                root.x
            );
            Quantile {
                x: root.x,
                status: InversionStatus::NotConverged {
                    iterations: root.iterations,
                },
            }
        }
        Err(err) => {
            log::warn!("Inverse for n={n}, p={p} failed: {err}");
            Quantile {
                x: 0.5 * (lower + upper),
                status: InversionStatus::NotConverged { iterations: 0 },
            }
        }
    }
}

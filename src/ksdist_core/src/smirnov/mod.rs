//! # Smirnov distribution
//!
//! Distribution of the one-sided Kolmogorov-Smirnov statistic
//! `D_n+ = sup_t (F_n(t) - F(t))` for `n` samples of a continuous distribution.
//!
//! [`smirnov`] gives the survival function `P(D_n+ >= x)`, and [`smirnovi`] its
//! inverse. Samples up to the crossover set by [`SmirnovConfig`] are evaluated with
//! the exact finite sum. Above it the asymptotic expansion is used, except close to
//! `x = 0` where the short complementary sum is both exact and cheap.
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

mod asymptotic;
mod exact;
mod inverse;

pub use self::asymptotic::{smirnov_asymptotic, smirnov_asymptotic_quantile};
pub use self::exact::{smirnov_exact, smirnov_exact_small_x};
pub use self::inverse::{InversionStatus, Quantile, invert_survival};

use crate::config::SmirnovConfig;
use crate::errors::KsResult;

/// Above the crossover, `n x` below this uses [`smirnov_exact_small_x`].
///
/// The asymptotic expansion is slightly below the exact value here, so the
/// dispatched result stays non-increasing in both `x` and `n` across the switch.
pub const SMALL_X_MAX_NX: f64 = 9.0;

/// Survival function of a statistic indexed by a sample size.
///
/// Implementations must return 1 for `x <= 0`, 0 for `x >= 1`, NaN for NaN `x` or
/// `n == 0`, and must be non-increasing in `x`. [`invert_survival`] relies on the
/// monotonicity to keep its bracket valid.
pub trait SurvivalFunction {
    /// Probability that the statistic for `n` samples is at least `x`.
    fn sf(&self, n: u64, x: f64) -> f64;
}

/// Exact finite sum for every sample size, see [`smirnov_exact`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl SurvivalFunction for Exact {
    fn sf(&self, n: u64, x: f64) -> f64 {
        smirnov_exact(n, x)
    }
}

/// Asymptotic approximation for every sample size, see [`smirnov_asymptotic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asymptotic;

impl SurvivalFunction for Asymptotic {
    fn sf(&self, n: u64, x: f64) -> f64 {
        smirnov_asymptotic(n, x)
    }
}

/// Smirnov distribution, choosing the exact or asymptotic evaluation by sample size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Smirnov {
    config: SmirnovConfig,
}

impl Smirnov {
    /// Construct with the provided configuration.
    ///
    /// # Errors
    /// [`crate::errors::Error::ValueError`] if the configuration is invalid.
    pub fn new(config: SmirnovConfig) -> KsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SmirnovConfig {
        &self.config
    }

    /// Probability that the one-sided statistic of `n` samples is at least `x`.
    ///
    /// NaN for NaN `x` or `n == 0`, 1 for `x <= 0` and 0 for `x >= 1`.
    #[must_use]
    pub fn sf(&self, n: u64, x: f64) -> f64 {
        if x.is_nan() || n == 0 {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 1.0;
        }
        if x >= 1.0 {
            return 0.0;
        }
        let n_f = n as f64;
        if n_f * (1.0 - x) <= 1.0 {
            // Only the first term of the exact sum is non-zero here.
            return (1.0 - x).powf(n_f);
        }
        if n <= self.config.exact_max_n {
            smirnov_exact(n, x)
        } else if n_f * x < SMALL_X_MAX_NX {
            smirnov_exact_small_x(n, x)
        } else {
            smirnov_asymptotic(n, x)
        }
    }

    /// Threshold `x` where the survival function of `n` samples equals `p`.
    ///
    /// NaN for NaN `p` or `n == 0`, 1 for `p <= 0` and 0 for `p >= 1`. The returned
    /// [`Quantile`] records whether the value is reliable.
    #[must_use]
    pub fn isf(&self, n: u64, p: f64) -> Quantile {
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
        if n == 1 || p <= n_f.powf(-n_f) {
            // Inverse of (1 - x)^n, valid for x >= 1 - 1/n.
            return Quantile::exact(1.0 - p.powf(1.0 / n_f));
        }
        invert_survival(self, n, p, &self.config)
    }
}

impl SurvivalFunction for Smirnov {
    fn sf(&self, n: u64, x: f64) -> f64 {
        Self::sf(self, n, x)
    }
}

/// Probability that the one-sided KS statistic of `n` samples is at least `x`.
///
/// Uses the default [`SmirnovConfig`].
///
/// ```
///     use ksdist_core::smirnov::smirnov;
///     assert!((smirnov(2, 0.875) - 0.015625).abs() < 1e-15);
///     assert_eq!(smirnov(10, 0.0), 1.0);
///     assert_eq!(smirnov(10, 1.0), 0.0);
///     assert!(smirnov(10, f64::NAN).is_nan());
/// ```
#[must_use]
pub fn smirnov(n: u64, x: f64) -> f64 {
    Smirnov::default().sf(n, x)
}

/// Inverse of [`smirnov`], the threshold `x` with `smirnov(n, x) == p`.
///
/// Uses the default [`SmirnovConfig`]. Use [`Smirnov::isf`] to find out whether the
/// root finder converged.
///
/// ```
///     use ksdist_core::smirnov::{smirnov, smirnovi};
///     let x = smirnovi(10, 0.5);
///     assert!((x - 0.17157867006).abs() < 1e-10);
///     assert!((smirnov(10, x) - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn smirnovi(n: u64, p: f64) -> f64 {
    Smirnov::default().isf(n, p).x
}

#[cfg(test)]
mod tests {
    use super::{
        InversionStatus, SMALL_X_MAX_NX, Smirnov, smirnov, smirnov_asymptotic, smirnov_exact,
        smirnov_exact_small_x, smirnovi,
    };
    use crate::config::SmirnovConfig;

    #[test]
    fn test_dispatch() {
        let smirnov_dist = Smirnov::new(SmirnovConfig {
            exact_max_n: 100,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(smirnov_dist.sf(100, 0.1), smirnov_exact(100, 0.1));
        assert_eq!(smirnov_dist.sf(101, 0.1), smirnov_asymptotic(101, 0.1));
        assert_eq!(smirnov_dist.sf(101, 0.05), smirnov_exact_small_x(101, 0.05));

        // The closed form tail is used regardless of the crossover.
        let x = 1.0 - 1.0 / 400.0;
        assert_eq!(smirnov_dist.sf(200, x), (1.0 - x).powf(200.0));
    }

    #[test]
    fn test_invalid_config() {
        let res = Smirnov::new(SmirnovConfig {
            exact_max_n: 0,
            ..Default::default()
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_monotone_across_crossover() {
        let crossover = SmirnovConfig::default().exact_max_n;
        for t in [0.001, 0.005, 0.0085, 0.0095, 0.05, 0.5, 1.0, 2.0, 3.0, 5.0] {
            let x = t / (crossover as f64).sqrt();
            assert!(smirnov(crossover + 1, x) <= smirnov(crossover, x), "t={t}");
        }
    }

    #[test]
    fn test_monotone_across_small_x_switch() {
        for n in [1_000_001_u64, 3_000_000, 50_000_000] {
            let x = SMALL_X_MAX_NX / n as f64;
            let below = smirnov(n, x * (1.0 - 1e-9));
            let above = smirnov(n, x);
            assert!(above <= below, "n={n}");
            assert!((above - below).abs() < 1e-12);
        }
    }

    #[test]
    fn test_closed_form_inverse() {
        let smirnov_dist = Smirnov::default();
        let quantile = smirnov_dist.isf(1, 0.4);
        assert_eq!(quantile.status, InversionStatus::Exact);
        assert!((quantile.x - 0.6).abs() < 1e-15);

        // p = (1/8)^2 lies on the (1 - x)^n segment.
        let quantile = smirnov_dist.isf(2, 0.125 * 0.125);
        assert_eq!(quantile.status, InversionStatus::Exact);
        assert!((quantile.x - 0.875).abs() < 1e-15);
    }

    #[test]
    fn test_iterative_inverse() {
        let quantile = Smirnov::default().isf(20, 0.3);
        assert!(matches!(
            quantile.status,
            InversionStatus::Converged { .. }
        ));
        assert!((smirnov(20, quantile.x) - 0.3).abs() < 1e-12);
        assert_eq!(smirnovi(20, 0.3), quantile.x);
    }
}

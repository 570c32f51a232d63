//! # Kolmogorov distribution
//!
//! Limiting distribution of the two-sided statistic `sqrt(n) D_n` as `n` grows.
//!
//! The survival function is the alternating series
//! `2 sum_{k>=1} (-1)^(k-1) exp(-2 k^2 t^2)`, which converges in a handful of terms
//! for `t >= 1`. For small `t` the series cancels badly, and the Jacobi theta
//! transformed form `sqrt(2 pi) / t sum_{k>=1} exp(-(2k-1)^2 pi^2 / (8 t^2))` of the
//! CDF is used instead.
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

use std::f64::consts::PI;

use crate::config::SmirnovConfig;
use crate::fitting::bracketed_newton;

/// Stop summing once a term falls below this fraction of the running sum.
const SERIES_RTOL: f64 = 1e-16;

/// Hard limit on the number of series terms.
const MAX_TERMS: usize = 100;

/// Below this the theta transformed series is used.
const SWITCH_POINT: f64 = 1.0;

/// Exponent scale of the theta transformed terms, `(2k - 1)^2 pi^2 / 8`.
fn theta_exponent(k: usize) -> f64 {
    let odd = (2 * k - 1) as f64;
    odd * odd * PI * PI / 8.0
}

/// Survival function of the Kolmogorov distribution, `P(K >= t)`.
///
/// NaN for NaN `t`, 1 for `t <= 0`.
///
/// ```
///     use ksdist_core::kolmogorov::kolmogorov;
///     assert!((kolmogorov(1.0) - 0.269_999_671_677_354_5).abs() < 1e-15);
///     assert_eq!(kolmogorov(0.0), 1.0);
/// ```
#[must_use]
pub fn kolmogorov(t: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t <= 0.0 {
        return 1.0;
    }
    if t < SWITCH_POINT {
        let t2 = t * t;
        let mut total = 0.0;
        for k in 1..=MAX_TERMS {
            let term = (-theta_exponent(k) / t2).exp();
            total += term;
            if term <= SERIES_RTOL * total {
                break;
            }
        }
        let cdf = (2.0 * PI).sqrt() / t * total;
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    let t2 = t * t;
    let mut total = 0.0;
    let mut sign = 1.0;
    for k in 1..=MAX_TERMS {
        let k_f = k as f64;
        let term = (-2.0 * k_f * k_f * t2).exp();
        total += sign * term;
        if term <= SERIES_RTOL * total.abs() {
            break;
        }
        sign = -sign;
    }
    (2.0 * total).clamp(0.0, 1.0)
}

/// Density of the Kolmogorov distribution.
///
/// NaN for NaN `t`, 0 for `t <= 0` and infinite `t`.
#[must_use]
pub fn kolmogorov_pdf(t: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t <= 0.0 || t.is_infinite() {
        return 0.0;
    }
    let t2 = t * t;
    if t < SWITCH_POINT {
        let mut total = 0.0;
        for k in 1..=MAX_TERMS {
            let a_k = theta_exponent(k);
            let term = (-a_k / t2).exp() * (2.0 * a_k / (t2 * t2) - 1.0 / t2);
            total += term;
            if term.abs() <= SERIES_RTOL * total.abs() {
                break;
            }
        }
        return ((2.0 * PI).sqrt() * total).max(0.0);
    }

    let mut total = 0.0;
    let mut sign = 1.0;
    for k in 1..=MAX_TERMS {
        let k2 = (k * k) as f64;
        let term = k2 * (-2.0 * k2 * t2).exp();
        total += sign * term;
        if term <= SERIES_RTOL * total.abs() {
            break;
        }
        sign = -sign;
    }
    (8.0 * t * total).max(0.0)
}

/// Inverse of [`kolmogorov`], the `t` with `kolmogorov(t) == p`.
///
/// Uses the tolerance and iteration limit of the default [`SmirnovConfig`], see
/// [`kolmogi_with_config`] to change them.
///
/// NaN for NaN `p`, infinity for `p <= 0` and 0 for `p >= 1`.
///
/// ```
///     use ksdist_core::kolmogorov::{kolmogi, kolmogorov};
///     let t = kolmogi(0.05);
///     assert!((t - 1.358_098_639_322_550_6).abs() < 1e-12);
///     assert!((kolmogorov(t) - 0.05).abs() < 1e-14);
/// ```
#[must_use]
pub fn kolmogi(p: f64) -> f64 {
    kolmogi_with_config(p, &SmirnovConfig::default())
}

/// Inverse of [`kolmogorov`] using the `rtol` and `max_iterations` of `config`.
///
/// The crossover setting is not used. A result which did not converge is logged and
/// returned as the best estimate.
#[must_use]
pub fn kolmogi_with_config(p: f64, config: &SmirnovConfig) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::INFINITY;
    }
    if p >= 1.0 {
        return 0.0;
    }

    // Leading term of the alternating series.
    let guess = (-(0.5 * p).ln() / 2.0).sqrt();

    match bracketed_newton(
        |t| kolmogorov(t) - p,
        |t| -kolmogorov_pdf(t),
        (0.0, guess + 1.0),
        guess,
        config.rtol,
        config.max_iterations,
    ) {
        Ok(root) => {
            if !root.converged {
                log::debug!(
                    "kolmogi({p}) did not converge in {} iterations.",
                    root.iterations
                );
            }
            root.x
        }
        Err(err) => {
            log::warn!("kolmogi({p}) failed: {err}");
            f64::NAN
        }
    }
}

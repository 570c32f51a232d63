//! # Bracketed Newton's method
//!
//! Newton-Raphson which falls back to bisection whenever a step would leave the
//! bracket, or is not shrinking quickly enough.
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

use crate::fitting::{ConvergenceError, FittingResult, Root};

/// Solve root using a safeguarded Newton-Raphson method.
///
/// The function must change sign between the two bounds. Every evaluation is used to
/// tighten the bracket, so the method always converges for continuous functions,
/// quadratically near simple roots and no slower than bisection otherwise.
/// The derivative may be approximate, a poor derivative only costs extra bisection
/// steps.
///
/// ```
///     use ksdist_core::fitting::bracketed_newton;
///     let f = |x: f64| { x * x - 2.0 };
///     let d = |x| { 2.0 * x };
///     let root = bracketed_newton(f, d, (0.0, 3.0), 1.0, 1e-14, 100).unwrap();
///     assert!(root.converged);
///     assert!((root.x - 2_f64.sqrt()).abs() < 1e-12);
/// ```
///
/// # Arguments
/// * `func` - Function for which the root is desired.
/// * `der` - Derivative, or an estimate of the derivative, of the function.
/// * `bounds` - Lower and upper ends of the bracket containing the root.
/// * `start` - Initial guess, the midpoint is used if this is outside the bracket.
/// * `rtol` - Relative tolerance on the root.
/// * `max_iter` - Maximum number of iterations.
///
/// # Errors
///
/// [`ConvergenceError`] may be returned in the following cases:
///     - Any function evaluation returns a non-finite value.
///     - The function has the same sign at both bounds.
#[allow(
    clippy::missing_panics_doc,
    reason = "By construction this cannot panic."
)]
pub fn bracketed_newton<T>(
    func: impl Fn(T) -> T,
    der: impl Fn(T) -> T,
    bounds: (T, T),
    start: T,
    rtol: T,
    max_iter: usize,
) -> FittingResult<Root<T>>
where
    T: num_traits::Float,
{
    let (mut low, mut high) = if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    };
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();

    let f_low = func(low);
    let f_high = func(high);
    if !f_low.is_finite() || !f_high.is_finite() {
        Err(ConvergenceError::NonFinite)?;
    }
    if f_low.is_zero() {
        return Ok(Root {
            x: low,
            iterations: 0,
            converged: true,
        });
    }
    if f_high.is_zero() {
        return Ok(Root {
            x: high,
            iterations: 0,
            converged: true,
        });
    }
    if (f_low > T::zero()) == (f_high > T::zero()) {
        Err(ConvergenceError::InvalidBracket)?;
    }
    let low_positive = f_low > T::zero();

    let mut x = if start > low && start < high {
        start
    } else {
        half * (low + high)
    };
    let mut step_before_last = high - low;
    let mut last_step = step_before_last;

    for iteration in 1..=max_iter {
        let f_eval = func(x);
        if !f_eval.is_finite() {
            Err(ConvergenceError::NonFinite)?;
        }
        if f_eval.is_zero() {
            return Ok(Root {
                x,
                iterations: iteration,
                converged: true,
            });
        }

        if (f_eval > T::zero()) == low_positive {
            low = x;
        } else {
            high = x;
        }

        let d_eval = der(x);
        let newton = x - f_eval / d_eval;

        // Comparisons against NaN are false, so a zero or non-finite derivative
        // falls through to bisection as well.
        let next = if newton > low
            && newton < high
            && (two * f_eval).abs() <= (step_before_last * d_eval).abs()
        {
            newton
        } else {
            half * (low + high)
        };

        step_before_last = last_step;
        last_step = next - x;
        x = next;

        let tol = rtol * x.abs();
        if last_step.abs() <= tol || high - low <= tol {
            return Ok(Root {
                x,
                iterations: iteration,
                converged: true,
            });
        }
    }
    Ok(Root {
        x,
        iterations: max_iter,
        converged: false,
    })
}

//! # Batch evaluation
//!
//! Element-wise evaluation over slices of sample sizes and arguments, in parallel.
//! A slice of length one is broadcast against the other input. A bad element only
//! produces NaN in its own slot, the rest of the batch is still evaluated.
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

use rayon::prelude::*;

use crate::errors::{Error, KsResult};
use crate::smirnov::Smirnov;

/// Length of the result of broadcasting two inputs together.
///
/// # Errors
/// [`Error::ShapeMismatch`] if the lengths differ and neither is one.
pub fn broadcast_len(left: usize, right: usize) -> KsResult<usize> {
    match (left, right) {
        (a, b) if a == b => Ok(a),
        (1, b) => Ok(b),
        (a, 1) => Ok(a),
        (a, b) => Err(Error::ShapeMismatch(a, b)),
    }
}

/// Apply `func` element-wise over two broadcast inputs, in parallel.
///
/// ```
///     use ksdist_core::batch::broadcast_map;
///     let out = broadcast_map(&[1.0, 2.0, 3.0], &[10.0], |a: f64, b: f64| a * b).unwrap();
///     assert_eq!(out, vec![10.0, 20.0, 30.0]);
/// ```
///
/// # Errors
/// [`Error::ShapeMismatch`] if the inputs cannot be broadcast together.
pub fn broadcast_map<A, B, R>(
    left: &[A],
    right: &[B],
    func: impl Fn(A, B) -> R + Sync,
) -> KsResult<Vec<R>>
where
    A: Copy + Sync,
    B: Copy + Sync,
    R: Send,
{
    let len = broadcast_len(left.len(), right.len())?;
    let pick_left = |idx: usize| if left.len() == 1 { left[0] } else { left[idx] };
    let pick_right = |idx: usize| if right.len() == 1 { right[0] } else { right[idx] };
    Ok((0..len)
        .into_par_iter()
        .with_min_len(100)
        .map(|idx| func(pick_left(idx), pick_right(idx)))
        .collect())
}

impl Smirnov {
    /// Evaluate [`Smirnov::sf`] element-wise.
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if the inputs cannot be broadcast together.
    pub fn sf_batch(&self, n: &[u64], x: &[f64]) -> KsResult<Vec<f64>> {
        broadcast_map(n, x, |n, x| self.sf(n, x))
    }

    /// Evaluate [`Smirnov::isf`] element-wise, returning only the quantiles.
    ///
    /// Elements which fail to converge are logged by the inverse.
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if the inputs cannot be broadcast together.
    pub fn isf_batch(&self, n: &[u64], p: &[f64]) -> KsResult<Vec<f64>> {
        broadcast_map(n, p, |n, p| self.isf(n, p).x)
    }
}

/// Element-wise [`crate::smirnov::smirnov`] with the default configuration.
///
/// # Errors
/// [`Error::ShapeMismatch`] if the inputs cannot be broadcast together.
pub fn smirnov_batch(n: &[u64], x: &[f64]) -> KsResult<Vec<f64>> {
    Smirnov::default().sf_batch(n, x)
}

/// Element-wise [`crate::smirnov::smirnovi`] with the default configuration.
///
/// # Errors
/// [`Error::ShapeMismatch`] if the inputs cannot be broadcast together.
pub fn smirnovi_batch(n: &[u64], p: &[f64]) -> KsResult<Vec<f64>> {
    Smirnov::default().isf_batch(n, p)
}

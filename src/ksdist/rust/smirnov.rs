//! Kolmogorov-Smirnov distribution functions.
use itertools::Itertools;
use ksdist_core::prelude::{kolmogi, kolmogorov, smirnov_batch, smirnovi_batch};
use pyo3::{PyResult, pyfunction};

use crate::utils::MaybeVec;

/// Sample sizes below one are outside of the domain, they are mapped to 0 which
/// evaluates to NaN.
fn sample_sizes(n: Vec<i64>) -> Vec<u64> {
    n.into_iter()
        .map(|n| u64::try_from(n).unwrap_or(0))
        .collect_vec()
}

/// Probability that the one-sided Kolmogorov-Smirnov statistic is at least `x`.
///
/// Inputs are broadcast against one another, a list of length one is repeated.
///
/// Parameters
/// ----------
/// n:
///     Number of samples, values below 1 give NaN.
/// x:
///     Threshold of the statistic.
#[pyfunction]
#[pyo3(name = "smirnov")]
pub fn smirnov_py(n: MaybeVec<i64>, x: MaybeVec<f64>) -> PyResult<MaybeVec<f64>> {
    let single = n.is_single() && x.is_single();
    let n = sample_sizes(n.into());
    let x: Vec<f64> = x.into();
    Ok(MaybeVec::from_results(smirnov_batch(&n, &x)?, single))
}

/// Inverse of `smirnov`, the threshold whose survival probability is `p`.
///
/// Inputs are broadcast against one another, a list of length one is repeated.
///
/// Parameters
/// ----------
/// n:
///     Number of samples, values below 1 give NaN.
/// p:
///     Probability.
#[pyfunction]
#[pyo3(name = "smirnovi")]
pub fn smirnovi_py(n: MaybeVec<i64>, p: MaybeVec<f64>) -> PyResult<MaybeVec<f64>> {
    let single = n.is_single() && p.is_single();
    let n = sample_sizes(n.into());
    let p: Vec<f64> = p.into();
    Ok(MaybeVec::from_results(smirnovi_batch(&n, &p)?, single))
}

/// Survival function of the limiting two-sided Kolmogorov distribution.
///
/// Parameters
/// ----------
/// t:
///     Scaled statistic, `sqrt(n) D_n`.
#[pyfunction]
#[pyo3(name = "kolmogorov")]
pub fn kolmogorov_py(t: MaybeVec<f64>) -> MaybeVec<f64> {
    let single = t.is_single();
    let t: Vec<f64> = t.into();
    MaybeVec::from_results(t.into_iter().map(kolmogorov).collect_vec(), single)
}

/// Inverse of `kolmogorov`.
///
/// Parameters
/// ----------
/// p:
///     Probability.
#[pyfunction]
#[pyo3(name = "kolmogi")]
pub fn kolmogi_py(p: MaybeVec<f64>) -> MaybeVec<f64> {
    let single = p.is_single();
    let p: Vec<f64> = p.into();
    MaybeVec::from_results(p.into_iter().map(kolmogi).collect_vec(), single)
}

//! Python bindings for the Kolmogorov-Smirnov distributions in `ksdist_core`.
use pyo3::prelude::*;

pub mod smirnov;
pub mod utils;

/// Python module definition.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(smirnov::smirnov_py, m)?)?;
    m.add_function(wrap_pyfunction!(smirnov::smirnovi_py, m)?)?;
    m.add_function(wrap_pyfunction!(smirnov::kolmogorov_py, m)?)?;
    m.add_function(wrap_pyfunction!(smirnov::kolmogi_py, m)?)?;
    Ok(())
}

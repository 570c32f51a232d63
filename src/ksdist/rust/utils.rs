//! General purpose utility types for the Python interface.

use pyo3::prelude::*;

/// Polymorphic support for a single value or a vector of values.
#[derive(Debug, FromPyObject, IntoPyObject)]
pub enum MaybeVec<T> {
    /// A single value of type T.
    Single(T),

    /// A vector of values of type T.
    Multiple(Vec<T>),
}

impl<T> MaybeVec<T> {
    /// True if this holds a single value.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Wrap results, returning a scalar only when every input was a scalar.
    ///
    /// A list of length one passed in from Python stays a list.
    pub fn from_results(values: Vec<T>, single: bool) -> Self {
        match <[T; 1]>::try_from(values) {
            Ok([value]) if single => Self::Single(value),
            Ok(values) => Self::Multiple(values.into()),
            Err(values) => Self::Multiple(values),
        }
    }
}

impl<T> From<MaybeVec<T>> for Vec<T> {
    fn from(maybe_vec: MaybeVec<T>) -> Self {
        match maybe_vec {
            MaybeVec::Single(value) => vec![value],
            MaybeVec::Multiple(vec) => vec,
        }
    }
}

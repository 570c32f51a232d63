//! # ksdist Core
//! Distribution of the one-sample Kolmogorov-Smirnov statistic.
//!
//! [`smirnov::smirnov`] evaluates the probability that the one-sided statistic of `n`
//! samples exceeds a threshold, [`smirnov::smirnovi`] inverts it. The limiting
//! two-sided Kolmogorov distribution is available in [`kolmogorov`].
//!
//! This crate is left as a stand alone Rust crate, independent of the Python
//! wrappers.
//!

pub mod batch;
pub mod config;
pub mod errors;
pub mod fitting;
pub mod kolmogorov;
pub mod smirnov;

/// Common useful imports
pub mod prelude {
    pub use crate::batch::{smirnov_batch, smirnovi_batch};
    pub use crate::config::SmirnovConfig;
    pub use crate::errors::{Error, KsResult};
    pub use crate::kolmogorov::{kolmogi, kolmogi_with_config, kolmogorov, kolmogorov_pdf};
    pub use crate::smirnov::{
        InversionStatus, Quantile, Smirnov, SurvivalFunction, smirnov, smirnovi,
    };
}

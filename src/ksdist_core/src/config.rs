//! # Configuration
//!
//! Tunable numerical policy for the Smirnov distribution.
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

use serde::{Deserialize, Serialize};

use crate::errors::{Error, KsResult};

/// Default largest sample size evaluated with the exact finite-sample sum.
///
/// From here on the asymptotic expansion agrees with the exact sum to better than
/// `1e-10` relative. The cost of the exact sum grows linearly with `n`.
pub const DEFAULT_EXACT_MAX_N: u64 = 1_000_000;

/// Default relative tolerance on quantiles returned by the inverse.
pub const DEFAULT_RTOL: f64 = 1e-13;

/// Default iteration limit for the inverse root finder.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Environment variable overriding [`SmirnovConfig::exact_max_n`].
pub const ENV_EXACT_MAX_N: &str = "KSDIST_EXACT_MAX_N";

/// Environment variable overriding [`SmirnovConfig::rtol`].
pub const ENV_RTOL: &str = "KSDIST_RTOL";

/// Environment variable overriding [`SmirnovConfig::max_iterations`].
pub const ENV_MAX_ITERATIONS: &str = "KSDIST_MAX_ITERATIONS";

/// Numerical settings for evaluating and inverting the Smirnov distribution.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmirnovConfig {
    /// Largest sample size evaluated with the exact sum, above this the asymptotic
    /// approximation is used.
    pub exact_max_n: u64,

    /// Relative tolerance on the quantile returned by the inverse.
    pub rtol: f64,

    /// Maximum number of root finding iterations for the inverse.
    pub max_iterations: usize,
}

impl Default for SmirnovConfig {
    fn default() -> Self {
        Self {
            exact_max_n: DEFAULT_EXACT_MAX_N,
            rtol: DEFAULT_RTOL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SmirnovConfig {
    /// Check that all settings are usable.
    ///
    /// # Errors
    /// [`Error::ValueError`] if the crossover is zero, the tolerance is not in
    /// `(0, 1)`, or no iterations are allowed.
    pub fn validate(&self) -> KsResult<()> {
        if self.exact_max_n == 0 {
            Err(Error::ValueError(
                "exact_max_n must be at least 1.".into(),
            ))?;
        }
        if !(self.rtol > 0.0 && self.rtol < 1.0) {
            Err(Error::ValueError(format!(
                "rtol must be between 0 and 1, got {}.",
                self.rtol
            )))?;
        }
        if self.max_iterations == 0 {
            Err(Error::ValueError(
                "max_iterations must be at least 1.".into(),
            ))?;
        }
        Ok(())
    }

    /// Build a configuration from the `KSDIST_*` environment variables.
    ///
    /// Unset variables use the defaults, unparsable values are logged and also fall
    /// back to the defaults.
    ///
    /// # Errors
    /// [`Error::ValueError`] if the resulting configuration fails [`Self::validate`].
    pub fn from_env() -> KsResult<Self> {
        let defaults = Self::default();
        let config = Self {
            exact_max_n: env_or(ENV_EXACT_MAX_N, defaults.exact_max_n),
            rtol: env_or(ENV_RTOL, defaults.rtol),
            max_iterations: env_or(ENV_MAX_ITERATIONS, defaults.max_iterations),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Read and parse an environment variable, using the default when it is missing or
/// malformed.
fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Could not parse {name}={value:?}, using default {default}.");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_EXACT_MAX_N, SmirnovConfig, env_or};

    #[test]
    fn test_default_is_valid() {
        let config = SmirnovConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exact_max_n, DEFAULT_EXACT_MAX_N);
    }

    #[test]
    fn test_validate() {
        let config = SmirnovConfig {
            exact_max_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SmirnovConfig {
            rtol: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SmirnovConfig {
            rtol: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SmirnovConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_or_missing() {
        let val: u64 = env_or("KSDIST_TEST_VARIABLE_WHICH_IS_NEVER_SET", 17);
        assert_eq!(val, 17);
    }
}

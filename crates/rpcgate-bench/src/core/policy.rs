// rpcgate - RPC server performance gating
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tiered regression thresholds.
//!
//! A [`ThresholdPolicy`] holds one default tolerance and an optional set of
//! per-benchmark overrides. An override is an explicit map entry, so a name
//! that is absent always falls back to the default.

use crate::core::config::DEFAULT_THRESHOLD_PCT;
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default tolerance plus named overrides, all in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    default_pct: f64,
    overrides: BTreeMap<String, f64>,
}

fn validate_pct(parameter: &str, pct: f64) -> Result<f64> {
    if pct.is_finite() && pct > 0.0 {
        Ok(pct)
    } else {
        Err(BenchError::invalid_config(
            parameter,
            format!("must be a positive percentage, got {}", pct),
        ))
    }
}

impl ThresholdPolicy {
    /// Creates a policy with no overrides.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] unless `default_pct` is finite
    /// and greater than zero.
    pub fn new(default_pct: f64) -> Result<Self> {
        Ok(Self {
            default_pct: validate_pct("threshold", default_pct)?,
            overrides: BTreeMap::new(),
        })
    }

    /// Adds or replaces the override for one benchmark.
    pub fn with_override(mut self, name: impl Into<String>, pct: f64) -> Result<Self> {
        let pct = validate_pct("relaxed-threshold", pct)?;
        self.overrides.insert(name.into(), pct);
        Ok(self)
    }

    /// Applies the optional relaxed tier.
    ///
    /// * threshold and names: every name gets the relaxed threshold
    /// * threshold only: accepted, but nothing is overridden
    /// * names only: configuration error
    pub fn with_relaxed(self, pct: Option<f64>, names: Option<&[String]>) -> Result<Self> {
        match (pct, names) {
            (Some(pct), Some(names)) => names
                .iter()
                .try_fold(self, |policy, name| policy.with_override(name.as_str(), pct)),
            (Some(pct), None) => {
                validate_pct("relaxed-threshold", pct)?;
                tracing::warn!(
                    relaxed_threshold = pct,
                    "relaxed threshold given without benchmark names; it has no effect"
                );
                Ok(self)
            }
            (None, Some(_)) => Err(BenchError::invalid_config(
                "relaxed-benchmarks",
                "benchmark names require a relaxed threshold",
            )),
            (None, None) => Ok(self),
        }
    }

    /// The default threshold.
    pub fn default_pct(&self) -> f64 {
        self.default_pct
    }

    /// The explicit override for `name`, if any.
    pub fn override_for(&self, name: &str) -> Option<f64> {
        self.overrides.get(name).copied()
    }

    /// Returns `true` if `name` has an override.
    pub fn has_override(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    /// All overrides in name order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, f64)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Threshold that applies to `name`.
    pub fn effective_threshold(&self, name: &str) -> f64 {
        self.override_for(name).unwrap_or(self.default_pct)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            default_pct: DEFAULT_THRESHOLD_PCT,
            overrides: BTreeMap::new(),
        }
    }
}

/// Parses a comma-separated list of benchmark names.
///
/// Surrounding whitespace is trimmed. An empty entry such as `a,,b` or a
/// list with no names at all is a malformed override list.
pub fn parse_name_list(raw: &str) -> Result<Vec<String>> {
    let names: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return Err(BenchError::invalid_config(
            "relaxed-benchmarks",
            format!("malformed benchmark list '{}'", raw),
        ));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_default() {
        assert!(ThresholdPolicy::new(0.0).unwrap_err().is_config());
        assert!(ThresholdPolicy::new(-5.0).is_err());
        assert!(ThresholdPolicy::new(f64::NAN).is_err());
        assert!(ThresholdPolicy::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_effective_threshold() {
        let policy = ThresholdPolicy::new(20.0)
            .unwrap()
            .with_override("r", 100.0)
            .unwrap();
        assert_eq!(policy.effective_threshold("r"), 100.0);
        assert_eq!(policy.effective_threshold("other"), 20.0);
        assert!(policy.has_override("r"));
        assert!(!policy.has_override("other"));
    }

    #[test]
    fn test_rejects_non_positive_override() {
        let result = ThresholdPolicy::new(10.0).unwrap().with_override("x", 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_relaxed_with_names() {
        let names = vec!["a".to_string(), "b".to_string()];
        let policy = ThresholdPolicy::new(10.0)
            .unwrap()
            .with_relaxed(Some(50.0), Some(&names))
            .unwrap();
        assert_eq!(policy.overrides().count(), 2);
        assert_eq!(policy.effective_threshold("b"), 50.0);
    }

    #[test]
    fn test_relaxed_without_names_is_noop() {
        let policy = ThresholdPolicy::new(10.0)
            .unwrap()
            .with_relaxed(Some(50.0), None)
            .unwrap();
        assert_eq!(policy.overrides().count(), 0);
    }

    #[test]
    fn test_relaxed_without_names_still_validated() {
        let result = ThresholdPolicy::new(10.0).unwrap().with_relaxed(Some(-1.0), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_without_threshold_rejected() {
        let names = vec!["a".to_string()];
        let result = ThresholdPolicy::new(10.0).unwrap().with_relaxed(None, Some(&names));
        assert!(result.unwrap_err().is_config());
    }

    #[test]
    fn test_parse_name_list() {
        assert_eq!(
            parse_name_list(" rpc_echo , rpc_big ").unwrap(),
            vec!["rpc_echo".to_string(), "rpc_big".to_string()]
        );
        assert!(parse_name_list("a,,b").is_err());
        assert!(parse_name_list("").is_err());
        assert!(parse_name_list(" , ").is_err());
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(ThresholdPolicy::default().default_pct(), DEFAULT_THRESHOLD_PCT);
    }
}

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

//! Baseline comparison and regression detection.
//!
//! [`compare`] partitions the union of baseline and current names into
//! regressions, improvements, unchanged, new and missing. Names whose
//! baseline or current value is not positive belong to no partition.

use crate::core::policy::ThresholdPolicy;
use crate::core::store::MeasurementStore;
use serde::{Deserialize, Serialize};

/// One benchmark present in both stores with positive values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Benchmark name.
    pub name: String,
    /// Baseline value.
    pub baseline_value: f64,
    /// Current value.
    pub current_value: f64,
    /// Percentage change (positive = slower, negative = faster).
    pub delta_pct: f64,
    /// Threshold that was applied to this name.
    pub effective_threshold_pct: f64,
}

impl ComparisonEntry {
    fn new(name: &str, baseline_value: f64, current_value: f64, threshold: f64) -> Self {
        Self {
            name: name.to_string(),
            baseline_value,
            current_value,
            delta_pct: (current_value - baseline_value) / baseline_value * 100.0,
            effective_threshold_pct: threshold,
        }
    }
}

/// Classified result of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// `delta_pct > threshold`, worst first.
    pub regressions: Vec<ComparisonEntry>,
    /// `delta_pct < -threshold`, best first.
    pub improvements: Vec<ComparisonEntry>,
    /// `|delta_pct| <= threshold`, by name.
    pub unchanged: Vec<ComparisonEntry>,
    /// Only in current, by name.
    pub new: Vec<String>,
    /// Only in baseline, by name.
    pub missing: Vec<String>,
    /// Default threshold of the policy used.
    pub default_threshold_pct: f64,
}

impl ComparisonReport {
    /// Returns `true` if any benchmark regressed.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }

    /// Number of benchmarks that were actually compared.
    pub fn compared_count(&self) -> usize {
        self.regressions.len() + self.improvements.len() + self.unchanged.len()
    }
}

/// Compares `current` against `baseline` under `policy`.
///
/// Pure and deterministic: regressions are sorted by descending delta,
/// improvements by ascending delta (ties by name), everything else by name.
///
/// # Arguments
///
/// * `baseline` - Reference measurements
/// * `current` - Measurements under test
/// * `policy` - Default threshold plus per-name overrides
///
/// # Returns
///
/// The five-way partition as a [`ComparisonReport`].
pub fn compare(
    baseline: &MeasurementStore,
    current: &MeasurementStore,
    policy: &ThresholdPolicy,
) -> ComparisonReport {
    let mut report = ComparisonReport {
        default_threshold_pct: policy.default_pct(),
        ..ComparisonReport::default()
    };

    for (name, current_value) in current {
        let Some(baseline_value) = baseline.get(name) else {
            report.new.push(name.to_string());
            continue;
        };
        if baseline_value <= 0.0 || current_value <= 0.0 {
            continue;
        }

        let threshold = policy.effective_threshold(name);
        let entry = ComparisonEntry::new(name, baseline_value, current_value, threshold);
        if entry.delta_pct > threshold {
            report.regressions.push(entry);
        } else if entry.delta_pct < -threshold {
            report.improvements.push(entry);
        } else {
            report.unchanged.push(entry);
        }
    }

    report.missing = baseline
        .names()
        .filter(|name| !current.contains(name))
        .map(str::to_string)
        .collect();

    report.regressions.sort_by(|a, b| {
        b.delta_pct
            .total_cmp(&a.delta_pct)
            .then_with(|| a.name.cmp(&b.name))
    });
    report.improvements.sort_by(|a, b| {
        a.delta_pct
            .total_cmp(&b.delta_pct)
            .then_with(|| a.name.cmp(&b.name))
    });

    report
}

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

//! Cross-run noise reduction.
//!
//! Repeated runs of the same suite are reduced to one store by keeping, per
//! benchmark, the smallest value any run observed. The minimum approximates
//! best achievable performance and is always a value that was actually
//! measured.

use crate::core::result_file::{read_result_file, ResultFileOptions};
use crate::core::store::MeasurementStore;
use crate::error::{BenchError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Number of negative names spelled out in warnings before eliding.
const NEGATIVE_NAMES_SHOWN: usize = 3;

/// Reduced result of several runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Per-name minimum across runs.
    pub store: MeasurementStore,
    /// Number of runs that contributed.
    pub run_count: usize,
    /// Names whose minimum is negative.
    pub negative_names: Vec<String>,
    /// Only one run was given, so the minimum had no effect.
    pub single_run: bool,
    /// Input files that yielded nothing, with the reason.
    pub skipped: Vec<SkippedInput>,
}

impl Aggregation {
    /// One-line summary of negative names, or `None` if there are none.
    ///
    /// At most three names are listed, followed by `...` if more exist.
    pub fn negative_warning(&self) -> Option<String> {
        if self.negative_names.is_empty() {
            return None;
        }
        let shown: Vec<&str> = self
            .negative_names
            .iter()
            .take(NEGATIVE_NAMES_SHOWN)
            .map(String::as_str)
            .collect();
        let ellipsis = if self.negative_names.len() > NEGATIVE_NAMES_SHOWN {
            "..."
        } else {
            ""
        };
        Some(format!(
            "{} benchmark(s) have negative values: {}{}",
            self.negative_names.len(),
            shown.join(", "),
            ellipsis
        ))
    }
}

/// An aggregation input that contributed no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInput {
    /// The input file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Per-name minimum over `runs`.
///
/// A name present in only some runs takes the minimum over those runs.
/// An empty slice yields an empty store.
pub fn select_minimum(runs: &[MeasurementStore]) -> MeasurementStore {
    let mut result = MeasurementStore::new();
    for run in runs {
        for (name, value) in run {
            match result.get(name) {
                Some(current) if current <= value => {}
                _ => {
                    result.insert(name, value);
                }
            }
        }
    }
    result
}

/// Reduces `runs` and collects data-quality warnings.
///
/// Warnings are logged and returned; they never fail the call.
pub fn aggregate(runs: &[MeasurementStore]) -> Aggregation {
    let store = select_minimum(runs);
    let negative_names: Vec<String> = store
        .negative_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let aggregation = Aggregation {
        run_count: runs.len(),
        single_run: runs.len() == 1,
        negative_names,
        store,
        skipped: Vec::new(),
    };

    if let Some(warning) = aggregation.negative_warning() {
        tracing::warn!("{}", warning);
    }
    if aggregation.single_run {
        tracing::warn!("Only 1 run provided - minimum selection has no effect");
    }
    tracing::debug!(
        runs = aggregation.run_count,
        benchmarks = aggregation.store.len(),
        "selected minimum"
    );
    aggregation
}

/// Loads result files and reduces them.
///
/// Files that are missing, unreadable or empty are skipped with a warning.
///
/// # Errors
///
/// Returns [`BenchError::NoValidInput`] if no file yields a measurement.
pub fn aggregate_files<P: AsRef<Path>>(
    paths: &[P],
    options: &ResultFileOptions,
) -> Result<Aggregation> {
    let mut runs = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match read_result_file(path, options) {
            Ok(parsed) if !parsed.store.is_empty() => {
                tracing::info!(
                    file = %path.display(),
                    benchmarks = parsed.store.len(),
                    "loaded benchmarks"
                );
                runs.push(parsed.store);
            }
            Ok(_) => {
                let reason = "file is empty or contains no valid data".to_string();
                tracing::warn!(file = %path.display(), "Could not load benchmarks: {}", reason);
                skipped.push(SkippedInput {
                    path: path.to_path_buf(),
                    reason,
                });
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), "Could not load benchmarks: {}", e);
                skipped.push(SkippedInput {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if runs.is_empty() {
        return Err(BenchError::NoValidInput);
    }

    let mut aggregation = aggregate(&runs);
    aggregation.skipped = skipped;
    Ok(aggregation)
}

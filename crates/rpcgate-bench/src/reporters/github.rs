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

//! GitHub Actions workflow annotations.
//!
//! Each function returns ready-to-print `::level::message` lines.

use crate::analysis::aggregator::Aggregation;
use crate::analysis::comparator::ComparisonReport;
use crate::core::result_file::Diagnostic;
use crate::reporters::units::format_pct;
use std::path::Path;

/// `::error::` annotation.
pub fn error(message: impl AsRef<str>) -> String {
    format!("::error::{}", message.as_ref())
}

/// `::warning::` annotation.
pub fn warning(message: impl AsRef<str>) -> String {
    format!("::warning::{}", message.as_ref())
}

/// `::notice::` annotation.
pub fn notice(message: impl AsRef<str>) -> String {
    format!("::notice::{}", message.as_ref())
}

/// Annotations for a comparison: one per regression, new and missing
/// benchmark, then a summary line.
pub fn comparison_annotations(report: &ComparisonReport) -> Vec<String> {
    let threshold = format_pct(report.default_threshold_pct);
    let mut lines = Vec::new();

    for entry in &report.regressions {
        lines.push(error(format!(
            "{} regressed by {:.1}%",
            entry.name, entry.delta_pct
        )));
    }
    for name in &report.new {
        lines.push(notice(format!(
            "New benchmark '{}' - no baseline for comparison",
            name
        )));
    }
    for name in &report.missing {
        lines.push(warning(format!(
            "Benchmark '{}' missing from current results",
            name
        )));
    }

    if report.has_regressions() {
        lines.push(error(format!(
            "{} benchmark(s) regressed beyond {} threshold",
            report.regressions.len(),
            threshold
        )));
    } else if !report.improvements.is_empty() {
        lines.push(notice(format!(
            "{} benchmark(s) improved beyond {}",
            report.improvements.len(),
            threshold
        )));
    }
    lines
}

/// Annotations for parse diagnostics worth surfacing in CI.
///
/// Only truncation and negative values are annotated; skipped lines are
/// left to the log.
pub fn diagnostic_annotations(path: &Path, diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Truncated { max_lines } => Some(warning(format!(
                "Truncated {} after {} lines",
                path.display(),
                max_lines
            ))),
            Diagnostic::NegativeValue { line, .. } => Some(warning(format!(
                "Negative benchmark value in {} line {}",
                path.display(),
                line
            ))),
            _ => None,
        })
        .collect()
}

/// Annotations for an aggregation: skipped inputs and single-run input.
pub fn aggregation_annotations(aggregation: &Aggregation) -> Vec<String> {
    let mut lines: Vec<String> = aggregation
        .skipped
        .iter()
        .map(|s| {
            warning(format!(
                "Could not load benchmarks from {}",
                s.path.display()
            ))
        })
        .collect();
    if aggregation.single_run {
        lines.push(warning(
            "Only 1 benchmark run provided - recommend 3+ runs for stability",
        ));
    }
    lines
}

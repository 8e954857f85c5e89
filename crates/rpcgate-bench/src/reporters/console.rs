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

//! Console reporter for comparison reports and harness results.
//!
//! Renderers return `String`s so callers decide where output goes.

use crate::analysis::comparator::{ComparisonEntry, ComparisonReport};
use crate::harness::runner::BenchmarkResult;
use crate::reporters::units::{format_ns, format_pct};
use std::fmt::Write;

fn entry_table(out: &mut String, entries: &[ComparisonEntry], default_pct: f64) {
    let _ = writeln!(
        out,
        "{:<40} {:>12} {:>12} {:>10}",
        "Benchmark", "Baseline", "Current", "Delta"
    );
    let _ = writeln!(out, "{}", "-".repeat(76));
    for entry in entries {
        let _ = write!(
            out,
            "{:<40} {:>12} {:>12} {:>+9.1}%",
            entry.name,
            format_ns(entry.baseline_value),
            format_ns(entry.current_value),
            entry.delta_pct
        );
        if entry.effective_threshold_pct != default_pct {
            let _ = write!(
                out,
                "  (threshold {})",
                format_pct(entry.effective_threshold_pct)
            );
        }
        out.push('\n');
    }
    out.push('\n');
}

fn name_list(out: &mut String, rule: char, title: &str, names: &[String]) {
    let _ = writeln!(out, "{}", rule.to_string().repeat(70));
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", rule.to_string().repeat(70));
    for name in names {
        let _ = writeln!(out, "  {}", name);
    }
    out.push('\n');
}

/// Renders the full comparison report, without the verdict line.
pub fn render_comparison(report: &ComparisonReport) -> String {
    let threshold = format_pct(report.default_threshold_pct);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "=".repeat(70));
    let _ = writeln!(out, "BENCHMARK COMPARISON REPORT (threshold: {})", threshold);
    let _ = writeln!(out, "{}", "=".repeat(70));
    let _ = writeln!(out, "Total benchmarks compared: {}", report.compared_count());
    let _ = writeln!(out, "  Regressions:  {}", report.regressions.len());
    let _ = writeln!(out, "  Improvements: {}", report.improvements.len());
    let _ = writeln!(out, "  Unchanged:    {}", report.unchanged.len());
    if !report.new.is_empty() {
        let _ = writeln!(out, "  New:          {}", report.new.len());
    }
    if !report.missing.is_empty() {
        let _ = writeln!(out, "  Missing:      {}", report.missing.len());
    }
    out.push('\n');

    if !report.regressions.is_empty() {
        let _ = writeln!(out, "{}", "!".repeat(70));
        let _ = writeln!(out, "REGRESSIONS DETECTED (performance got worse)");
        let _ = writeln!(out, "{}", "!".repeat(70));
        entry_table(&mut out, &report.regressions, report.default_threshold_pct);
    }

    if !report.improvements.is_empty() {
        let _ = writeln!(out, "{}", "-".repeat(70));
        let _ = writeln!(out, "IMPROVEMENTS (performance got better)");
        let _ = writeln!(out, "{}", "-".repeat(70));
        entry_table(&mut out, &report.improvements, report.default_threshold_pct);
    }

    if !report.new.is_empty() {
        name_list(
            &mut out,
            '-',
            "NEW BENCHMARKS (no baseline for comparison)",
            &report.new,
        );
    }

    if !report.missing.is_empty() {
        name_list(
            &mut out,
            '-',
            "MISSING BENCHMARKS (in baseline but not in current)",
            &report.missing,
        );
    }

    out
}

/// Final `PASSED`/`FAILED` line.
pub fn render_verdict(report: &ComparisonReport) -> String {
    let threshold = format_pct(report.default_threshold_pct);
    if report.has_regressions() {
        format!(
            "FAILED: {} regression(s) exceed {} threshold",
            report.regressions.len(),
            threshold
        )
    } else {
        format!("PASSED: No regressions beyond {} threshold", threshold)
    }
}

/// Header of the harness results table.
pub fn result_table_header() -> String {
    format!(
        "{:<20} | {:>7} | {:>8} | {:>10} | {:>8} | {:>8} | {:>8} | {:>8} | {:>6}\n{}",
        "Scenario",
        "Clients",
        "Requests",
        "RPS",
        "p50",
        "p90",
        "p95",
        "p99",
        "Errors",
        "-".repeat(105)
    )
}

/// One row of the harness results table.
pub fn render_result_row(scenario: &str, clients: usize, result: &BenchmarkResult) -> String {
    format!(
        "{:<20} | {:>7} | {:>8} | {:>10.1} | {:>7.2}ms | {:>7.2}ms | {:>7.2}ms | {:>7.2}ms | {:>6}",
        scenario,
        clients,
        result.sample_count,
        result.throughput_per_sec,
        result.p50_ms(),
        result.p90_ms(),
        result.p95_ms(),
        result.p99_ms(),
        result.error_count
    )
}

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

//! Compare command - gates current results against a baseline

use super::{annotate, annotate_failure, Outcome};
use crate::error::CliError;
use colored::Colorize;
use rpcgate_bench::core::result_file::read_non_empty;
use rpcgate_bench::core::{parse_name_list, ParsedResults, ResultFileOptions};
use rpcgate_bench::reporters::{comparison_to_json, github, render_comparison, render_verdict};
use rpcgate_bench::ThresholdPolicy;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Report layout for `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable tables and a verdict line.
    #[default]
    Console,
    /// The full comparison report as JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" | "text" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(CliError::invalid_input(format!(
                "unknown format '{}' (expected console or json)",
                other
            ))),
        }
    }
}

/// Arguments of the `compare` command.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub baseline: PathBuf,
    pub current: PathBuf,
    pub threshold: f64,
    pub relaxed_threshold: Option<f64>,
    /// Comma-separated names, as given on the command line.
    pub relaxed_benchmarks: Option<String>,
    pub github_actions: bool,
    pub format: ReportFormat,
}

/// Compares the current results file against the baseline.
///
/// # Returns
///
/// [`Outcome::Regressed`] if any benchmark regressed beyond its effective
/// threshold, [`Outcome::Passed`] otherwise.
///
/// # Errors
///
/// Returns `Err` if:
/// - The threshold or relaxed overrides are invalid
/// - Either file is missing, unreadable or has no valid measurements
pub fn compare(options: &CompareOptions) -> Result<Outcome, CliError> {
    annotate_failure(options.github_actions, run(options))
}

fn run(options: &CompareOptions) -> Result<Outcome, CliError> {
    let relaxed_names = options
        .relaxed_benchmarks
        .as_deref()
        .map(parse_name_list)
        .transpose()?;
    let policy = ThresholdPolicy::new(options.threshold)?
        .with_relaxed(options.relaxed_threshold, relaxed_names.as_deref())?;

    let file_options = ResultFileOptions::from_env();
    let baseline = load(&options.baseline, &file_options, options.github_actions)?;
    let current = load(&options.current, &file_options, options.github_actions)?;

    let report = rpcgate_bench::compare(&baseline.store, &current.store, &policy);
    tracing::info!(
        regressions = report.regressions.len(),
        improvements = report.improvements.len(),
        unchanged = report.unchanged.len(),
        "comparison finished"
    );

    match options.format {
        ReportFormat::Console => {
            print!("{}", render_comparison(&report));
            annotate(
                options.github_actions,
                github::comparison_annotations(&report),
            );
            let verdict = render_verdict(&report);
            if report.has_regressions() {
                println!("\n{}", verdict.red().bold());
            } else {
                println!("\n{}", verdict.green().bold());
            }
        }
        ReportFormat::Json => println!("{}", comparison_to_json(&report)?),
    }

    Ok(if report.has_regressions() {
        Outcome::Regressed
    } else {
        Outcome::Passed
    })
}

fn load(
    path: &Path,
    options: &ResultFileOptions,
    github_actions: bool,
) -> Result<ParsedResults, CliError> {
    let parsed = read_non_empty(path, options)?;
    tracing::info!(
        file = %path.display(),
        benchmarks = parsed.store.len(),
        "loaded results"
    );
    annotate(
        github_actions,
        github::diagnostic_annotations(path, &parsed.diagnostics),
    );
    Ok(parsed)
}

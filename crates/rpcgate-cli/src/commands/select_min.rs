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

//! Select-min command - reduces repeated runs to per-benchmark minimums

use super::{annotate, annotate_failure, Outcome};
use crate::error::CliError;
use rpcgate_bench::aggregate_files;
use rpcgate_bench::core::result_file::{write_result_file, ResultHeader};
use rpcgate_bench::core::ResultFileOptions;
use rpcgate_bench::reporters::github;
use std::path::PathBuf;

/// Arguments of the `select-min` command.
#[derive(Debug, Clone)]
pub struct SelectMinOptions {
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    /// Title written into the result-file header.
    pub title: String,
    pub github_actions: bool,
}

/// Selects the minimum value per benchmark across `files` and writes the
/// result as a new results file.
///
/// Inputs that are missing or hold no data are skipped with a warning.
///
/// # Errors
///
/// Returns `Err` if no input yields any measurement or the output cannot
/// be written.
pub fn select_min(options: &SelectMinOptions) -> Result<Outcome, CliError> {
    annotate_failure(options.github_actions, run(options))
}

fn run(options: &SelectMinOptions) -> Result<Outcome, CliError> {
    let aggregation = aggregate_files(&options.files, &ResultFileOptions::from_env())?;
    annotate(
        options.github_actions,
        github::aggregation_annotations(&aggregation),
    );

    println!(
        "Selected minimum across {} runs for {} benchmarks",
        aggregation.run_count,
        aggregation.store.len()
    );
    let header = ResultHeader::new(options.title.as_str(), aggregation.run_count);
    write_result_file(&options.output, &aggregation.store, &header)?;
    tracing::info!(
        file = %options.output.display(),
        benchmarks = aggregation.store.len(),
        "wrote minimum results"
    );
    println!("Results written to {}", options.output.display());

    Ok(Outcome::Passed)
}

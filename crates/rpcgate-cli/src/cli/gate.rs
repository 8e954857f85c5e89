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

//! Offline gating commands.
//!
//! These operate on result files only and never contact a server.

use crate::commands::{self, CompareOptions, Outcome, SelectMinOptions};
use crate::error::CliError;
use clap::Subcommand;
use rpcgate_bench::core::DEFAULT_THRESHOLD_PCT;
use std::path::PathBuf;

/// Gating commands.
#[derive(Subcommand)]
pub enum GateCommands {
    /// Compare current results against a baseline
    ///
    /// Classifies every benchmark present in both files as regressed,
    /// improved or unchanged. Exits 1 if anything regressed beyond its
    /// threshold and 2 on invalid input.
    Compare {
        /// Baseline results file
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Current results file
        #[arg(value_name = "CURRENT")]
        current: PathBuf,

        /// Regression threshold percentage
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_PCT)]
        threshold: f64,

        /// Threshold percentage for the benchmarks in --relaxed-benchmarks
        #[arg(long, value_name = "PCT")]
        relaxed_threshold: Option<f64>,

        /// Comma-separated benchmark names that use --relaxed-threshold
        #[arg(long, value_name = "NAMES")]
        relaxed_benchmarks: Option<String>,

        /// Output GitHub Actions annotations
        #[arg(long)]
        github_actions: bool,

        /// Output format (console, json)
        #[arg(short, long, default_value = "console")]
        format: String,
    },

    /// Select the minimum result per benchmark across runs
    ///
    /// Reads several result files of the same suite and writes the smallest
    /// value seen for each benchmark. Missing or empty inputs are skipped.
    SelectMin {
        /// Result files, one per run
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output file for the minimum results
        #[arg(short, long)]
        output: PathBuf,

        /// Title written into the output header
        #[arg(long, default_value = "rpcgate")]
        title: String,

        /// Output GitHub Actions annotations
        #[arg(long)]
        github_actions: bool,
    },
}

impl GateCommands {
    /// Execute the gating command.
    pub fn execute(self) -> Result<Outcome, CliError> {
        match self {
            GateCommands::Compare {
                baseline,
                current,
                threshold,
                relaxed_threshold,
                relaxed_benchmarks,
                github_actions,
                format,
            } => commands::compare(&CompareOptions {
                baseline,
                current,
                threshold,
                relaxed_threshold,
                relaxed_benchmarks,
                github_actions,
                format: format.parse()?,
            }),
            GateCommands::SelectMin {
                files,
                output,
                title,
                github_actions,
            } => commands::select_min(&SelectMinOptions {
                files,
                output,
                title,
                github_actions,
            }),
        }
    }
}

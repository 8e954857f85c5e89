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

//! rpcgate Command Line Interface

use clap::Parser;
use colored::Colorize;
use rpcgate_cli::cli::Commands;
use rpcgate_cli::error::ERROR_EXIT_CODE;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// rpcgate - RPC server performance gating
///
/// Measures an XML-RPC server under concurrent load, reduces repeated
/// benchmark runs to their minimum and gates results against a baseline.
///
/// # Examples
///
/// ```bash
/// # Throughput sweep against a local server
/// rpcgate rps --port 8080 --clients 1,4,16 --output csv
///
/// # Minimum of three runs
/// rpcgate select-min run1.txt run2.txt run3.txt -o current.txt
///
/// # Gate against the baseline with a relaxed threshold for noisy benchmarks
/// rpcgate compare baseline.txt current.txt --relaxed-threshold 30 \
///     --relaxed-benchmarks large_payload_echo
/// ```
#[derive(Parser)]
#[command(name = "rpcgate")]
#[command(author, version, about = "rpcgate - RPC server performance gating", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Logs go to stderr so stdout carries only reports and annotations.
fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rpcgate_bench={level},rpcgate_xmlrpc={level},rpcgate_cli={level}",
            level = level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.quiet());

    match cli.command.execute() {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

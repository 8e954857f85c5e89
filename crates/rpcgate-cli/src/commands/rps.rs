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

//! RPS command - measures XML-RPC server throughput and latency
//!
//! Runs the `echo` method with a small struct payload and a 1 MiB string
//! payload, sweeping each across the requested client counts. Rows are
//! printed as each level completes, except for JSON which is printed once
//! at the end.

use super::Outcome;
use crate::error::CliError;
use rpcgate_bench::core::{parse_client_counts, ExportFormat, DEFAULT_LARGE_REQUESTS_CAP};
use rpcgate_bench::harness::{run_scenario, CallTarget, RpcConnection, Scenario};
use rpcgate_bench::reporters::{
    render_csv_row, render_result_row, result_table_header, to_json, RpsReport, CSV_HEADER,
};
use rpcgate_xmlrpc::{large_payload, small_payload, Value, XmlRpcTarget};
use std::str::FromStr;
use std::time::Duration;

/// Method invoked by every scenario.
const ECHO_METHOD: &str = "echo";

/// Which payload scenarios to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioChoice {
    Small,
    Large,
    #[default]
    Both,
}

impl ScenarioChoice {
    fn small(self) -> bool {
        matches!(self, Self::Small | Self::Both)
    }

    fn large(self) -> bool {
        matches!(self, Self::Large | Self::Both)
    }
}

impl FromStr for ScenarioChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "large" => Ok(Self::Large),
            "both" => Ok(Self::Both),
            other => Err(CliError::invalid_input(format!(
                "unknown scenario '{}' (expected small, large or both)",
                other
            ))),
        }
    }
}

/// Arguments of the `rps` command.
#[derive(Debug, Clone)]
pub struct RpsOptions {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Measured requests per client count for the small payload.
    pub requests: u64,
    /// Comma-separated client counts.
    pub clients: String,
    /// Warmup requests per client count, split across workers.
    pub warmup: u64,
    pub scenario: ScenarioChoice,
    /// Measured requests for the large payload. Unset or zero means
    /// `min(1000, requests)`.
    pub large_requests: Option<u64>,
    pub timeout_secs: u64,
    pub output: ExportFormat,
    /// Suppress the banner above the table.
    pub quiet: bool,
}

impl RpsOptions {
    fn large_request_count(&self) -> u64 {
        self.large_requests
            .filter(|&n| n > 0)
            .unwrap_or_else(|| self.requests.min(DEFAULT_LARGE_REQUESTS_CAP))
    }
}

/// Runs the throughput benchmark against a live XML-RPC server.
///
/// # Errors
///
/// Returns `Err` if:
/// - The client list or timeout is invalid
/// - The probe call `echo("test")` fails
pub fn rps(options: &RpsOptions) -> Result<Outcome, CliError> {
    let levels = parse_client_counts(&options.clients)?;
    if options.timeout_secs == 0 {
        return Err(CliError::invalid_input("--timeout-secs must be positive"));
    }

    let target = XmlRpcTarget::new(options.host.as_str(), options.port)
        .with_path(options.path.as_str())
        .with_timeout(Duration::from_secs(options.timeout_secs));
    probe(&target)?;
    tracing::info!(server = %target.url(), "server answered echo call");

    let small = small_payload();
    let large = large_payload();
    let mut scenarios = Vec::new();
    if options.scenario.small() {
        scenarios.push(Scenario {
            name: "small_payload",
            method: ECHO_METHOD,
            payload: &small,
            total_requests: options.requests,
        });
    }
    if options.scenario.large() {
        scenarios.push(Scenario {
            name: "large_payload",
            method: ECHO_METHOD,
            payload: &large,
            total_requests: options.large_request_count(),
        });
    }

    let server = format!("{}:{}", options.host, options.port);
    let format = options.output;
    match format {
        ExportFormat::Table => {
            if !options.quiet {
                println!("\n=== RPS Benchmark Results ===");
                println!("Server: {}", server);
                println!("Warmup: {} requests per client count\n", options.warmup);
            }
            println!("{}", result_table_header());
        }
        ExportFormat::Csv => println!("{}", CSV_HEADER),
        ExportFormat::Json => {}
    }

    let mut report = RpsReport::new(server);
    for scenario in &scenarios {
        let results = run_scenario(
            &target,
            scenario,
            &levels,
            options.warmup,
            |clients, result| match format {
                ExportFormat::Table => {
                    println!("{}", render_result_row(scenario.name, clients, result))
                }
                ExportFormat::Csv => println!("{}", render_csv_row(scenario.name, clients, result)),
                ExportFormat::Json => {}
            },
        )?;
        tracing::info!(
            scenario = scenario.name,
            levels = results.len(),
            "scenario complete"
        );
        report.add_scenario(scenario.name, &results);
    }

    match format {
        ExportFormat::Table => println!(),
        ExportFormat::Csv => {}
        ExportFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(Outcome::Passed)
}

/// Verifies the server answers `echo("test")` before any load is applied.
fn probe(target: &XmlRpcTarget) -> Result<(), CliError> {
    target
        .connect()
        .and_then(|mut conn| conn.call(ECHO_METHOD, &Value::from("test")))
        .map(|_| ())
        .map_err(|e| CliError::ServerUnavailable {
            url: target.url(),
            port: target.port(),
            message: e.to_string(),
        })
}

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

//! JSON export for comparison reports and harness results.

use crate::analysis::comparator::ComparisonReport;
use crate::error::{BenchError, Result};
use crate::harness::runner::BenchmarkResult;
use crate::reporters::units::round_to;
use serde::{Serialize, Serializer};

/// Latency percentiles in milliseconds, rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyMs {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub min: f64,
    pub max: f64,
}

/// One concurrency level of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpsRow {
    pub clients: usize,
    pub requests: u64,
    pub rps: f64,
    pub latency_ms: LatencyMs,
    pub errors: u64,
}

impl RpsRow {
    /// Builds a row, rounding throughput to 1 decimal and latency to 3.
    pub fn from_result(clients: usize, result: &BenchmarkResult) -> Self {
        Self {
            clients,
            requests: result.sample_count,
            rps: round_to(result.throughput_per_sec, 1),
            latency_ms: LatencyMs {
                p50: round_to(result.p50_ms(), 3),
                p90: round_to(result.p90_ms(), 3),
                p95: round_to(result.p95_ms(), 3),
                p99: round_to(result.p99_ms(), 3),
                min: round_to(result.min_ms(), 3),
                max: round_to(result.max_ms(), 3),
            },
            errors: result.error_count,
        }
    }
}

fn ordered_map<S: Serializer>(
    entries: &[(String, Vec<RpsRow>)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}

/// Results of an RPS run. Scenarios keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpsReport {
    /// `host:port` of the server.
    pub server: String,
    #[serde(serialize_with = "ordered_map")]
    pub scenarios: Vec<(String, Vec<RpsRow>)>,
}

impl RpsReport {
    /// Creates an empty report for `server`.
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            scenarios: Vec::new(),
        }
    }

    /// Appends a scenario's rows.
    pub fn add_scenario<'a, I>(&mut self, name: impl Into<String>, results: I)
    where
        I: IntoIterator<Item = (&'a usize, &'a BenchmarkResult)>,
    {
        let rows = results
            .into_iter()
            .map(|(&clients, result)| RpsRow::from_result(clients, result))
            .collect();
        self.scenarios.push((name.into(), rows));
    }
}

/// Serializes any report as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BenchError::Serialization(e.to_string()))
}

/// Renders a comparison report as pretty JSON.
pub fn comparison_to_json(report: &ComparisonReport) -> Result<String> {
    to_json(report)
}

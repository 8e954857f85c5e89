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

//! CSV rows for harness results.

use crate::harness::runner::BenchmarkResult;

/// Header row matching [`render_csv_row`].
pub const CSV_HEADER: &str =
    "scenario,clients,requests,rps,p50_ms,p90_ms,p95_ms,p99_ms,min_ms,max_ms,errors";

/// One CSV row. Throughput has one decimal, latencies three.
pub fn render_csv_row(scenario: &str, clients: usize, result: &BenchmarkResult) -> String {
    format!(
        "{},{},{},{:.1},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
        scenario,
        clients,
        result.sample_count,
        result.throughput_per_sec,
        result.p50_ms(),
        result.p90_ms(),
        result.p95_ms(),
        result.p99_ms(),
        result.min_ms(),
        result.max_ms(),
        result.error_count
    )
}

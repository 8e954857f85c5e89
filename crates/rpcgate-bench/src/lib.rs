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

//! rpcgate benchmark gating
//!
//! Performance measurement and regression gating for RPC servers.
//!
//! ## Features
//!
//! - **Load harness**: Persistent per-worker connections, warmup, even work
//!   distribution, nearest-rank latency percentiles and throughput
//! - **Aggregation**: Minimum-of-runs noise reduction over result files
//! - **Comparison**: Tiered regression thresholds with per-benchmark overrides
//! - **Reporting**: Console tables, CSV, JSON and GitHub Actions annotations
//!
//! ## Pipeline
//!
//! ```text
//! run_benchmark ─► result files ─► select_minimum ─► compare ─► verdict
//! ```
//!
//! ## Usage
//!
//! ```
//! use rpcgate_bench::{compare, MeasurementStore, ThresholdPolicy};
//!
//! let baseline: MeasurementStore = [("echo", 100.0)].into_iter().collect();
//! let current: MeasurementStore = [("echo", 130.0)].into_iter().collect();
//! let policy = ThresholdPolicy::new(20.0).unwrap();
//!
//! let report = compare(&baseline, &current, &policy);
//! assert!(report.has_regressions());
//! ```

pub mod analysis;
pub mod core;
pub mod error;
pub mod harness;
pub mod reporters;

// Re-export key types for convenience
pub use analysis::{
    aggregate, aggregate_files, compare, select_minimum, Aggregation, ComparisonEntry,
    ComparisonReport,
};
pub use core::{
    HarnessConfig, Measurement, MeasurementStore, ParsedResults, ResultFileOptions,
    ThresholdPolicy,
};
pub use error::{BenchError, Result};
pub use harness::{
    run_benchmark, run_scenario, BenchmarkResult, CallError, CallTarget, RpcConnection, Scenario,
};

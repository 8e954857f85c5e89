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

//! Load harness for live RPC endpoints.
//!
//! # Modules
//!
//! - `transport`: Call capability traits and reconnect handling
//! - `stats`: Nearest-rank percentiles and latency summaries
//! - `runner`: Warmup, measured phase and concurrency sweeps

pub mod runner;
pub mod stats;
pub mod transport;

pub use runner::{distribute_requests, run_benchmark, run_scenario, BenchmarkResult, Scenario};
pub use stats::{ns_to_ms, percentile, LatencySummary};
pub use transport::{call_with_reconnect, CallError, CallTarget, RpcConnection};

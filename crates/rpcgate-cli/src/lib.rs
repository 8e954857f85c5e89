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

//! rpcgate CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Gating
//!
//! - **compare**: Compare a results file against a baseline with tiered
//!   thresholds; exits 1 on regression
//! - **select-min**: Reduce several runs to the per-benchmark minimum
//!
//! ## Load
//!
//! - **rps**: Measure throughput and latency percentiles of a live XML-RPC
//!   server across client counts
//!
//! # Exit Status
//!
//! | Status | Meaning |
//! |--------|---------|
//! | 0 | Success, no regressions |
//! | 1 | At least one regression |
//! | 2 | Invalid configuration or input, unreachable server |
//!
//! # Examples
//!
//! ```no_run
//! use rpcgate_cli::commands::{compare, CompareOptions, Outcome, ReportFormat};
//!
//! # fn main() -> Result<(), rpcgate_cli::error::CliError> {
//! let outcome = compare(&CompareOptions {
//!     baseline: "baseline.txt".into(),
//!     current: "current.txt".into(),
//!     threshold: 10.0,
//!     relaxed_threshold: None,
//!     relaxed_benchmarks: None,
//!     github_actions: false,
//!     format: ReportFormat::Console,
//! })?;
//! assert_eq!(outcome, Outcome::Passed);
//! # Ok(())
//! # }
//! ```
//!
//! # Environment
//!
//! - `RPCGATE_MAX_LINES`: per-file line cap for result files (default 10000)
//! - `RUST_LOG`: log filter, logs are written to stderr

pub mod cli;
pub mod commands;
pub mod error;

pub use commands::Outcome;
pub use error::CliError;

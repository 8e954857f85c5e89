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

//! Reporters for comparison reports and harness results.
//!
//! # Modules
//!
//! - `units`: Human-readable durations and percentages
//! - `console`: Console tables and the comparison report
//! - `csv`: CSV rows for harness results
//! - `json`: JSON export
//! - `github`: GitHub Actions annotations

pub mod console;
pub mod csv;
pub mod github;
pub mod json;
pub mod units;

// Re-export commonly used types
pub use console::{render_comparison, render_result_row, render_verdict, result_table_header};
pub use csv::{render_csv_row, CSV_HEADER};
pub use json::{comparison_to_json, to_json, LatencyMs, RpsReport, RpsRow};
pub use units::{format_ns, format_pct, round_to};

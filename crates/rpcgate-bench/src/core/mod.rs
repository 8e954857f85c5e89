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

//! Core gating data.
//!
//! # Modules
//!
//! - `config`: Defaults and environment overrides
//! - `store`: Named measurement store
//! - `result_file`: Flat-text result file reader and writer
//! - `policy`: Tiered regression thresholds

pub mod config;
pub mod policy;
pub mod result_file;
pub mod store;

// Re-export commonly used types
pub use config::{
    max_lines_from_env, parse_client_counts, ExportFormat, HarnessConfig, DEFAULT_CALL_TIMEOUT,
    DEFAULT_CLIENT_COUNTS, DEFAULT_HOST, DEFAULT_LARGE_REQUESTS_CAP, DEFAULT_PATH, DEFAULT_PORT,
    DEFAULT_REQUESTS, DEFAULT_THRESHOLD_PCT, DEFAULT_WARMUP_REQUESTS, MAX_LINES_ENV,
};
pub use policy::{parse_name_list, ThresholdPolicy};
pub use result_file::{
    parse_reader, parse_results, read_non_empty, read_result_file, render_result_file,
    write_result_file, Diagnostic, ParsedResults, ResultFileOptions, ResultHeader, MAX_LINES,
};
pub use store::{Measurement, MeasurementStore};

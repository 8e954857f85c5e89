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

//! Structured error types for the rpcgate CLI.
//!
//! Every command returns `Result<Outcome, CliError>`; any error maps to
//! exit status [`ERROR_EXIT_CODE`].

use rpcgate_bench::BenchError;
use thiserror::Error;

/// Exit status for configuration, input and connection errors.
pub const ERROR_EXIT_CODE: u8 = 2;

/// The main error type for rpcgate CLI operations.
///
/// # Examples
///
/// ```rust
/// use rpcgate_cli::error::CliError;
///
/// let err = CliError::InvalidInput("unknown format 'xml'".to_string());
/// assert_eq!(err.to_string(), "Invalid input: unknown format 'xml'");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// A library error: bad configuration, unreadable or empty input,
    /// failed write.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// Invalid command-line input not covered by the library checks.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The probe call before a load run failed.
    #[error(
        "Cannot connect to server at {url}: {message}\n\
         Make sure the benchmark server is running and listening on port {port}"
    )]
    ServerUnavailable {
        /// Server URL that was probed
        url: String,
        /// Port, repeated in the hint
        port: u16,
        /// Underlying call error
        message: String,
    },
}

impl CliError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

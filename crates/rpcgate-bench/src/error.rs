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

//! Error types for benchmark gating operations.
//!
//! Structural failures (invalid configuration, unreadable inputs, an
//! unreachable server) are reported through [`BenchError`]. Per-line parse
//! problems and per-request failures never surface here: they are absorbed
//! into diagnostics and error counts by the components that encounter them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for benchmarking operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that stop a benchmark, aggregation or comparison run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    /// Invalid configuration parameter.
    ///
    /// Raised for non-positive thresholds, an empty concurrency list, a zero
    /// worker count or a malformed override list. No partial work is done.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A result file could not be opened or read.
    #[error("Failed to read '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A result file could not be written.
    #[error("Failed to write '{path}': {message}")]
    Write {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A result file parsed to zero valid measurements.
    #[error("'{path}' is empty or contains no valid data")]
    EmptyResults {
        /// The offending file
        path: PathBuf,
    },

    /// None of the aggregation inputs yielded a measurement.
    #[error("No valid benchmark data found in any input file")]
    NoValidInput,

    /// The system under test could not be reached at all.
    #[error("Cannot connect to server: {0}")]
    Connect(String),

    /// A report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialization(String),
}

impl BenchError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a read error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a write error with file path context.
    pub fn write_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns `true` for errors caused by the caller's configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

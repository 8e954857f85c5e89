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

//! Centralized gating defaults and environment overrides.
//!
//! Every tunable used by the harness, the aggregator and the comparator
//! has its default here so the CLI and library agree.

use crate::error::{BenchError, Result};
use std::str::FromStr;
use std::time::Duration;

/// Default regression threshold, in percent.
pub const DEFAULT_THRESHOLD_PCT: f64 = 10.0;

/// Default number of measured requests per benchmark.
pub const DEFAULT_REQUESTS: u64 = 10_000;

/// Default concurrency levels.
pub const DEFAULT_CLIENT_COUNTS: &[usize] = &[1, 2, 4, 8, 16];

/// Default warmup requests per benchmark.
pub const DEFAULT_WARMUP_REQUESTS: u64 = 100;

/// Default per-call timeout.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upper bound on requests for large-payload scenarios.
pub const DEFAULT_LARGE_REQUESTS_CAP: u64 = 1_000;

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default RPC endpoint path.
pub const DEFAULT_PATH: &str = "/RPC";

/// Environment variable overriding the result-file line cap.
pub const MAX_LINES_ENV: &str = "RPCGATE_MAX_LINES";

/// Line cap for result files, from [`MAX_LINES_ENV`] or the default.
///
/// Unset, unparseable or zero values fall back to
/// [`MAX_LINES`](crate::core::result_file::MAX_LINES).
pub fn max_lines_from_env() -> usize {
    parse_max_lines(std::env::var(MAX_LINES_ENV).ok().as_deref())
}

fn parse_max_lines(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(crate::core::result_file::MAX_LINES)
}

/// Load harness configuration for one benchmark run.
///
/// # Example
///
/// ```
/// use rpcgate_bench::core::config::HarnessConfig;
///
/// let config = HarnessConfig::default()
///     .with_total_requests(1_000)
///     .with_concurrency(4)
///     .with_warmup_requests(0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Measured requests across all workers.
    pub total_requests: u64,
    /// Number of parallel workers.
    pub concurrency: usize,
    /// Untimed requests issued before measuring.
    pub warmup_requests: u64,
}

impl HarnessConfig {
    /// Creates a configuration with explicit values.
    pub fn new(total_requests: u64, concurrency: usize, warmup_requests: u64) -> Self {
        Self {
            total_requests,
            concurrency,
            warmup_requests,
        }
    }

    /// Sets the measured request count.
    pub fn with_total_requests(mut self, total_requests: u64) -> Self {
        self.total_requests = total_requests;
        self
    }

    /// Sets the worker count.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the warmup request count.
    pub fn with_warmup_requests(mut self, warmup_requests: u64) -> Self {
        self.warmup_requests = warmup_requests;
        self
    }

    /// Checks invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] if `concurrency` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(BenchError::invalid_config(
                "concurrency",
                "at least one worker is required",
            ));
        }
        Ok(())
    }

    /// Warmup calls issued by each worker, or 0 when warmup is disabled.
    pub fn warmup_per_worker(&self) -> u64 {
        if self.warmup_requests == 0 || self.concurrency == 0 {
            0
        } else {
            (self.warmup_requests / self.concurrency as u64).max(1)
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS, 1, DEFAULT_WARMUP_REQUESTS)
    }
}

/// Output format for harness results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Aligned console table.
    #[default]
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for ExportFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(BenchError::invalid_config(
                "output",
                format!("unknown format '{}' (expected table, csv or json)", other),
            )),
        }
    }
}

/// Parses a comma-separated list of concurrency levels such as `1,2,4`.
///
/// # Errors
///
/// Returns [`BenchError::InvalidConfig`] if the list is empty or any entry
/// is not a positive integer.
pub fn parse_client_counts(raw: &str) -> Result<Vec<usize>> {
    let mut counts = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<usize>() {
            Ok(n) if n > 0 => counts.push(n),
            _ => {
                return Err(BenchError::invalid_config(
                    "clients",
                    format!("'{}' is not a positive integer", part),
                ))
            }
        }
    }
    if counts.is_empty() {
        return Err(BenchError::invalid_config(
            "clients",
            "at least one concurrency level is required",
        ));
    }
    Ok(counts)
}

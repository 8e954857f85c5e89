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

//! Latency statistics over merged samples.

use serde::{Deserialize, Serialize};

/// Nearest-rank percentile of an ascending slice.
///
/// Uses index `min(floor(k * p / 100), k - 1)` with no interpolation.
/// Returns 0 for an empty slice.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let k = sorted.len();
    let idx = ((k as f64) * p / 100.0).floor() as usize;
    sorted[idx.min(k - 1)]
}

/// Latency distribution of one benchmark run, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// 50th percentile (median).
    pub p50_ns: u64,
    /// 90th percentile.
    pub p90_ns: u64,
    /// 95th percentile.
    pub p95_ns: u64,
    /// 99th percentile.
    pub p99_ns: u64,
    /// Fastest sample.
    pub min_ns: u64,
    /// Slowest sample.
    pub max_ns: u64,
}

impl LatencySummary {
    /// Summarizes an ascending slice. All fields are 0 when it is empty.
    pub fn from_sorted(sorted_ns: &[u64]) -> Self {
        let (Some(&min_ns), Some(&max_ns)) = (sorted_ns.first(), sorted_ns.last()) else {
            return Self::default();
        };
        Self {
            p50_ns: percentile(sorted_ns, 50.0),
            p90_ns: percentile(sorted_ns, 90.0),
            p95_ns: percentile(sorted_ns, 95.0),
            p99_ns: percentile(sorted_ns, 99.0),
            min_ns,
            max_ns,
        }
    }

    /// Sorts `samples` in place and summarizes them.
    pub fn from_samples(samples: &mut [u64]) -> Self {
        samples.sort_unstable();
        Self::from_sorted(samples)
    }
}

/// Nanoseconds as fractional milliseconds.
pub fn ns_to_ms(ns: u64) -> f64 {
    ns as f64 / 1_000_000.0
}

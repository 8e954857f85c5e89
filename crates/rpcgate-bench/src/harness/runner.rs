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

//! Concurrent load generation and latency measurement.
//!
//! A run has two phases separated by a barrier. In the warmup phase every
//! worker issues `max(1, warmup / concurrency)` untimed calls. In the
//! measured phase the request total is split evenly across workers, each
//! of which calls sequentially on its own connection and records the
//! latency of every successful call. Throughput is measured over the
//! whole fan-out/fan-in of the measured phase.

use crate::core::config::HarnessConfig;
use crate::error::{BenchError, Result};
use crate::harness::stats::{ns_to_ms, LatencySummary};
use crate::harness::transport::{call_with_reconnect, CallTarget};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

/// Measured-phase errors logged individually before only counting.
const LOGGED_ERRORS: u64 = 3;

/// Upper bound on samples reserved up front; larger runs grow on demand.
const MAX_PREALLOCATED_SAMPLES: u64 = 1 << 20;

fn sample_capacity(requests: u64) -> usize {
    requests.min(MAX_PREALLOCATED_SAMPLES) as usize
}

/// Outcome of one (scenario, concurrency) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Number of workers.
    pub concurrency: usize,
    /// Requests the measured phase attempted.
    pub requests_attempted: u64,
    /// Successful requests per second of measured-phase wall time.
    pub throughput_per_sec: f64,
    /// Successful requests.
    pub sample_count: u64,
    /// Measured-phase wall time in seconds.
    pub elapsed_sec: f64,
    /// Latency distribution of successful requests.
    #[serde(flatten)]
    pub latency: LatencySummary,
    /// Failed measured-phase requests.
    pub error_count: u64,
}

impl BenchmarkResult {
    /// Median latency in milliseconds.
    pub fn p50_ms(&self) -> f64 {
        ns_to_ms(self.latency.p50_ns)
    }

    /// 90th percentile latency in milliseconds.
    pub fn p90_ms(&self) -> f64 {
        ns_to_ms(self.latency.p90_ns)
    }

    /// 95th percentile latency in milliseconds.
    pub fn p95_ms(&self) -> f64 {
        ns_to_ms(self.latency.p95_ns)
    }

    /// 99th percentile latency in milliseconds.
    pub fn p99_ms(&self) -> f64 {
        ns_to_ms(self.latency.p99_ns)
    }

    /// Fastest request in milliseconds.
    pub fn min_ms(&self) -> f64 {
        ns_to_ms(self.latency.min_ns)
    }

    /// Slowest request in milliseconds.
    pub fn max_ms(&self) -> f64 {
        ns_to_ms(self.latency.max_ns)
    }
}

/// A named workload swept across concurrency levels.
#[derive(Debug)]
pub struct Scenario<'a, P: ?Sized> {
    /// Scenario name used in reports, e.g. `small_payload`.
    pub name: &'a str,
    /// Method invoked on every call.
    pub method: &'a str,
    /// Argument sent with every call.
    pub payload: &'a P,
    /// Measured requests per concurrency level.
    pub total_requests: u64,
}

/// Splits `total` requests across `workers`.
///
/// Every worker gets `total / workers`; the first `total % workers`
/// workers get one more. The result always sums to `total`.
pub fn distribute_requests(total: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let n = workers as u64;
    let base = total / n;
    let remainder = total % n;
    (0..n).map(|i| base + u64::from(i < remainder)).collect()
}

fn run_worker<T: CallTarget>(
    target: &T,
    method: &str,
    payload: &T::Payload,
    count: u64,
    errors: &AtomicU64,
    measured: bool,
) -> Vec<u64> {
    let mut samples = Vec::with_capacity(if measured { sample_capacity(count) } else { 0 });
    let mut slot = match target.connect() {
        Ok(conn) => Some(conn),
        Err(e) => {
            tracing::debug!(error = %e, "worker could not connect, will retry per call");
            None
        }
    };

    for _ in 0..count {
        let start = Instant::now();
        match call_with_reconnect(target, &mut slot, method, payload) {
            Ok(_) => {
                if measured {
                    samples.push(start.elapsed().as_nanos() as u64);
                }
            }
            Err(e) => {
                let seen = errors.fetch_add(1, Ordering::Relaxed) + 1;
                if measured && seen <= LOGGED_ERRORS {
                    tracing::warn!(kind = e.kind(), "Error: {}", e);
                }
            }
        }
    }
    samples
}

/// Runs one benchmark against `target`.
///
/// # Arguments
///
/// * `target` - System under test
/// * `method` - Method called on every request
/// * `payload` - Argument of every request
/// * `config` - Request counts and worker count
///
/// # Errors
///
/// Returns [`BenchError::InvalidConfig`] for an invalid configuration and
/// [`BenchError::Connect`] if no connection can be opened before the run.
/// Per-request failures only increase `error_count`.
pub fn run_benchmark<T: CallTarget>(
    target: &T,
    method: &str,
    payload: &T::Payload,
    config: &HarnessConfig,
) -> Result<BenchmarkResult> {
    config.validate()?;

    target
        .check_reachable()
        .map_err(|e| BenchError::Connect(format!("{}: {}", target.describe(), e)))?;

    let errors = AtomicU64::new(0);

    let warmup_per_worker = config.warmup_per_worker();
    if warmup_per_worker > 0 {
        tracing::debug!(
            workers = config.concurrency,
            per_worker = warmup_per_worker,
            "warmup phase"
        );
        thread::scope(|s| {
            for _ in 0..config.concurrency {
                s.spawn(|| run_worker(target, method, payload, warmup_per_worker, &errors, false));
            }
        });
        let warmup_errors = errors.swap(0, Ordering::SeqCst);
        if warmup_errors > 0 {
            tracing::debug!(errors = warmup_errors, "discarding warmup errors");
        }
    }

    let plan = distribute_requests(config.total_requests, config.concurrency);
    let merged: Mutex<Vec<u64>> =
        Mutex::new(Vec::with_capacity(sample_capacity(config.total_requests)));
    tracing::debug!(
        workers = config.concurrency,
        requests = config.total_requests,
        "measured phase"
    );

    let start = Instant::now();
    thread::scope(|s| {
        for &count in &plan {
            let errors = &errors;
            let merged = &merged;
            s.spawn(move || {
                let samples = run_worker(target, method, payload, count, errors, true);
                merged.lock().extend(samples);
            });
        }
    });
    let elapsed = start.elapsed().as_secs_f64();

    let mut samples = merged.into_inner();
    let sample_count = samples.len() as u64;
    let error_count = errors.load(Ordering::SeqCst);
    let throughput_per_sec = if sample_count == 0 || elapsed <= 0.0 {
        0.0
    } else {
        sample_count as f64 / elapsed
    };

    let result = BenchmarkResult {
        concurrency: config.concurrency,
        requests_attempted: config.total_requests,
        throughput_per_sec,
        sample_count,
        elapsed_sec: elapsed,
        latency: LatencySummary::from_samples(&mut samples),
        error_count,
    };
    tracing::debug!(
        workers = result.concurrency,
        samples = result.sample_count,
        errors = result.error_count,
        rps = result.throughput_per_sec,
        "benchmark finished"
    );
    Ok(result)
}

/// Runs `scenario` once per concurrency level, one level at a time.
///
/// `on_result` is invoked after each level completes so callers can stream
/// rows. All levels are validated before anything runs.
///
/// # Errors
///
/// Returns [`BenchError::InvalidConfig`] if `levels` is empty or contains a
/// zero, and propagates the first [`BenchError::Connect`].
pub fn run_scenario<T, F>(
    target: &T,
    scenario: &Scenario<'_, T::Payload>,
    levels: &[usize],
    warmup_requests: u64,
    mut on_result: F,
) -> Result<BTreeMap<usize, BenchmarkResult>>
where
    T: CallTarget,
    F: FnMut(usize, &BenchmarkResult),
{
    if levels.is_empty() {
        return Err(BenchError::invalid_config(
            "clients",
            "at least one concurrency level is required",
        ));
    }
    let configs: Vec<HarnessConfig> = levels
        .iter()
        .map(|&level| HarnessConfig::new(scenario.total_requests, level, warmup_requests))
        .collect();
    for config in &configs {
        config.validate()?;
    }

    let mut results = BTreeMap::new();
    for config in &configs {
        tracing::info!(
            scenario = scenario.name,
            clients = config.concurrency,
            requests = config.total_requests,
            "running benchmark"
        );
        let result = run_benchmark(target, scenario.method, scenario.payload, config)?;
        on_result(config.concurrency, &result);
        results.insert(config.concurrency, result);
    }
    Ok(results)
}

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

//! Gating hot paths.
//!
//! Measures the offline stages of the pipeline on suites of realistic size:
//! - Result-file parsing
//! - Minimum selection across repeated runs
//! - Baseline comparison with per-name overrides
//! - Percentile summaries over large sample sets
//!
//! Run with: cargo bench --package rpcgate-bench --bench gating

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rpcgate_bench::core::result_file::{parse_results, render_result_file, ResultHeader};
use rpcgate_bench::harness::LatencySummary;
use rpcgate_bench::{compare, select_minimum, MeasurementStore, ResultFileOptions, ThresholdPolicy};

const SUITE_SIZES: &[usize] = &[10, 100, 1_000];

fn suite(size: usize, scale: f64) -> MeasurementStore {
    (0..size)
        .map(|i| (format!("rpc_bench_{:05}", i), (i as f64 + 1.0) * 13.7 * scale))
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_results");
    for &size in SUITE_SIZES {
        let text = render_result_file(&suite(size, 1.0), &ResultHeader::new("bench", 3));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_results(black_box(text), &ResultFileOptions::default()))
        });
    }
    group.finish();
}

fn bench_select_minimum(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_minimum");
    for &size in SUITE_SIZES {
        let runs = vec![suite(size, 1.0), suite(size, 0.9), suite(size, 1.1)];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &runs, |b, runs| {
            b.iter(|| select_minimum(black_box(runs)))
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    for &size in SUITE_SIZES {
        let baseline = suite(size, 1.0);
        let current = suite(size, 1.15);
        let policy = (0..size)
            .step_by(10)
            .try_fold(ThresholdPolicy::new(10.0).unwrap(), |p, i| {
                p.with_override(format!("rpc_bench_{:05}", i), 50.0)
            })
            .unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| compare(black_box(&baseline), black_box(&current), &policy))
        });
    }
    group.finish();
}

fn bench_latency_summary(c: &mut Criterion) {
    let samples: Vec<u64> = (0..100_000u64).map(|i| (i * 7919) % 1_000_003).collect();
    c.bench_function("latency_summary_100k", |b| {
        b.iter(|| {
            let mut copy = samples.clone();
            LatencySummary::from_samples(black_box(&mut copy))
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_select_minimum,
    bench_compare,
    bench_latency_summary
);
criterion_main!(benches);

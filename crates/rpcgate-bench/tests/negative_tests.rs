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

//! Negative tests for rpcgate-bench error handling and robustness.
//!
//! Tests error paths for:
//! - Unreadable and empty result files
//! - Hostile result-file content (binary noise, huge files, odd numbers)
//! - Invalid threshold and override configuration
//! - Aggregation with no usable input
//!
//! All tests verify:
//! 1. Errors are returned (not panics)
//! 2. Error messages name the offending file or parameter
//! 3. Per-line problems never fail the whole file

use rpcgate_bench::core::result_file::{
    parse_results, read_non_empty, read_result_file, write_result_file, Diagnostic, ResultHeader,
};
use rpcgate_bench::core::{parse_client_counts, parse_name_list};
use rpcgate_bench::{
    aggregate_files, BenchError, MeasurementStore, ResultFileOptions, ThresholdPolicy,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

// ============================================================================
// CATEGORY 1: File Errors
// ============================================================================

#[test]
fn test_missing_file_names_path() {
    let err = read_result_file(
        Path::new("/definitely/not/here.txt"),
        &ResultFileOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BenchError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.txt"));
}

#[test]
fn test_directory_is_not_a_result_file() {
    let dir = TempDir::new().unwrap();
    let result = read_result_file(dir.path(), &ResultFileOptions::default());
    assert!(matches!(result, Err(BenchError::Io { .. })));
}

#[test]
fn test_invalid_utf8_is_read_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, b'a', b':', b' ', b'1']).unwrap();
    let result = read_result_file(file.path(), &ResultFileOptions::default());
    assert!(matches!(result, Err(BenchError::Io { .. })));
}

#[test]
fn test_empty_file_rejected_when_required() {
    let file = NamedTempFile::new().unwrap();
    let err = read_non_empty(file.path(), &ResultFileOptions::default()).unwrap_err();
    assert!(matches!(err, BenchError::EmptyResults { .. }));
    assert!(err.to_string().contains("empty or contains no valid data"));
}

#[test]
fn test_all_malformed_file_is_empty() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "garbage\n: 1.0\nname: abc").unwrap();
    let err = read_non_empty(file.path(), &ResultFileOptions::default()).unwrap_err();
    assert!(matches!(err, BenchError::EmptyResults { .. }));
}

#[test]
fn test_write_to_missing_directory_fails() {
    let store: MeasurementStore = [("a", 1.0)].into_iter().collect();
    let err = write_result_file(
        Path::new("/definitely/not/here/out.txt"),
        &store,
        &ResultHeader::new("t", 1),
    )
    .unwrap_err();
    assert!(matches!(err, BenchError::Write { .. }));
}

// ============================================================================
// CATEGORY 2: Hostile Content
// ============================================================================

#[test]
fn test_odd_numeric_forms() {
    let parsed = parse_results(
        "exp: 1e3\nplus: +5\nspaces:    7.25   \nhex: 0x10\nnan: NaN\n",
        &ResultFileOptions::default(),
    );
    assert_eq!(parsed.store.get("exp"), Some(1000.0));
    assert_eq!(parsed.store.get("plus"), Some(5.0));
    assert_eq!(parsed.store.get("spaces"), Some(7.25));
    assert!(!parsed.store.contains("hex"));
    assert!(!parsed.store.contains("nan"));
}

#[test]
fn test_name_with_inner_spaces_kept() {
    let parsed = parse_results("  rpc echo small :  12.5", &ResultFileOptions::default());
    assert_eq!(parsed.store.get("rpc echo small"), Some(12.5));
}

#[test]
fn test_windows_line_endings() {
    let parsed = parse_results("a: 1.0\r\nb: 2.0\r\n", &ResultFileOptions::default());
    assert_eq!(parsed.store.len(), 2);
    assert!(parsed.diagnostics.is_empty());
}

#[test]
fn test_comment_lines_count_toward_cap() {
    let text = "# one\n# two\na: 1.0\n";
    let parsed = parse_results(text, &ResultFileOptions::default().with_max_lines(2));
    assert!(parsed.store.is_empty());
    assert!(parsed.truncated());
}

#[test]
fn test_huge_file_is_truncated_not_failed() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..12_000 {
        writeln!(file, "bench_{}: {}", i, i + 1).unwrap();
    }
    let parsed = read_result_file(file.path(), &ResultFileOptions::default()).unwrap();
    assert_eq!(parsed.store.len(), 10_000);
    assert_eq!(
        parsed.diagnostics,
        vec![Diagnostic::Truncated { max_lines: 10_000 }]
    );
}

#[cfg(unix)]
#[test]
fn test_line_cap_stops_reading_open_pipe() {
    use std::fs::OpenOptions;
    use std::process::Command;
    use std::sync::mpsc;
    use std::thread;
    use std::time::{Duration, Instant};

    let dir = TempDir::new().unwrap();
    let fifo = dir.path().join("results.pipe");
    let status = Command::new("mkfifo").arg(&fifo).status();
    if !matches!(status, Ok(s) if s.success()) {
        return;
    }

    // The writer keeps the pipe open long after its lines are written.
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let writer_path = fifo.clone();
    let writer = thread::spawn(move || {
        let mut pipe = OpenOptions::new().write(true).open(writer_path).unwrap();
        for i in 0..20 {
            writeln!(pipe, "bench_{}: {}", i, i + 1).unwrap();
        }
        pipe.flush().unwrap();
        let _ = done_rx.recv_timeout(Duration::from_secs(10));
    });

    let start = Instant::now();
    let parsed =
        read_result_file(&fifo, &ResultFileOptions::default().with_max_lines(5)).unwrap();
    let waited = start.elapsed();
    done_tx.send(()).unwrap();
    writer.join().unwrap();

    assert!(waited < Duration::from_secs(5), "blocked for {:?}", waited);
    assert_eq!(parsed.store.len(), 5);
    assert!(parsed.truncated());
}

// ============================================================================
// CATEGORY 3: Configuration Errors
// ============================================================================

#[test]
fn test_threshold_errors_name_parameter() {
    let err = ThresholdPolicy::new(0.0).unwrap_err();
    assert!(err.to_string().contains("threshold"));

    let err = ThresholdPolicy::new(10.0)
        .unwrap()
        .with_override("x", -1.0)
        .unwrap_err();
    assert!(err.to_string().contains("relaxed-threshold"));
}

#[test]
fn test_malformed_lists() {
    assert!(parse_name_list(",").unwrap_err().is_config());
    assert!(parse_client_counts("1,-2").unwrap_err().is_config());
    assert!(parse_client_counts("four").unwrap_err().is_config());
}

// ============================================================================
// CATEGORY 4: Aggregation Without Data
// ============================================================================

#[test]
fn test_aggregate_no_inputs() {
    let paths: Vec<PathBuf> = Vec::new();
    let err = aggregate_files(&paths, &ResultFileOptions::default()).unwrap_err();
    assert_eq!(err, BenchError::NoValidInput);
}

#[test]
fn test_aggregate_only_empty_inputs() {
    let a = NamedTempFile::new().unwrap();
    let b = NamedTempFile::new().unwrap();
    let err = aggregate_files(&[a.path(), b.path()], &ResultFileOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No valid benchmark data found in any input file"
    );
}

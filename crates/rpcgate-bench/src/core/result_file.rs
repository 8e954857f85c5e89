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

//! Flat-text benchmark result files.
//!
//! One measurement per line in the form `name: value`. Blank lines and lines
//! starting with `#` are ignored. Anything else that cannot be read as a
//! measurement is skipped with a [`Diagnostic`]; a bad line never aborts
//! the file. Later duplicates of a name replace earlier ones.
//!
//! ```text
//! # Performance Results - rpcgate
//! serialize_struct: 1520.25
//! parse_response: 880.10
//! ```

use crate::core::config::max_lines_from_env;
use crate::core::store::MeasurementStore;
use crate::error::{BenchError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Default cap on lines read from a single result file.
pub const MAX_LINES: usize = 10_000;

/// Options controlling how result files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFileOptions {
    /// Lines beyond this count are not read.
    pub max_lines: usize,
}

impl ResultFileOptions {
    /// Options with the line cap taken from `RPCGATE_MAX_LINES`, if set.
    pub fn from_env() -> Self {
        Self {
            max_lines: max_lines_from_env(),
        }
    }

    /// Sets the line cap.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }
}

impl Default for ResultFileOptions {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINES,
        }
    }
}

/// A non-fatal problem found while reading a result file.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Reading stopped at the line cap.
    Truncated { max_lines: usize },
    /// A non-comment line without a `:` separator.
    MissingSeparator { line: usize, text: String },
    /// The text before `:` was blank.
    EmptyName { line: usize, text: String },
    /// The value was not a finite decimal number.
    MalformedValue { line: usize, text: String },
    /// A negative value. The measurement is kept.
    NegativeValue { line: usize, name: String, value: f64 },
    /// The name was already seen earlier in the file. The later value wins.
    Duplicate { line: usize, name: String },
}

impl Diagnostic {
    /// Returns `true` if the offending line was dropped.
    pub fn is_skipped_line(&self) -> bool {
        matches!(
            self,
            Diagnostic::MissingSeparator { .. }
                | Diagnostic::EmptyName { .. }
                | Diagnostic::MalformedValue { .. }
        )
    }

    /// Returns `true` for data-quality warnings on lines that were kept.
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Diagnostic::NegativeValue { .. } | Diagnostic::Duplicate { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Truncated { max_lines } => {
                write!(f, "Truncated after {} lines", max_lines)
            }
            Diagnostic::MissingSeparator { line, text } => {
                write!(f, "Skipping line {} without ':' separator: {}", line, text)
            }
            Diagnostic::EmptyName { line, text } => {
                write!(f, "Skipping line {} with empty name: {}", line, text)
            }
            Diagnostic::MalformedValue { line, text } => {
                write!(f, "Skipping malformed line {}: {}", line, text)
            }
            Diagnostic::NegativeValue { line, name, value } => {
                write!(f, "Negative value at line {}: {}: {}", line, name, value)
            }
            Diagnostic::Duplicate { line, name } => {
                write!(
                    f,
                    "Duplicate benchmark '{}' at line {} overrides earlier value",
                    name, line
                )
            }
        }
    }
}

/// Outcome of reading one result file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResults {
    /// Valid measurements.
    pub store: MeasurementStore,
    /// Everything that was skipped or suspicious, in line order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedResults {
    /// Returns `true` if reading stopped at the line cap.
    pub fn truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Truncated { .. }))
    }
}

/// Parses result-file text.
///
/// Never fails: every problem is reported as a [`Diagnostic`].
pub fn parse_results(text: &str, options: &ResultFileOptions) -> ParsedResults {
    let mut parsed = ParsedResults::default();
    for (index, raw) in text.lines().enumerate() {
        if index >= options.max_lines {
            parsed.push_truncated(options.max_lines);
            break;
        }
        parsed.parse_line(index + 1, raw);
    }
    parsed
}

/// Parses result lines from `reader`, reading no further than the line cap.
///
/// At most `max_lines + 1` lines are pulled from the reader: the extra one
/// only detects that the input continues.
///
/// # Errors
///
/// Returns the underlying I/O error, including invalid UTF-8.
pub fn parse_reader<R: BufRead>(
    reader: R,
    options: &ResultFileOptions,
) -> io::Result<ParsedResults> {
    let mut parsed = ParsedResults::default();
    for (index, raw) in reader.lines().enumerate() {
        if index >= options.max_lines {
            parsed.push_truncated(options.max_lines);
            break;
        }
        parsed.parse_line(index + 1, &raw?);
    }
    Ok(parsed)
}

impl ParsedResults {
    fn push_truncated(&mut self, max_lines: usize) {
        self.diagnostics.push(Diagnostic::Truncated { max_lines });
    }

    fn parse_line(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let Some((name, value)) = line.split_once(':') else {
            self.diagnostics.push(Diagnostic::MissingSeparator {
                line: line_no,
                text: line.to_string(),
            });
            return;
        };

        let name = name.trim();
        if name.is_empty() {
            self.diagnostics.push(Diagnostic::EmptyName {
                line: line_no,
                text: line.to_string(),
            });
            return;
        }

        let value = match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.diagnostics.push(Diagnostic::MalformedValue {
                    line: line_no,
                    text: line.to_string(),
                });
                return;
            }
        };

        if value < 0.0 {
            self.diagnostics.push(Diagnostic::NegativeValue {
                line: line_no,
                name: name.to_string(),
                value,
            });
        }
        if self.store.insert(name, value).is_some() {
            self.diagnostics.push(Diagnostic::Duplicate {
                line: line_no,
                name: name.to_string(),
            });
        }
    }
}

/// Reads and parses a result file.
///
/// The file is read line by line and reading stops at the line cap, so an
/// oversized or still-growing file is never loaded whole. Diagnostics are
/// logged and returned. A missing or unreadable file is an error; an empty
/// one is not (see [`read_non_empty`]).
pub fn read_result_file(path: &Path, options: &ResultFileOptions) -> Result<ParsedResults> {
    let file = File::open(path).map_err(|e| BenchError::io_error(path, e))?;
    let parsed =
        parse_reader(BufReader::new(file), options).map_err(|e| BenchError::io_error(path, e))?;
    for diagnostic in &parsed.diagnostics {
        tracing::warn!(file = %path.display(), "{}", diagnostic);
    }
    tracing::debug!(
        file = %path.display(),
        measurements = parsed.store.len(),
        "loaded result file"
    );
    Ok(parsed)
}

/// Reads a result file that must contain at least one measurement.
pub fn read_non_empty(path: &Path, options: &ResultFileOptions) -> Result<ParsedResults> {
    let parsed = read_result_file(path, options)?;
    if parsed.store.is_empty() {
        return Err(BenchError::EmptyResults {
            path: PathBuf::from(path),
        });
    }
    Ok(parsed)
}

/// Comment header written above the measurements.
#[derive(Debug, Clone)]
pub struct ResultHeader {
    /// Project or suite title.
    pub title: String,
    /// Number of runs the values were reduced from.
    pub run_count: usize,
    /// Generation time.
    pub generated: DateTime<Local>,
}

impl ResultHeader {
    /// Header stamped with the current local time.
    pub fn new(title: impl Into<String>, run_count: usize) -> Self {
        Self {
            title: title.into(),
            run_count,
            generated: Local::now(),
        }
    }
}

/// Renders a store in result-file format, sorted by name, two decimals.
pub fn render_result_file(store: &MeasurementStore, header: &ResultHeader) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Performance Results - {}\n", header.title));
    out.push_str(&format!(
        "# Generated: {}\n",
        header.generated.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("# Method: minimum of {} runs\n", header.run_count));
    out.push_str(&format!("# Total benchmarks: {}\n", store.len()));
    out.push_str("#\n");
    out.push_str("# Format: benchmark_name: ns_per_op\n");
    out.push_str("#\n");
    for (name, value) in store {
        out.push_str(&format!("{}: {:.2}\n", name, value));
    }
    out
}

/// Writes a store to `path` in result-file format.
pub fn write_result_file(
    path: &Path,
    store: &MeasurementStore,
    header: &ResultHeader,
) -> Result<()> {
    fs::write(path, render_result_file(store, header))
        .map_err(|e| BenchError::write_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> ParsedResults {
        parse_results(text, &ResultFileOptions::default())
    }

    #[test]
    fn test_parse_valid_lines() {
        let parsed = parse("# Comment line\n\nbenchmark_a: 100.5\nbenchmark_b: 200.0\n");
        assert_eq!(parsed.store.len(), 2);
        assert_eq!(parsed.store.get("benchmark_a"), Some(100.5));
        assert_eq!(parsed.store.get("benchmark_b"), Some(200.0));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_skip_comments_and_blank_lines() {
        let parsed = parse("# Header\n# Another\n\n  \ntest: 42.0\n");
        assert_eq!(parsed.store.len(), 1);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_skip_malformed_lines() {
        let parsed = parse("valid: 100.0\ninvalid: not_a_number\nno colon here\n: 5.0\nalso_valid: 200.0\n");
        assert_eq!(parsed.store.len(), 2);
        assert_eq!(parsed.diagnostics.len(), 3);
        assert!(matches!(
            parsed.diagnostics[0],
            Diagnostic::MalformedValue { line: 2, .. }
        ));
        assert!(matches!(
            parsed.diagnostics[1],
            Diagnostic::MissingSeparator { line: 3, .. }
        ));
        assert!(matches!(
            parsed.diagnostics[2],
            Diagnostic::EmptyName { line: 4, .. }
        ));
        assert!(parsed.diagnostics.iter().all(Diagnostic::is_skipped_line));
    }

    #[test]
    fn test_value_may_contain_colon_free_name_only() {
        // Only the first colon separates name and value.
        let parsed = parse("a: 1.0: 2.0\n");
        assert!(parsed.store.is_empty());
        assert!(matches!(
            parsed.diagnostics[0],
            Diagnostic::MalformedValue { .. }
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let parsed = parse("a: nan\nb: inf\n");
        assert!(parsed.store.is_empty());
        assert_eq!(parsed.diagnostics.len(), 2);
    }

    #[test]
    fn test_negative_values_kept_with_warning() {
        let parsed = parse("neg: -50.0\n");
        assert_eq!(parsed.store.get("neg"), Some(-50.0));
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::NegativeValue {
                line: 1,
                name: "neg".to_string(),
                value: -50.0
            }]
        );
        assert!(parsed.diagnostics[0].is_data_quality());
    }

    #[test]
    fn test_zero_value_is_not_a_warning() {
        let parsed = parse("zero: 0.0\n");
        assert_eq!(parsed.store.get("zero"), Some(0.0));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let parsed = parse("bench: 100.0\nbench: 200.0\n");
        assert_eq!(parsed.store.get("bench"), Some(200.0));
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::Duplicate {
                line: 2,
                name: "bench".to_string()
            }]
        );
    }

    #[test]
    fn test_truncation_at_line_cap() {
        let text: String = (0..10).map(|i| format!("b{}: {}\n", i, i + 1)).collect();
        let options = ResultFileOptions::default().with_max_lines(4);
        let parsed = parse_results(&text, &options);
        assert_eq!(parsed.store.len(), 4);
        assert!(parsed.truncated());
        assert_eq!(
            parsed.diagnostics.last(),
            Some(&Diagnostic::Truncated { max_lines: 4 })
        );
    }

    #[test]
    fn test_exactly_at_line_cap_is_not_truncated() {
        let text = "a: 1\nb: 2\n";
        let options = ResultFileOptions::default().with_max_lines(2);
        let parsed = parse_results(text, &options);
        assert_eq!(parsed.store.len(), 2);
        assert!(!parsed.truncated());
    }

    /// Yields `bench_N: N` lines forever and counts the lines handed out.
    struct EndlessResults {
        pending: Vec<u8>,
        lines: usize,
    }

    impl io::Read for EndlessResults {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pending.is_empty() {
                self.lines += 1;
                self.pending = format!("bench_{}: {}\n", self.lines, self.lines).into_bytes();
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }
    }

    #[test]
    fn test_reader_stops_at_line_cap_on_endless_input() {
        let mut source = EndlessResults {
            pending: Vec::new(),
            lines: 0,
        };
        let options = ResultFileOptions::default().with_max_lines(5);
        let parsed = parse_reader(BufReader::with_capacity(16, &mut source), &options).unwrap();

        assert_eq!(parsed.store.len(), 5);
        assert_eq!(parsed.store.get("bench_5"), Some(5.0));
        assert_eq!(parsed.diagnostics, vec![Diagnostic::Truncated { max_lines: 5 }]);
        assert!(source.lines <= 7, "read {} lines", source.lines);
    }

    #[test]
    fn test_reader_matches_text_parser() {
        let text = "# header\na: 1.5\r\nbad line\nb: -2\na: 3\n";
        let options = ResultFileOptions::default();
        let from_reader = parse_reader(text.as_bytes(), &options).unwrap();
        assert_eq!(from_reader, parse_results(text, &options));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_result_file(
            Path::new("/nonexistent/results.txt"),
            &ResultFileOptions::default(),
        );
        assert!(matches!(result, Err(BenchError::Io { .. })));
    }

    #[test]
    fn test_read_non_empty_rejects_comment_only_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# only comments").unwrap();
        let result = read_non_empty(file.path(), &ResultFileOptions::default());
        assert!(matches!(result, Err(BenchError::EmptyResults { .. })));
    }

    #[test]
    fn test_render_sorted_with_header() {
        let store: MeasurementStore = [("b", 2.0), ("a", 1.456)].into_iter().collect();
        let text = render_result_file(&store, &ResultHeader::new("rpcgate", 3));
        assert!(text.starts_with("# Performance Results - rpcgate\n"));
        assert!(text.contains("# Method: minimum of 3 runs\n"));
        assert!(text.contains("# Total benchmarks: 2\n"));
        assert!(text.ends_with("a: 1.46\nb: 2.00\n"));
    }

    #[test]
    fn test_write_then_read() {
        let store: MeasurementStore = [("rpc_echo", 1520.25), ("rpc_fault", 33.5)]
            .into_iter()
            .collect();
        let file = NamedTempFile::new().unwrap();
        write_result_file(file.path(), &store, &ResultHeader::new("rpcgate", 1)).unwrap();

        let parsed = read_result_file(file.path(), &ResultFileOptions::default()).unwrap();
        assert_eq!(parsed.store, store);
        assert!(parsed.diagnostics.is_empty());
    }
}

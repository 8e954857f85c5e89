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

//! Human-readable units.

/// Formats nanoseconds with an adaptive unit and two decimals.
///
/// ```
/// use rpcgate_bench::reporters::units::format_ns;
///
/// assert_eq!(format_ns(950.0), "950.00 ns");
/// assert_eq!(format_ns(1_520.0), "1.52 µs");
/// assert_eq!(format_ns(2_500_000.0), "2.50 ms");
/// ```
pub fn format_ns(ns: f64) -> String {
    if ns >= 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else {
        format!("{:.2} ns", ns)
    }
}

/// Formats a percentage without a trailing `.0` for whole numbers.
pub fn format_pct(pct: f64) -> String {
    if pct.fract() == 0.0 && pct.abs() < 1e15 {
        format!("{:.0}%", pct)
    } else {
        format!("{}%", pct)
    }
}

/// Rounds to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ns_boundaries() {
        assert_eq!(format_ns(999.994), "999.99 ns");
        assert_eq!(format_ns(1_000.0), "1.00 µs");
        assert_eq!(format_ns(999_999.0), "1000.00 µs");
        assert_eq!(format_ns(1_000_000.0), "1.00 ms");
        assert_eq!(format_ns(-5.0), "-5.00 ns");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(10.0), "10%");
        assert_eq!(format_pct(12.5), "12.5%");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1234.56, 1), 1234.6);
        assert_eq!(round_to(0.0004, 3), 0.0);
        assert_eq!(round_to(1.23456, 3), 1.235);
    }
}

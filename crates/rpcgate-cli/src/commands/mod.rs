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

//! CLI command implementations

mod compare;
mod rps;
mod select_min;

pub use compare::{compare, CompareOptions, ReportFormat};
pub use rps::{rps, RpsOptions, ScenarioChoice};
pub use select_min::{select_min, SelectMinOptions};

use crate::error::CliError;
use rpcgate_bench::reporters::github;

/// Successful result of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report, exit 0.
    Passed,
    /// At least one benchmark regressed, exit 1.
    Regressed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Regressed => 1,
        }
    }
}

/// Prints `lines` to stdout when GitHub Actions annotations are enabled.
fn annotate(enabled: bool, lines: impl IntoIterator<Item = String>) {
    if enabled {
        for line in lines {
            println!("{}", line);
        }
    }
}

/// Mirrors a failed command as an `::error::` annotation.
fn annotate_failure<T>(enabled: bool, result: Result<T, CliError>) -> Result<T, CliError> {
    if let Err(e) = &result {
        annotate(enabled, [github::error(e.to_string())]);
    }
    result
}

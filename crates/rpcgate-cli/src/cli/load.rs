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

//! Load generation commands.

use crate::commands::{self, Outcome, RpsOptions};
use crate::error::CliError;
use clap::Subcommand;
use rpcgate_bench::core::{
    DEFAULT_CALL_TIMEOUT, DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT, DEFAULT_REQUESTS,
    DEFAULT_WARMUP_REQUESTS,
};

/// Load commands.
#[derive(Subcommand)]
pub enum LoadCommands {
    /// Measure XML-RPC server throughput and latency
    ///
    /// Calls `echo` with a small struct and a 1 MiB string payload across a
    /// sweep of concurrent clients, each holding one keep-alive connection.
    Rps {
        /// Server hostname
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Server port
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// HTTP path of the XML-RPC endpoint
        #[arg(long, default_value = DEFAULT_PATH)]
        path: String,

        /// Number of requests per scenario and client count
        #[arg(long, default_value_t = DEFAULT_REQUESTS)]
        requests: u64,

        /// Comma-separated client counts
        #[arg(long, default_value = "1,2,4,8,16")]
        clients: String,

        /// Warmup requests before measuring, per client count
        #[arg(long, default_value_t = DEFAULT_WARMUP_REQUESTS)]
        warmup: u64,

        /// Which scenario to run (small, large, both)
        #[arg(long, default_value = "both")]
        scenario: String,

        /// Request count for the large payload scenario (unset or 0: min(1000, requests))
        #[arg(long)]
        large_requests: Option<u64>,

        /// Per-call timeout in seconds
        #[arg(long, default_value_t = DEFAULT_CALL_TIMEOUT.as_secs())]
        timeout_secs: u64,

        /// Output format (table, csv, json)
        #[arg(long, default_value = "table")]
        output: String,

        /// Suppress the banner and informational logging
        #[arg(short, long)]
        quiet: bool,
    },
}

impl LoadCommands {
    /// Execute the load command.
    pub fn execute(self) -> Result<Outcome, CliError> {
        match self {
            LoadCommands::Rps {
                host,
                port,
                path,
                requests,
                clients,
                warmup,
                scenario,
                large_requests,
                timeout_secs,
                output,
                quiet,
            } => commands::rps(&RpsOptions {
                host,
                port,
                path,
                requests,
                clients,
                warmup,
                scenario: scenario.parse()?,
                large_requests,
                timeout_secs,
                output: output.parse()?,
                quiet,
            }),
        }
    }

    pub(crate) fn quiet(&self) -> bool {
        match self {
            LoadCommands::Rps { quiet, .. } => *quiet,
        }
    }
}

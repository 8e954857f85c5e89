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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into the following modules:
//!
//! - [`gate`]: Offline gating commands (compare, select-min)
//! - [`load`]: Load generation against a live server (rps)

mod gate;
mod load;

use crate::commands::Outcome;
use crate::error::CliError;
use clap::Subcommand;

pub use gate::GateCommands;
pub use load::LoadCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Gate (compare, select-min)
/// └── Load (rps)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use rpcgate_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Gating commands - flattened to appear at top level
    #[command(flatten)]
    Gate(GateCommands),

    // Load commands - flattened to appear at top level
    #[command(flatten)]
    Load(LoadCommands),
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Returns
    ///
    /// The command's [`Outcome`], which decides the exit status.
    ///
    /// # Errors
    ///
    /// Returns `Err` for invalid configuration, unusable input files, a
    /// failed write or an unreachable server.
    pub fn execute(self) -> Result<Outcome, CliError> {
        match self {
            Commands::Gate(cmd) => cmd.execute(),
            Commands::Load(cmd) => cmd.execute(),
        }
    }

    /// Returns `true` if the command asked for reduced output.
    pub fn quiet(&self) -> bool {
        match self {
            Commands::Gate(_) => false,
            Commands::Load(cmd) => cmd.quiet(),
        }
    }
}

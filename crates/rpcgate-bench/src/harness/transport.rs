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

//! Call capability consumed by the load harness.
//!
//! The harness never speaks a wire protocol itself. It asks a
//! [`CallTarget`] for connections and invokes methods on them by name.
//! Each worker exclusively owns the connection it opened.

use thiserror::Error;

/// Failure of a single call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    /// The connection failed, was refused or was closed by the peer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call exceeded the per-call timeout.
    #[error("call timed out: {0}")]
    Timeout(String),

    /// The server answered with an application-level fault.
    #[error("fault {code}: {message}")]
    Fault {
        /// Fault code reported by the server
        code: i64,
        /// Fault description
        message: String,
    },

    /// The server answered with something that is not a valid response.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl CallError {
    /// Returns `true` if the call may succeed on a fresh connection.
    ///
    /// Transport failures and timeouts qualify; faults and protocol errors
    /// do not.
    pub fn is_transport(&self) -> bool {
        matches!(self, CallError::Transport(_) | CallError::Timeout(_))
    }

    /// Short, stable name of the error kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Transport(_) => "Transport",
            CallError::Timeout(_) => "Timeout",
            CallError::Fault { .. } => "Fault",
            CallError::Protocol(_) => "Protocol",
        }
    }
}

/// An open, reusable connection to the system under test.
pub trait RpcConnection {
    /// Argument type passed to every call.
    type Payload: ?Sized;
    /// Decoded response.
    type Response;

    /// Calls `method` with `payload` and waits for the response.
    fn call(&mut self, method: &str, payload: &Self::Payload)
        -> Result<Self::Response, CallError>;
}

/// Something the harness can open connections to.
///
/// Shared by reference across worker threads, so it must be `Sync`.
pub trait CallTarget: Sync {
    /// Argument type, shared read-only across workers.
    type Payload: ?Sized + Sync;
    /// Decoded response.
    type Response;
    /// Connection type produced by [`CallTarget::connect`].
    type Connection: RpcConnection<Payload = Self::Payload, Response = Self::Response>;

    /// Opens a new connection.
    fn connect(&self) -> Result<Self::Connection, CallError>;

    /// Human-readable location for logs, such as `localhost:8080`.
    fn describe(&self) -> String {
        "call target".to_string()
    }

    /// Checks that the target accepts connections before a run starts.
    ///
    /// The default opens a connection and drops it. Targets whose
    /// connections open lazily override this with an eager check.
    fn check_reachable(&self) -> Result<(), CallError> {
        self.connect().map(|_| ())
    }
}

/// Performs one call on the connection held in `slot`, reconnecting once.
///
/// An empty `slot` is filled by connecting first. If the first attempt
/// fails at the transport level, the connection is dropped, a new one is
/// opened and the call is retried a single time. A connection is only kept
/// in `slot` if its last call did not fail at the transport level.
pub fn call_with_reconnect<T: CallTarget>(
    target: &T,
    slot: &mut Option<T::Connection>,
    method: &str,
    payload: &T::Payload,
) -> Result<T::Response, CallError> {
    let first = match slot {
        Some(conn) => conn.call(method, payload),
        None => target
            .connect()
            .and_then(|conn| slot.insert(conn).call(method, payload)),
    };
    match first {
        Err(e) if e.is_transport() => {
            tracing::debug!(error = %e, "connection lost, reconnecting");
            *slot = None;
        }
        other => return other,
    }

    let mut conn = target.connect()?;
    let result = conn.call(method, payload);
    if !matches!(&result, Err(e) if e.is_transport()) {
        *slot = Some(conn);
    }
    result
}

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

//! Keep-alive XML-RPC client over HTTP.
//!
//! Every [`XmlRpcConnection`] owns a private `ureq` agent that keeps at
//! most one idle connection to the server, so a harness worker reuses a
//! single socket for all of its calls. HTTP framing (chunked bodies,
//! `Connection: close`, status lines) is handled by `ureq`; this module
//! only encodes the call, bounds the body and maps failures onto
//! [`CallError`].

use crate::codec::{decode_response, encode_call, MethodResponse};
use crate::value::Value;
use rpcgate_bench::core::{DEFAULT_CALL_TIMEOUT, DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT};
use rpcgate_bench::harness::{CallError, CallTarget, RpcConnection};
use std::error::Error as StdError;
use std::io::{self, Read};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Largest response body accepted, in bytes.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;

/// Location and timeout of an XML-RPC server.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRpcTarget {
    host: String,
    port: u16,
    path: String,
    timeout: Duration,
}

impl Default for XmlRpcTarget {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl XmlRpcTarget {
    /// Creates a target with the default path and per-call timeout.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: DEFAULT_PATH.to_string(),
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Sets the request path, such as `/RPC2`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the deadline for a whole call: connect, send and full response.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `http://host:port/path`
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

impl CallTarget for XmlRpcTarget {
    type Payload = Value;
    type Response = Value;
    type Connection = XmlRpcConnection;

    /// Builds a connection; the socket itself opens on the first call.
    fn connect(&self) -> Result<XmlRpcConnection, CallError> {
        Ok(XmlRpcConnection::new(self))
    }

    fn describe(&self) -> String {
        self.url()
    }

    /// Opens and closes one TCP connection, trying each resolved address.
    fn check_reachable(&self) -> Result<(), CallError> {
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                CallError::Transport(format!("cannot resolve {}:{}: {}", self.host, self.port, e))
            })?;

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => {
                    tracing::debug!(%addr, "server reachable");
                    return Ok(());
                }
                Err(e) => last_error = Some(e),
            }
        }
        Err(match last_error {
            Some(e) => io_error(&e),
            None => CallError::Transport(format!(
                "no addresses found for {}:{}",
                self.host, self.port
            )),
        })
    }
}

/// A worker's connection: one agent holding at most one idle socket.
pub struct XmlRpcConnection {
    agent: ureq::Agent,
    url: String,
}

impl std::fmt::Debug for XmlRpcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlRpcConnection")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl XmlRpcConnection {
    /// Creates a connection to `target` without touching the network.
    pub fn new(target: &XmlRpcTarget) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(target.timeout)
            .timeout_connect(target.timeout)
            .max_idle_connections(1)
            .max_idle_connections_per_host(1)
            .redirects(0)
            .user_agent(concat!("rpcgate/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            url: target.url(),
        }
    }

    /// The endpoint this connection posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RpcConnection for XmlRpcConnection {
    type Payload = Value;
    type Response = Value;

    fn call(&mut self, method: &str, payload: &Value) -> Result<Value, CallError> {
        let body = encode_call(method, std::slice::from_ref(payload))?;
        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "text/xml")
            .send_bytes(&body)
            .map_err(ureq_error)?;

        if response.status() != 200 {
            return Err(CallError::Protocol(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        // Reading to the end returns the socket to the agent's pool.
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_RESPONSE_BYTES as u64 + 1)
            .read_to_end(&mut body)
            .map_err(|e| io_error(&e))?;
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(CallError::Protocol(format!(
                "response body exceeds limit of {} bytes",
                MAX_RESPONSE_BYTES
            )));
        }

        match decode_response(&body)? {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Fault { code, message } => Err(CallError::Fault { code, message }),
        }
    }
}

fn ureq_error(err: ureq::Error) -> CallError {
    match err {
        ureq::Error::Status(status, _) => CallError::Protocol(format!("HTTP status {}", status)),
        ureq::Error::Transport(transport) => {
            if timed_out(&transport) {
                return CallError::Timeout(transport.to_string());
            }
            match transport.kind() {
                ureq::ErrorKind::BadStatus
                | ureq::ErrorKind::BadHeader
                | ureq::ErrorKind::InvalidUrl
                | ureq::ErrorKind::UnknownScheme
                | ureq::ErrorKind::TooManyRedirects => CallError::Protocol(transport.to_string()),
                _ => CallError::Transport(transport.to_string()),
            }
        }
    }
}

/// Walks the source chain looking for an I/O timeout.
fn timed_out(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<io::Error>() {
            if is_timeout_kind(io.kind()) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

fn io_error(err: &io::Error) -> CallError {
    if is_timeout_kind(err.kind()) {
        CallError::Timeout(err.to_string())
    } else {
        CallError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults() {
        let target = XmlRpcTarget::default();
        assert_eq!(target.url(), "http://localhost:8080/RPC");
        assert_eq!(target.timeout(), Duration::from_secs(30));

        let target = XmlRpcTarget::new("10.0.0.1", 9000)
            .with_path("/xmlrpc")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(target.describe(), "http://10.0.0.1:9000/xmlrpc");
        assert_eq!(target.timeout(), Duration::from_millis(250));
        assert_eq!(target.host(), "10.0.0.1");
        assert_eq!(target.port(), 9000);
        assert_eq!(target.path(), "/xmlrpc");
    }

    #[test]
    fn test_connect_is_lazy() {
        // Port 9 on a documentation address; nothing is dialed until a call.
        let target = XmlRpcTarget::new("192.0.2.1", 9);
        let conn = target.connect().unwrap();
        assert_eq!(conn.url(), "http://192.0.2.1:9/RPC");
    }

    #[test]
    fn test_io_error_classification() {
        let timeout = io::Error::new(io::ErrorKind::WouldBlock, "would block");
        assert!(matches!(io_error(&timeout), CallError::Timeout(_)));
        let timeout = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert!(matches!(io_error(&timeout), CallError::Timeout(_)));
        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        assert!(matches!(io_error(&reset), CallError::Transport(_)));
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_timeout_found_in_source_chain() {
        let nested = Wrapped(io::Error::new(io::ErrorKind::TimedOut, "deadline"));
        assert!(timed_out(&nested));
        let nested = Wrapped(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(!timed_out(&nested));
    }
}

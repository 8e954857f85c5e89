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

//! XML-RPC transport for the rpcgate load harness.
//!
//! Implements [`rpcgate_bench::harness::CallTarget`] for XML-RPC servers
//! reached over HTTP/1.1 keep-alive connections.
//!
//! # Modules
//!
//! - [`value`] - The XML-RPC value model
//! - [`codec`] - `methodCall` / `methodResponse` encoding and decoding
//! - [`client`] - Keep-alive connection and call target
//! - [`payload`] - The small and large `echo` payloads
//! - [`error`] - Codec errors
//!
//! # Example
//!
//! ```rust,no_run
//! use rpcgate_bench::harness::run_benchmark;
//! use rpcgate_bench::HarnessConfig;
//! use rpcgate_xmlrpc::{small_payload, XmlRpcTarget};
//!
//! let target = XmlRpcTarget::new("localhost", 8080);
//! let config = HarnessConfig::new(1_000, 4, 100);
//! let result = run_benchmark(&target, "echo", &small_payload(), &config)?;
//! println!("{:.1} req/s", result.throughput_per_sec);
//! # Ok::<(), rpcgate_bench::BenchError>(())
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod payload;
pub mod value;

pub use client::{XmlRpcConnection, XmlRpcTarget};
pub use codec::{
    decode_call, decode_response, encode_call, encode_fault, encode_response, MethodResponse,
};
pub use error::XmlRpcError;
pub use payload::{large_payload, small_payload};
pub use value::Value;

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

//! Error types for XML-RPC encoding and decoding

use rpcgate_bench::harness::CallError;
use thiserror::Error;

/// Errors that can occur while encoding a call or decoding a response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XmlRpcError {
    /// The document is not well-formed XML.
    ///
    /// # Example
    ///
    /// ```text
    /// XML parse error at position 42: expected </value>, found <int>
    /// ```
    #[error("XML parse error at position {pos}: {message}")]
    Parse {
        /// Byte offset in the document where the error was detected
        pos: usize,
        /// Description of the parsing error
        message: String,
    },

    /// Writing the XML document failed.
    #[error("Failed to write {context}: {message}")]
    Write {
        /// What was being written
        context: String,
        /// Underlying error message
        message: String,
    },

    /// Values nest deeper than [`crate::codec::MAX_DEPTH`].
    #[error("XML-RPC value nesting exceeds maximum depth of {max}")]
    RecursionLimitExceeded {
        /// Maximum allowed depth
        max: usize,
    },

    /// Well-formed XML that is not a valid XML-RPC document.
    #[error("Invalid XML-RPC document: {0}")]
    Structure(String),

    /// A scalar element whose text does not parse as its declared type.
    #[error("Invalid <{kind}> value: '{text}'")]
    InvalidValue {
        /// Element name such as `int` or `boolean`
        kind: &'static str,
        /// Offending text
        text: String,
    },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, XmlRpcError>;

/// A response the client cannot interpret is a protocol error, never a
/// transport failure, so it is not retried on a new connection.
impl From<XmlRpcError> for CallError {
    fn from(err: XmlRpcError) -> Self {
        CallError::Protocol(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = XmlRpcError::InvalidValue {
            kind: "int",
            text: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid <int> value: 'abc'");

        let err = XmlRpcError::RecursionLimitExceeded { max: 64 };
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_converts_to_protocol_error() {
        let call: CallError = XmlRpcError::Structure("missing <params>".to_string()).into();
        assert!(matches!(call, CallError::Protocol(ref m) if m.contains("missing <params>")));
        assert!(!call.is_transport());
    }
}

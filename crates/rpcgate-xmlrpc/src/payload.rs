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

//! Standard request payloads for the `echo` scenarios.

use crate::value::Value;

/// Size of the large payload string, 1 MiB.
pub const LARGE_PAYLOAD_BYTES: usize = 1024 * 1024;

/// A small login-style struct, typical of a control-plane call.
pub fn small_payload() -> Value {
    Value::structure([
        ("Username", Value::from("user")),
        ("Password", Value::from("12345678")),
        ("Server", Value::from("SERVER")),
        ("Method", Value::from("Method_API")),
        ("Params", Value::Array(vec![Value::Int(87654321)])),
    ])
}

/// A single string of [`LARGE_PAYLOAD_BYTES`] `x` characters.
pub fn large_payload() -> Value {
    Value::String("x".repeat(LARGE_PAYLOAD_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_payload_members() {
        let payload = small_payload();
        assert_eq!(payload.member("Username").and_then(Value::as_str), Some("user"));
        assert_eq!(
            payload.member("Params"),
            Some(&Value::Array(vec![Value::Int(87654321)]))
        );
    }

    #[test]
    fn test_large_payload_size() {
        assert_eq!(large_payload().as_str().map(str::len), Some(1_048_576));
    }
}

// This file is part of the tf-azurerm-network project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Encoded configurations and states exchanged with the host

use std::fmt::Display;

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};

/// Configuration, plan or state as handed over by the host
///
/// Terraform sends MessagePack; JSON shows up for states written by older hosts and in
/// fixtures.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RawValue {
    MessagePack(Vec<u8>),
    Json(Vec<u8>),
}

const NULL_MESSAGE_PACK: [u8; 1] = [0xc0_u8];
const NULL_JSON: &[u8] = b"null";

/// Report a codec failure, if any
fn checked<T, E: Display>(diags: &mut Diagnostics, decoded: Result<T, E>) -> Option<T> {
    decoded
        .map_err(|err| diags.root_error_short(format!("malformed payload: {err}")))
        .ok()
}

impl RawValue {
    /// An empty payload stands for null
    pub fn is_null(&self) -> bool {
        match self {
            RawValue::MessagePack(bytes) => bytes.is_empty() || bytes[..] == NULL_MESSAGE_PACK,
            RawValue::Json(bytes) => bytes.is_empty() || bytes[..] == *NULL_JSON,
        }
    }

    /// Decode into a typed state; returns [`None`] iff an error was reported
    pub fn deserialize<'a, T: Deserialize<'a>>(&'a self, diags: &mut Diagnostics) -> Option<T> {
        match self {
            Self::MessagePack(bytes) if bytes.is_empty() => {
                checked(diags, rmp_serde::from_slice(&NULL_MESSAGE_PACK))
            }
            Self::MessagePack(bytes) => checked(diags, rmp_serde::from_slice(bytes)),
            Self::Json(bytes) if bytes.is_empty() => checked(diags, serde_json::from_slice(NULL_JSON)),
            Self::Json(bytes) => checked(diags, serde_json::from_slice(bytes)),
        }
    }

    /// Encode as MessagePack, with field names
    pub fn serialize<T: Serialize>(diags: &mut Diagnostics, value: &T) -> Option<RawValue> {
        checked(diags, rmp_serde::to_vec_named(value)).map(Self::MessagePack)
    }

    pub fn serialize_json<T: Serialize>(diags: &mut Diagnostics, value: &T) -> Option<RawValue> {
        checked(diags, serde_json::to_vec(value)).map(Self::Json)
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::MessagePack(NULL_MESSAGE_PACK.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Value, ValueNumber, ValueString};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Port {
        name: ValueString,
        port: ValueNumber,
    }

    #[test]
    fn message_pack_unknown_survives() {
        let mut diags = Diagnostics::default();
        let port = Port {
            name: Value::Value("http".into()),
            port: Value::Unknown,
        };
        let raw = RawValue::serialize(&mut diags, &port).unwrap();
        let back: Port = raw.deserialize(&mut diags).unwrap();
        assert_eq!(back, port);
        assert!(!diags.has_errors());
    }

    #[test]
    fn empty_payload_is_null() {
        let mut diags = Diagnostics::default();
        let raw = RawValue::Json(Vec::new());
        assert!(raw.is_null());
        let value: ValueString = raw.deserialize(&mut diags).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn invalid_json_reports_error() {
        let mut diags = Diagnostics::default();
        let raw = RawValue::Json(b"{".to_vec());
        assert!(raw.deserialize::<Port>(&mut diags).is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn json_state_is_read_back() {
        let mut diags = Diagnostics::default();
        let port = Port {
            name: Value::Value("https".into()),
            port: Value::Value(443),
        };
        let raw = RawValue::serialize_json(&mut diags, &port).unwrap();
        assert_eq!(raw, RawValue::Json(br#"{"name":"https","port":443}"#.to_vec()));
        assert_eq!(raw.deserialize::<Port>(&mut diags), Some(port));
    }
}

//! Wire payload published to every panel topic.
//!
//! Shape: `{"msg": <string>}` or `{"msg": <string>, "opt": <value>}`.
//! Panel firmware parses this object, so the field names are frozen.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ContractError, NotificationRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub msg: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt: Option<Value>,
}

impl Payload {
    /// Build the payload for a request. Empty options are dropped entirely.
    pub fn from_request(request: &NotificationRequest) -> Self {
        let opt = request
            .options
            .as_ref()
            .filter(|value| has_content(value))
            .cloned();

        Self {
            msg: request.message.clone(),
            opt,
        }
    }

    /// Compact JSON encoding.
    ///
    /// Deterministic: object keys inside `opt` are emitted in sorted order.
    pub fn encode(&self) -> Result<Bytes, ContractError> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|source| ContractError::PayloadCodec {
                operation: "encode",
                source,
            })
    }

    pub fn decode(data: &[u8]) -> Result<Self, ContractError> {
        serde_json::from_slice(data).map_err(|source| ContractError::PayloadCodec {
            operation: "decode",
            source,
        })
    }
}

/// Whether an options value carries anything worth publishing.
///
/// `null`, `""`, `[]`, `{}`, `false` and numeric zero count as empty.
pub fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

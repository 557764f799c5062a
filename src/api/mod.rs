pub mod device;
pub mod schedule;
pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Generic success acknowledgment returned by device and schedule calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Acknowledgment of a manual feeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedAck {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// Error body sent by the server on failure. `detail` is usually a string,
/// but validation failures carry a list of objects instead.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null => None,
            Value::Array(items) => {
                let msgs: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .map(String::from)
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let resp: ErrorResponse =
            serde_json::from_str(r#"{"detail":"User with email 'a@b.c' already exists."}"#)
                .unwrap();
        assert_eq!(
            resp.message().as_deref(),
            Some("User with email 'a@b.c' already exists.")
        );

        let resp: ErrorResponse = serde_json::from_str(
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#,
        )
        .unwrap();
        assert_eq!(
            resp.message().as_deref(),
            Some("value is not a valid email address")
        );

        let resp: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.message(), None);
    }
}

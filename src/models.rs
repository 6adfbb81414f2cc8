use serde::Serialize;
use serde_json::{Map, Value};

/// One submitted row: any JSON object, keys in submission order.
pub type Record = Map<String, Value>;

pub type Payload = Vec<Record>;

#[derive(Debug, Serialize)]
pub struct ProcessDataResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProcessDataResponse {
    pub fn accepted(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            error: None,
            details: None,
        }
    }

    pub fn rejected(error: &str, details: Option<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            details,
        }
    }
}

//! Pulls a JSON object out of a model's free-text reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no JSON object found in reply")]
    NoJsonObject,
    #[error("embedded JSON could not be parsed: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeVerdict {
    pub marks_obtained: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub reasoning: String,
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn extract_json_object(text: &str) -> Result<Value, ExtractError> {
    let raw = find_json_object(text).ok_or(ExtractError::NoJsonObject)?;
    serde_json::from_str(raw).map_err(|e| ExtractError::InvalidJson(e.to_string()))
}

pub fn extract_verdict(text: &str) -> Result<GradeVerdict, ExtractError> {
    let value = extract_json_object(text)?;
    serde_json::from_value(value).map_err(|e| ExtractError::InvalidJson(e.to_string()))
}

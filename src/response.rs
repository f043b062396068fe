//! Normalization of raw gateway responses into result records.

use crate::catalog::Operation;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key the QR image is attached under.
pub const QR_BINARY_KEY: &str = "qrcode";

/// File name given to the QR attachment.
pub const QR_FILE_NAME: &str = "qrcode.png";

/// Binary payload extracted from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryAttachment {
    /// Base64-encoded content, without any data-URI prefix.
    pub data: String,
    pub file_name: String,
    pub mime_type: String,
}

impl BinaryAttachment {
    /// Decode the base64 payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.trim())
    }
}

/// Output record for one processed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub json: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BTreeMap<String, BinaryAttachment>>,
}

impl NormalizedResult {
    pub fn json(json: Value) -> Self {
        Self { json, binary: None }
    }

    pub fn attachment(&self, key: &str) -> Option<&BinaryAttachment> {
        self.binary.as_ref().and_then(|b| b.get(key))
    }
}

/// Map a raw response for `operation` into a [`NormalizedResult`].
///
/// Only `qr` responses carrying both `mimetype` and `data` produce an
/// attachment. Anything else, including a QR response without an image
/// (the session is already authenticated), is passed through as JSON.
pub fn normalize_response(operation: Operation, raw: Value) -> NormalizedResult {
    if operation != Operation::Qr {
        return NormalizedResult::json(raw);
    }

    let mime_type = raw.get("mimetype").and_then(Value::as_str).unwrap_or_default();
    let data = raw.get("data").and_then(Value::as_str).unwrap_or_default();
    if mime_type.is_empty() || data.is_empty() {
        return NormalizedResult::json(raw);
    }

    let attachment = BinaryAttachment {
        data: strip_data_uri(data, mime_type).to_string(),
        file_name: QR_FILE_NAME.to_string(),
        mime_type: mime_type.to_string(),
    };

    let mut binary = BTreeMap::new();
    binary.insert(QR_BINARY_KEY.to_string(), attachment);
    NormalizedResult {
        json: raw,
        binary: Some(binary),
    }
}

/// Remove a leading `data:<mime_type>;base64,` prefix, if present.
fn strip_data_uri<'a>(data: &'a str, mime_type: &str) -> &'a str {
    data.strip_prefix("data:")
        .and_then(|rest| rest.strip_prefix(mime_type))
        .and_then(|rest| rest.strip_prefix(";base64,"))
        .unwrap_or(data)
}

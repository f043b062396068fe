//! Mapping from a resolved operation and its field values to an HTTP request.

use crate::catalog::{self, FieldKind, FieldSpec, Operation, OperationDescriptor, Resource};
use crate::error::{Error, Result};
use crate::fields::{parse_poll_options, FieldValues};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestIntent {
    pub method: Method,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestIntent {
    fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
        }
    }

    fn post(url: String, body: Option<Value>) -> Self {
        Self {
            method: Method::Post,
            url,
            body,
        }
    }
}

/// Build the request for `resource`/`operation` against a gateway session.
pub fn build_request(
    resource: Resource,
    operation: Operation,
    session: &str,
    base_url: &str,
    fields: &FieldValues,
) -> Result<RequestIntent> {
    let descriptor = catalog::lookup(resource, operation)?;
    build_for(descriptor, session, base_url, fields)
}

/// Build the request for an already resolved descriptor.
pub fn build_for(
    descriptor: &OperationDescriptor,
    session: &str,
    base_url: &str,
    fields: &FieldValues,
) -> Result<RequestIntent> {
    if session.trim().is_empty() || session.contains('/') {
        return Err(Error::InvalidFieldValue {
            field: "session".to_string(),
            expected: "a non-empty path segment",
        });
    }
    let values = resolve_fields(descriptor, fields)?;
    let base = base_url.trim_end_matches('/');

    let intent = match descriptor.operation {
        Operation::SendText => RequestIntent::post(
            format!("{base}/{session}/messages/send-text"),
            Some(json!({
                "chatId": resolved(&values, "chatId")?,
                "text": resolved(&values, "text")?,
            })),
        ),
        // Same endpoint as plain text; the gateway tells a poll apart by the
        // presence of the `poll` object.
        Operation::SendPoll => RequestIntent::post(
            format!("{base}/{session}/messages/send-text"),
            Some(json!({
                "chatId": resolved(&values, "chatId")?,
                "poll": {
                    "name": resolved(&values, "title")?,
                    "options": resolved(&values, "pollOptions")?,
                    "multipleAnswers": resolved(&values, "multipleAnswers")?,
                },
            })),
        ),
        Operation::Start => RequestIntent::post(
            format!("{base}/sessions/{session}/start"),
            Some(json!({ "webhookUrl": resolved(&values, "webhookUrl")? })),
        ),
        Operation::Stop => RequestIntent::post(format!("{base}/sessions/{session}/stop"), None),
        Operation::Me => RequestIntent::get(format!("{base}/sessions/{session}/me")),
        Operation::Qr => RequestIntent::get(format!("{base}/sessions/{session}/auth/qr")),
        Operation::Sessions => {
            return Err(Error::UnknownOperation {
                resource: descriptor.resource,
                operation: descriptor.operation,
            })
        }
    };

    debug!(
        operation = %descriptor.operation,
        method = %intent.method,
        url = %intent.url,
        "built request intent"
    );
    Ok(intent)
}

/// Coerce every declared field to its kind, applying defaults for absent
/// optional fields.
fn resolve_fields(descriptor: &OperationDescriptor, fields: &FieldValues) -> Result<Map<String, Value>> {
    let mut resolved = Map::new();
    for spec in descriptor.fields {
        let value = match fields.get(spec.name).filter(|v| !v.is_null()) {
            Some(raw) => coerce(spec, raw)?,
            None if spec.required => {
                return Err(Error::MissingRequiredField(spec.name.to_string()))
            }
            None => coerce(spec, &spec.default.to_value())?,
        };
        if spec.required && value.as_str().is_some_and(|s| s.trim().is_empty()) {
            return Err(Error::MissingRequiredField(spec.name.to_string()));
        }
        resolved.insert(spec.name.to_string(), value);
    }
    Ok(resolved)
}

/// A resolved value the request body needs. Descriptors built outside the
/// catalog may not declare it.
fn resolved(values: &Map<String, Value>, name: &str) -> Result<Value> {
    values
        .get(name)
        .cloned()
        .ok_or_else(|| Error::MissingRequiredField(name.to_string()))
}

fn coerce(spec: &FieldSpec, raw: &Value) -> Result<Value> {
    let invalid = || Error::InvalidFieldValue {
        field: spec.name.to_string(),
        expected: spec.kind.expected(),
    };

    match spec.kind {
        FieldKind::String | FieldKind::MultilineString => match raw {
            Value::String(s) => Ok(Value::String(s.clone())),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            _ => Err(invalid()),
        },
        FieldKind::Boolean => match raw {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        },
        FieldKind::DelimitedList => match raw {
            Value::String(s) => Ok(json!(parse_poll_options(s))),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::trim))
                .collect::<Option<Vec<_>>>()
                .map(|options| options.into_iter().filter(|o| !o.is_empty()).collect::<Vec<_>>())
                .map(|options| json!(options))
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
    }
}

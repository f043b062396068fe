mod form;

pub use form::form_schema;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Resource / Operation identifiers
// ============================================================================

/// Top-level category an operation is scoped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Chatting,
    Session,
    Auth,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Chatting, Resource::Session, Resource::Auth];

    /// Wire name, as used in form values and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chatting => "chatting",
            Self::Session => "session",
            Self::Auth => "auth",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chatting => "Chatting",
            Self::Session => "Session",
            Self::Auth => "Auth",
        }
    }

    /// Operation a form preselects when this resource is chosen.
    pub fn default_operation(self) -> Operation {
        match self {
            Self::Chatting => Operation::SendText,
            Self::Session => Operation::Start,
            Self::Auth => Operation::Qr,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "chatting" => Ok(Self::Chatting),
            "session" => Ok(Self::Session),
            "auth" => Ok(Self::Auth),
            _ => Err(format!("invalid resource: {s}")),
        }
    }
}

/// A named unit of work. Only the pairs registered in [`CATALOG`] are executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    SendText,
    SendPoll,
    Me,
    /// Has no catalog entry; resolving it yields `UnknownOperation`.
    Sessions,
    Start,
    Stop,
    Qr,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendText => "sendText",
            Self::SendPoll => "sendPoll",
            Self::Me => "me",
            Self::Sessions => "sessions",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Qr => "qr",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operation {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sendText" => Ok(Self::SendText),
            "sendPoll" => Ok(Self::SendPoll),
            "me" => Ok(Self::Me),
            "sessions" => Ok(Self::Sessions),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "qr" => Ok(Self::Qr),
            _ => Err(format!("invalid operation: {s}")),
        }
    }
}

// ============================================================================
// Field specs
// ============================================================================

/// Semantic kind of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    String,
    MultilineString,
    Boolean,
    /// Semicolon-separated list entered as a single string.
    DelimitedList,
}

impl FieldKind {
    /// Human phrase used in validation errors.
    pub fn expected(self) -> &'static str {
        match self {
            Self::String | Self::MultilineString => "a string",
            Self::Boolean => "a boolean",
            Self::DelimitedList => "a semicolon-separated string",
        }
    }
}

/// Catalog-declared default for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Bool(bool),
}

impl FieldDefault {
    pub fn to_value(self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::String(s.to_string()),
            Self::Bool(b) => serde_json::Value::Bool(b),
        }
    }
}

/// One input field an operation collects from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: FieldDefault,
    pub placeholder: Option<&'static str>,
    pub description: Option<&'static str>,
}

/// Static description of one executable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub resource: Resource,
    pub operation: Operation,
    pub display_name: &'static str,
    pub action: &'static str,
    pub description: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

impl OperationDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

const CHAT_ID: FieldSpec = FieldSpec {
    name: "chatId",
    display_name: "Chat ID",
    kind: FieldKind::String,
    required: true,
    default: FieldDefault::Str(""),
    placeholder: Some("xxxxxxx@c.us"),
    description: None,
};

const SEND_TEXT_FIELDS: &[FieldSpec] = &[
    CHAT_ID,
    FieldSpec {
        name: "text",
        display_name: "Text",
        kind: FieldKind::MultilineString,
        required: true,
        default: FieldDefault::Str(""),
        placeholder: None,
        description: Some("Text to send"),
    },
];

const SEND_POLL_FIELDS: &[FieldSpec] = &[
    CHAT_ID,
    FieldSpec {
        name: "title",
        display_name: "Title",
        kind: FieldKind::String,
        required: true,
        default: FieldDefault::Str(""),
        placeholder: None,
        description: None,
    },
    FieldSpec {
        name: "pollOptions",
        display_name: "Options",
        kind: FieldKind::DelimitedList,
        required: false,
        default: FieldDefault::Str(""),
        placeholder: Some("Semicolon separated option. Ex: option 1;option 2"),
        description: None,
    },
    FieldSpec {
        name: "multipleAnswers",
        display_name: "Multiple Answers",
        kind: FieldKind::Boolean,
        required: false,
        default: FieldDefault::Bool(false),
        placeholder: None,
        description: None,
    },
];

const START_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "webhookUrl",
    display_name: "Webhook URL",
    kind: FieldKind::String,
    required: true,
    default: FieldDefault::Str(""),
    placeholder: Some("https://example.com/webhook/xxxxxxxxx"),
    description: None,
}];

/// Every executable operation, in form order.
pub static CATALOG: &[OperationDescriptor] = &[
    OperationDescriptor {
        resource: Resource::Chatting,
        operation: Operation::SendText,
        display_name: "SendText",
        action: "Send text",
        description: Some("Send Text Message"),
        fields: SEND_TEXT_FIELDS,
    },
    OperationDescriptor {
        resource: Resource::Chatting,
        operation: Operation::SendPoll,
        display_name: "SendPoll",
        action: "Send poll",
        description: None,
        fields: SEND_POLL_FIELDS,
    },
    OperationDescriptor {
        resource: Resource::Session,
        operation: Operation::Me,
        display_name: "Me",
        action: "Me",
        description: None,
        fields: &[],
    },
    OperationDescriptor {
        resource: Resource::Session,
        operation: Operation::Start,
        display_name: "Start",
        action: "Start",
        description: None,
        fields: START_FIELDS,
    },
    OperationDescriptor {
        resource: Resource::Session,
        operation: Operation::Stop,
        display_name: "Stop",
        action: "Stop",
        description: None,
        fields: &[],
    },
    OperationDescriptor {
        resource: Resource::Auth,
        operation: Operation::Qr,
        display_name: "QR",
        action: "QR",
        description: None,
        fields: &[],
    },
];

/// All registered descriptors.
pub fn descriptors() -> &'static [OperationDescriptor] {
    CATALOG
}

/// Descriptors registered under one resource.
pub fn operations_for(resource: Resource) -> impl Iterator<Item = &'static OperationDescriptor> {
    CATALOG.iter().filter(move |d| d.resource == resource)
}

/// Resolve a resource/operation pair to its descriptor.
pub fn lookup(resource: Resource, operation: Operation) -> Result<&'static OperationDescriptor> {
    CATALOG
        .iter()
        .find(|d| d.resource == resource && d.operation == operation)
        .ok_or(Error::UnknownOperation {
            resource,
            operation,
        })
}

//! Client library for WhatsApp-Web-JS HTTP gateways.
//!
//! The [`catalog`] describes which operations exist and which fields they
//! take, [`request`] turns an operation plus field values into a
//! [`RequestIntent`], a [`Transport`] sends it, and [`response`] normalizes
//! what comes back. [`executor::execute_batch`] wires those together for a
//! sequence of input items.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fields;
pub mod logging;
pub mod request;
pub mod response;
pub mod transport;

pub use catalog::{FieldKind, FieldSpec, Operation, OperationDescriptor, Resource};
pub use error::{Error, Result, TransportError};
pub use executor::{execute_batch, BatchPolicy};
pub use fields::{FieldSource, FieldValues};
pub use request::{build_request, Method, RequestIntent};
pub use response::{normalize_response, BinaryAttachment, NormalizedResult};
pub use transport::{ReqwestTransport, Transport};

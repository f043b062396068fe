//! Sequential per-item batch execution.

use crate::catalog::{self, Operation, OperationDescriptor, Resource};
use crate::config::GatewayCredentials;
use crate::error::Result;
use crate::fields::{FieldSource, FieldValues};
use crate::request::build_for;
use crate::response::{normalize_response, NormalizedResult};
use crate::transport::Transport;

use serde_json::json;
use tracing::{debug, info, warn};

/// What to do when an item fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Abort the batch and return the first error.
    #[default]
    FailFast,
    /// Record the failure as `{"error": "..."}` and move on to the next item.
    ContinueOnFail,
}

/// Run one operation over every item of `items`, in order.
///
/// Each item's request completes before the next one is built. The
/// resource/operation pair is resolved once for the whole batch.
pub async fn execute_batch<T, S>(
    transport: &T,
    credentials: &GatewayCredentials,
    resource: Resource,
    operation: Operation,
    items: &S,
    policy: BatchPolicy,
) -> Result<Vec<NormalizedResult>>
where
    T: Transport + ?Sized,
    S: FieldSource + ?Sized,
{
    let descriptor = catalog::lookup(resource, operation)?;
    let count = items.item_count();
    info!(%resource, %operation, items = count, "executing batch");

    let mut results = Vec::with_capacity(count);
    for index in 0..count {
        debug!(index, "processing item");
        let outcome = process_item(transport, credentials, descriptor, items, index).await;

        match outcome {
            Ok(result) => results.push(result),
            Err(e) if policy == BatchPolicy::ContinueOnFail => {
                warn!(index, error = %e, "item failed, continuing");
                results.push(NormalizedResult::json(json!({ "error": e.to_string() })));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(results)
}

async fn process_item<T, S>(
    transport: &T,
    credentials: &GatewayCredentials,
    descriptor: &OperationDescriptor,
    items: &S,
    index: usize,
) -> Result<NormalizedResult>
where
    T: Transport + ?Sized,
    S: FieldSource + ?Sized,
{
    let fields: FieldValues = descriptor
        .fields
        .iter()
        .filter_map(|spec| items.field(spec.name, index).map(|v| (spec.name, v)))
        .collect();
    let intent = build_for(descriptor, &credentials.session, &credentials.url, &fields)?;
    let raw = transport.send(&intent).await?;
    Ok(normalize_response(descriptor.operation, raw))
}

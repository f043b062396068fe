//! Host-renderable form description derived from the catalog.
//!
//! Fields are shown conditionally on the selected resource and operation.
//! A field declared by several operations (e.g. `chatId`) appears once with
//! every operation listed in its show-condition.

use super::{descriptors, operations_for, FieldKind, FieldSpec, Resource};
use serde_json::{json, Map, Value};

/// Rows a multi-line input renders with.
const MULTILINE_ROWS: u32 = 4;

/// Build the JSON form schema for every registered operation.
pub fn form_schema() -> Value {
    let resources: Vec<Value> = Resource::ALL
        .iter()
        .map(|r| json!({ "name": r.display_name(), "value": r.as_str() }))
        .collect();

    let operations: Vec<Value> = Resource::ALL
        .iter()
        .map(|&resource| {
            let options: Vec<Value> = operations_for(resource)
                .map(|d| {
                    let mut option = json!({
                        "name": d.display_name,
                        "value": d.operation.as_str(),
                        "action": d.action,
                    });
                    if let Some(description) = d.description {
                        option["description"] = json!(description);
                    }
                    option
                })
                .collect();
            json!({
                "resource": resource.as_str(),
                "options": options,
                "default": resource.default_operation().as_str(),
            })
        })
        .collect();

    // Preserve first-declaration order while merging show-conditions.
    let mut fields: Vec<(&'static FieldSpec, Vec<&str>, Vec<&str>)> = Vec::new();
    for d in descriptors() {
        for spec in d.fields {
            match fields.iter_mut().find(|(f, _, _)| f.name == spec.name) {
                Some((_, resources, operations)) => {
                    if !resources.contains(&d.resource.as_str()) {
                        resources.push(d.resource.as_str());
                    }
                    operations.push(d.operation.as_str());
                }
                None => fields.push((
                    spec,
                    vec![d.resource.as_str()],
                    vec![d.operation.as_str()],
                )),
            }
        }
    }

    let fields: Vec<Value> = fields
        .into_iter()
        .map(|(spec, resources, operations)| field_entry(spec, &resources, &operations))
        .collect();

    json!({
        "resources": resources,
        "defaultResource": Resource::Chatting.as_str(),
        "operations": operations,
        "fields": fields,
    })
}

fn field_entry(spec: &FieldSpec, resources: &[&str], operations: &[&str]) -> Value {
    let mut entry = Map::new();
    entry.insert("displayName".into(), json!(spec.display_name));
    entry.insert("name".into(), json!(spec.name));
    entry.insert(
        "type".into(),
        json!(match spec.kind {
            FieldKind::Boolean => "boolean",
            _ => "string",
        }),
    );
    entry.insert("kind".into(), json!(spec.kind));
    entry.insert("required".into(), json!(spec.required));
    entry.insert("default".into(), spec.default.to_value());
    if let Some(placeholder) = spec.placeholder {
        entry.insert("placeholder".into(), json!(placeholder));
    }
    if let Some(description) = spec.description {
        entry.insert("description".into(), json!(description));
    }
    if matches!(spec.kind, FieldKind::MultilineString | FieldKind::DelimitedList) {
        entry.insert("typeOptions".into(), json!({ "rows": MULTILINE_ROWS }));
    }
    entry.insert(
        "displayOptions".into(),
        json!({ "show": { "resource": resources, "operation": operations } }),
    );
    Value::Object(entry)
}

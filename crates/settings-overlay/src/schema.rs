//! JSON-schema export
//!
//! Builds a draft 2020-12 schema from a [`RecordSpec`] and the record's
//! serialized defaults. Nested records and enums are emitted once under
//! `$defs` and referenced with `$ref`. Every property carries the
//! non-standard `updatable` keyword.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{ConfigError, Result};
use crate::field::{FieldKind, FieldSpec, RecordSpec};

/// Dialect declared by generated schemas.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Extension keyword carrying the per-field override policy.
pub const UPDATABLE_KEYWORD: &str = "updatable";

/// Build the schema for `spec`, taking defaults from `defaults`.
pub fn record_schema(spec: &RecordSpec, defaults: &Value) -> Value {
    let mut defs = Map::new();
    let mut root = object_schema(spec, defaults, &mut defs);
    root.insert("$schema".to_string(), json!(SCHEMA_DIALECT));
    if !defs.is_empty() {
        root.insert("$defs".to_string(), Value::Object(defs));
    }
    Value::Object(root)
}

fn object_schema(spec: &RecordSpec, defaults: &Value, defs: &mut Map<String, Value>) -> Map<String, Value> {
    let properties: Map<String, Value> = spec
        .fields
        .iter()
        .map(|field| {
            let default = defaults.get(field.name).cloned().unwrap_or(Value::Null);
            (field.name.to_string(), property_schema(field, default, defs))
        })
        .collect();

    let mut schema = Map::new();
    schema.insert("title".to_string(), json!(spec.name));
    schema.insert("description".to_string(), json!(spec.description));
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema
}

fn property_schema(field: &FieldSpec, default: Value, defs: &mut Map<String, Value>) -> Value {
    let mut property = Map::new();

    match field.kind {
        FieldKind::Record(nested) => {
            if !defs.contains_key(nested.name) {
                let nested_schema = object_schema(nested, &default, defs);
                defs.insert(nested.name.to_string(), Value::Object(nested_schema));
            }
            property.insert("$ref".to_string(), json!(def_ref(nested.name)));
        }
        FieldKind::Enum(spec) => {
            defs.entry(spec.name.to_string()).or_insert_with(|| {
                json!({
                    "title": spec.name,
                    "description": spec.description,
                    "type": "string",
                    "enum": spec.variants,
                })
            });
            property.insert("$ref".to_string(), json!(def_ref(spec.name)));
        }
        FieldKind::String | FieldKind::Integer | FieldKind::Number => {
            property.insert("title".to_string(), json!(field.title()));
            if let Some(json_type) = field.kind.json_type() {
                property.insert("type".to_string(), json!(json_type));
            }
        }
    }

    if let Some(minimum) = field.bounds.minimum {
        property.insert("minimum".to_string(), bound(field, minimum));
    }
    if let Some(maximum) = field.bounds.maximum {
        property.insert("maximum".to_string(), bound(field, maximum));
    }

    property.insert("default".to_string(), default);
    property.insert(UPDATABLE_KEYWORD.to_string(), json!(field.updatable));
    Value::Object(property)
}

/// Integer fields get integer bounds so `0` does not render as `0.0`.
fn bound(field: &FieldSpec, value: f64) -> Value {
    match field.kind {
        FieldKind::Integer if value.fract() == 0.0 => json!(value as i64),
        _ => json!(value),
    }
}

fn def_ref(name: &str) -> String {
    format!("#/$defs/{}", name)
}

/// File name a record's schema is written to: `<TypeName>.schema.json`.
pub fn schema_file_name(spec: &RecordSpec) -> String {
    format!("{}.schema.json", spec.name)
}

/// Write `schema` as pretty JSON to `path`, replacing any existing file.
///
/// The parent directory is created if missing.
pub fn write_schema(schema: &Value, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(schema)?;
    fs::write(path, json).map_err(|e| ConfigError::io(path, e))?;

    tracing::info!(path = %path.display(), "schema saved");
    Ok(path.to_path_buf())
}

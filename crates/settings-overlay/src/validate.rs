//! Constraint validation against a record description
//!
//! Checks a merged JSON value field by field before it is decoded into
//! the typed record, so failures carry the dotted path of the offending
//! field and the constraint it broke.

use serde_json::Value;

use crate::error::{ConfigError, Result, Violation};
use crate::field::{join_path, Bounds, FieldKind, RecordSpec};

/// Validate `value` against `spec`.
///
/// Keys without a matching field are not inspected; the merge step has
/// already decided what to do with them.
pub fn validate_record(spec: &RecordSpec, value: &Value) -> Result<()> {
    check_record(spec, value, "")
}

fn check_record(spec: &RecordSpec, value: &Value, path: &str) -> Result<()> {
    let map = value.as_object().ok_or_else(|| {
        ConfigError::invalid(
            root_or(path),
            Violation::TypeMismatch {
                expected: "object",
                found: json_kind(value),
            },
        )
    })?;

    for field in spec.fields {
        let field_path = join_path(path, field.name);
        let field_value = map
            .get(field.name)
            .ok_or_else(|| ConfigError::invalid(field_path.clone(), Violation::Missing))?;
        check_field(field.kind, field.bounds, field_value, &field_path)?;
    }

    Ok(())
}

fn check_field(kind: FieldKind, bounds: Bounds, value: &Value, path: &str) -> Result<()> {
    let mismatch = || {
        ConfigError::invalid(
            path,
            Violation::TypeMismatch {
                expected: kind.describe(),
                found: json_kind(value),
            },
        )
    };

    match kind {
        FieldKind::String => {
            value.as_str().ok_or_else(mismatch)?;
        }
        FieldKind::Integer => {
            let number = value.as_f64().ok_or_else(mismatch)?;
            if !(value.is_i64() || value.is_u64() || is_whole(number)) {
                return Err(mismatch());
            }
            check_bounds(bounds, number, path)?;
        }
        FieldKind::Number => {
            let number = value.as_f64().ok_or_else(mismatch)?;
            check_bounds(bounds, number, path)?;
        }
        FieldKind::Enum(spec) => {
            let text = value.as_str().ok_or_else(mismatch)?;
            if !spec.contains(text) {
                return Err(ConfigError::invalid(
                    path,
                    Violation::UnknownVariant {
                        value: text.to_string(),
                        allowed: spec.variants.to_vec(),
                    },
                ));
            }
        }
        FieldKind::Record(spec) => check_record(spec, value, path)?,
    }

    Ok(())
}

fn is_whole(number: f64) -> bool {
    number.is_finite() && number.fract() == 0.0
}

/// Rewrite whole-number floats held by integer fields (`15.0`) as JSON
/// integers so they decode into the record's integer types.
///
/// Run after [`validate_record`]; values it would reject are left alone.
pub(crate) fn normalize_integers(spec: &RecordSpec, value: &mut Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    for field in spec.fields {
        let Some(field_value) = map.get_mut(field.name) else {
            continue;
        };
        match field.kind {
            FieldKind::Integer if field_value.is_f64() => {
                if let Some(number) = field_value.as_f64().filter(|n| is_whole(*n)) {
                    *field_value = if number < 0.0 {
                        Value::from(number as i64)
                    } else {
                        Value::from(number as u64)
                    };
                }
            }
            FieldKind::Record(nested) => normalize_integers(nested, field_value),
            _ => {}
        }
    }
}

fn check_bounds(bounds: Bounds, actual: f64, path: &str) -> Result<()> {
    if let Some(minimum) = bounds.minimum {
        if actual < minimum {
            return Err(ConfigError::invalid(
                path,
                Violation::BelowMinimum { minimum, actual },
            ));
        }
    }
    if let Some(maximum) = bounds.maximum {
        if actual > maximum {
            return Err(ConfigError::invalid(
                path,
                Violation::AboveMaximum { maximum, actual },
            ));
        }
    }
    Ok(())
}

fn root_or(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// JSON type name of a value, for diagnostics.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Override merge logic
//!
//! Deep-merges a user document onto a base record value with:
//! - Nested records: deep-merge by key (recursive)
//! - Updatable leaves: override (document wins, type checked later)
//! - Non-updatable fields: base value kept
//! - Unknown keys: dropped
//!
//! The last two cases are either recorded or turned into errors depending
//! on [`OverrideOptions`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result, Violation};
use crate::field::{join_path, FieldKind, RecordSpec};
use crate::validate::json_kind;

/// What to do with a key the merge cannot apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Skip the key and record it in the [`MergeReport`].
    #[default]
    Ignore,
    /// Fail the merge.
    Reject,
}

/// Per-call override policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideOptions {
    /// Keys with no corresponding field.
    pub unknown_keys: KeyPolicy,
    /// Keys naming a field that is not updatable.
    pub locked_fields: KeyPolicy,
}

impl OverrideOptions {
    /// Reject both unknown keys and locked fields.
    pub fn strict() -> Self {
        Self {
            unknown_keys: KeyPolicy::Reject,
            locked_fields: KeyPolicy::Reject,
        }
    }
}

/// Dotted paths touched by a merge, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Leaves taken from the document.
    pub applied: Vec<String>,
    /// Non-updatable fields the document tried to change.
    pub suppressed: Vec<String>,
    /// Keys with no corresponding field.
    pub ignored: Vec<String>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.suppressed.is_empty() && self.ignored.is_empty()
    }

    fn sort(&mut self) {
        self.applied.sort();
        self.suppressed.sort();
        self.ignored.sort();
    }
}

/// Merge `overlay` onto `base` following the field policy in `spec`.
///
/// The overlay must be a JSON object; anything else fails with a
/// validation error at the root. The returned value is not validated.
pub fn merge_overrides(
    spec: &RecordSpec,
    base: Value,
    overlay: Value,
    options: &OverrideOptions,
) -> Result<(Value, MergeReport)> {
    let overlay = match overlay {
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::invalid(
                "<root>",
                Violation::TypeMismatch {
                    expected: "object",
                    found: json_kind(&other),
                },
            ))
        }
    };

    let base = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut report = MergeReport::default();
    let merged = merge_record(spec, base, overlay, "", options, &mut report)?;
    report.sort();
    Ok((Value::Object(merged), report))
}

fn merge_record(
    spec: &RecordSpec,
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
    path: &str,
    options: &OverrideOptions,
    report: &mut MergeReport,
) -> Result<Map<String, Value>> {
    for (key, overlay_value) in overlay {
        let key_path = join_path(path, &key);

        let Some(field) = spec.field(&key) else {
            if options.unknown_keys == KeyPolicy::Reject {
                return Err(ConfigError::UnknownKey { path: key_path });
            }
            tracing::warn!(field = %key_path, "ignoring unknown override key");
            report.ignored.push(key_path);
            continue;
        };

        if !field.updatable {
            if options.locked_fields == KeyPolicy::Reject {
                return Err(ConfigError::LockedField { path: key_path });
            }
            tracing::warn!(field = %key_path, "field is not updatable, keeping base value");
            report.suppressed.push(key_path);
            continue;
        }

        let merged = match (field.kind, base.remove(&key), overlay_value) {
            // Both objects: deep merge
            (FieldKind::Record(nested), Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                Value::Object(merge_record(
                    nested,
                    base_map,
                    overlay_map,
                    &key_path,
                    options,
                    report,
                )?)
            }
            // Leaves and any other case: overlay wins
            (_, _, overlay_value) => {
                report.applied.push(key_path);
                overlay_value
            }
        };
        base.insert(key, merged);
    }

    Ok(base)
}

/// Refresh an existing user document with current values.
///
/// Every key that maps to an updatable leaf is overwritten with the
/// corresponding value from `current`. Non-updatable and unknown keys
/// are left as written.
pub fn refresh_document(
    spec: &RecordSpec,
    document: &mut Value,
    current: &Value,
) -> MergeReport {
    let mut report = MergeReport::default();
    if let (Value::Object(doc), Value::Object(cur)) = (document, current) {
        refresh_record(spec, doc, cur, "", &mut report);
    }
    report.sort();
    report
}

fn refresh_record(
    spec: &RecordSpec,
    document: &mut Map<String, Value>,
    current: &Map<String, Value>,
    path: &str,
    report: &mut MergeReport,
) {
    for (key, doc_value) in document.iter_mut() {
        let key_path = join_path(path, key);

        let (Some(field), Some(current_value)) = (spec.field(key), current.get(key)) else {
            report.ignored.push(key_path);
            continue;
        };

        match (field.kind, doc_value, current_value) {
            (FieldKind::Record(nested), Value::Object(doc_map), Value::Object(cur_map)) => {
                refresh_record(nested, doc_map, cur_map, &key_path, report);
            }
            (_, doc_value, current_value) => {
                if field.updatable {
                    *doc_value = current_value.clone();
                    report.applied.push(key_path);
                } else {
                    tracing::warn!(field = %key_path, "field is not updatable, leaving document value");
                    report.suppressed.push(key_path);
                }
            }
        }
    }
}

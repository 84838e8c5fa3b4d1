//! Typed settings records with JSON-schema export and user overrides.
//!
//! A record is a serde type plus a static [`RecordSpec`] describing each
//! field's type, bounds, and whether a user document may override it.
//! Loading merges a partial JSON document onto the record's defaults,
//! drops changes to non-updatable fields, and re-validates the result.

pub mod error;
pub mod field;
pub mod merge;
pub mod overrides;
pub mod record;
pub mod schema;
pub mod validate;

pub use error::{ConfigError, Result, Violation};
pub use field::{Bounds, EnumSpec, FieldKind, FieldSpec, RecordSpec};
pub use merge::{merge_overrides, KeyPolicy, MergeReport, OverrideOptions};
pub use overrides::{Loaded, OverrideDocument, OverrideSource};
pub use record::{render_pretty, SettingsRecord};
pub use schema::{SCHEMA_DIALECT, UPDATABLE_KEYWORD};
pub use validate::validate_record;

//! The settings record trait
//!
//! Implementors pair a serde type with its static [`RecordSpec`] and get
//! defaults validation, schema export and override loading for free.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::field::RecordSpec;
use crate::merge::{MergeReport, OverrideOptions};
use crate::overrides::{self, Loaded};
use crate::schema;
use crate::validate::validate_record;

/// A typed, validated configuration record.
///
/// `Default` supplies the declared defaults; [`SettingsRecord::spec`]
/// supplies field types, bounds and the override policy.
pub trait SettingsRecord: Serialize + DeserializeOwned + Default + Clone {
    /// Static description of this record's fields.
    fn spec() -> &'static RecordSpec;

    /// Type name used for derived file names.
    fn name() -> &'static str {
        Self::spec().name
    }

    /// `<TypeName>.user.json`
    fn user_file_name() -> String {
        format!("{}.user.json", Self::name())
    }

    /// Validated instance built from the declared defaults.
    ///
    /// Fails only if the defaults themselves break a declared constraint.
    fn defaults() -> Result<Self> {
        let defaults = Self::default();
        defaults.validate()?;
        Ok(defaults)
    }

    /// Check this instance against every field constraint.
    fn validate(&self) -> Result<()> {
        validate_record(Self::spec(), &serde_json::to_value(self)?)
    }

    /// JSON schema describing every field, with the `updatable` keyword.
    fn schema() -> Result<Value> {
        let defaults = serde_json::to_value(Self::default())?;
        Ok(schema::record_schema(Self::spec(), &defaults))
    }

    /// `<base_path>/<TypeName>.schema.json`
    fn schema_path(base_path: impl AsRef<Path>) -> PathBuf {
        base_path.as_ref().join(schema::schema_file_name(Self::spec()))
    }

    /// Write the schema to [`SettingsRecord::schema_path`] and return it.
    fn generate_schema(base_path: impl AsRef<Path>) -> Result<Value> {
        Self::generate_schema_to(Self::schema_path(base_path))
    }

    /// Write the schema to an explicit file path and return it.
    fn generate_schema_to(path: impl AsRef<Path>) -> Result<Value> {
        let generated = Self::schema()?;
        schema::write_schema(&generated, path.as_ref())?;
        Ok(generated)
    }

    /// Defaults with the user document applied.
    ///
    /// With no path, reads `<TypeName>.user.json` from the working
    /// directory. A missing file yields the defaults.
    fn load_with_overrides(path: Option<&Path>) -> Result<Self> {
        Self::load_with_options(path, &OverrideOptions::default()).map(Loaded::into_inner)
    }

    /// Like [`SettingsRecord::load_with_overrides`], with an explicit
    /// policy and provenance in the result.
    fn load_with_options(path: Option<&Path>, options: &OverrideOptions) -> Result<Loaded<Self>> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(Self::user_file_name()));
        overrides::apply_file(&Self::defaults()?, &path, options)
    }

    /// A new record with the document at `path` applied on top of `self`.
    fn update(&self, path: impl AsRef<Path>) -> Result<Self> {
        self.update_with_options(path, &OverrideOptions::default())
            .map(Loaded::into_inner)
    }

    fn update_with_options(
        &self,
        path: impl AsRef<Path>,
        options: &OverrideOptions,
    ) -> Result<Loaded<Self>> {
        overrides::apply_file(self, path.as_ref(), options)
    }

    /// Apply the document at `path` to `self`; left untouched on error.
    fn update_in_place(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = self.update(path)?;
        Ok(())
    }

    /// Refresh the updatable keys of an existing user document with this
    /// record's current values.
    fn write_back(&self, path: impl AsRef<Path>) -> Result<MergeReport> {
        overrides::write_back(self, path.as_ref())
    }
}

/// `{"<TypeName>": {...}}` as pretty JSON.
pub fn render_pretty<T: SettingsRecord>(record: &T) -> Result<String> {
    let mut wrapper = Map::new();
    wrapper.insert(T::name().to_string(), serde_json::to_value(record)?);
    Ok(serde_json::to_string_pretty(&Value::Object(wrapper))?)
}

//! Loading user override documents
//!
//! An override document is read once per call. A missing file means
//! "no overrides"; a file that exists but is not valid JSON is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{ConfigError, Result, Violation};
use crate::merge::{merge_overrides, refresh_document, MergeReport, OverrideOptions};
use crate::record::SettingsRecord;
use crate::validate::{normalize_integers, validate_record};

/// A parsed override document with provenance.
#[derive(Debug, Clone)]
pub struct OverrideDocument {
    pub path: PathBuf,
    /// SHA-256 digest of the raw file bytes, hex encoded.
    pub digest: String,
    pub value: Value,
}

impl OverrideDocument {
    /// Read and parse `path`. Returns `Ok(None)` if the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no override file, using base values");
                return Ok(None);
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let value = serde_json::from_slice(&bytes).map_err(|e| ConfigError::parse(path, e))?;

        Ok(Some(Self {
            path: path.to_path_buf(),
            digest,
            value,
        }))
    }

    pub fn source(&self) -> OverrideSource {
        OverrideSource {
            path: self.path.clone(),
            digest: self.digest.clone(),
        }
    }
}

/// Where the applied overrides came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSource {
    pub path: PathBuf,
    pub digest: String,
}

/// A validated record together with how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loaded<T> {
    pub settings: T,

    /// None when no override file was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<OverrideSource>,

    pub report: MergeReport,

    pub loaded_at: DateTime<Utc>,
}

impl<T> Loaded<T> {
    fn unchanged(settings: T) -> Self {
        Self {
            settings,
            source: None,
            report: MergeReport::default(),
            loaded_at: Utc::now(),
        }
    }

    pub fn into_inner(self) -> T {
        self.settings
    }
}

/// Apply the override document at `path` on top of `base`.
///
/// The base record is serialized, merged with the document under the
/// record's field policy, validated, and decoded into a new record.
/// Nothing is returned unless every step succeeds.
pub fn apply_file<T: SettingsRecord>(
    base: &T,
    path: &Path,
    options: &OverrideOptions,
) -> Result<Loaded<T>> {
    let Some(document) = OverrideDocument::read(path)? else {
        return Ok(Loaded::unchanged(base.clone()));
    };

    let source = document.source();
    let (settings, report) = apply_value(base, document.value, options)?;

    tracing::info!(
        path = %source.path.display(),
        record = T::name(),
        applied = report.applied.len(),
        suppressed = report.suppressed.len(),
        ignored = report.ignored.len(),
        "applied settings overrides"
    );

    Ok(Loaded {
        settings,
        source: Some(source),
        report,
        loaded_at: Utc::now(),
    })
}

/// Apply an already-parsed override value on top of `base`.
pub fn apply_value<T: SettingsRecord>(
    base: &T,
    overlay: Value,
    options: &OverrideOptions,
) -> Result<(T, MergeReport)> {
    let spec = T::spec();
    let base_value = serde_json::to_value(base)?;
    let (merged, report) = merge_overrides(spec, base_value, overlay, options)?;
    let settings = decode(spec, merged)?;
    Ok((settings, report))
}

/// Validate `value` against the record description and decode it.
pub(crate) fn decode<T: SettingsRecord>(spec: &crate::RecordSpec, mut value: Value) -> Result<T> {
    validate_record(spec, &value)?;
    normalize_integers(spec, &mut value);
    serde_json::from_value(value)
        .map_err(|e| ConfigError::invalid("<root>", Violation::Decode(e.to_string())))
}

/// Rewrite the user document at `path` with the current values of `record`.
///
/// Only keys that map to updatable fields are refreshed; everything else
/// in the document is preserved. The file must already exist.
pub fn write_back<T: SettingsRecord>(record: &T, path: &Path) -> Result<MergeReport> {
    let Some(mut document) = OverrideDocument::read(path)? else {
        return Err(ConfigError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "override file does not exist"),
        ));
    };

    let current = serde_json::to_value(record)?;
    let report = refresh_document(T::spec(), &mut document.value, &current);

    let json = serde_json::to_string_pretty(&document.value)?;
    fs::write(path, json).map_err(|e| ConfigError::io(path, e))?;

    tracing::info!(
        path = %path.display(),
        refreshed = report.applied.len(),
        "wrote current settings back to override file"
    );
    Ok(report)
}

//! Vision Settings - typed application and system configuration
//!
//! Declares the settings records shipped with the detector: application
//! settings (object detection, tracking), which users may override, and
//! system settings (NMEA endpoint), which they may not. Loading, schema
//! export and override handling come from [`settings_overlay`].

pub mod app;
pub mod system;

use std::path::{Path, PathBuf};

pub use app::{AppSettings, CnnNetwork, ObjectDetection, Tracker};
pub use settings_overlay::{
    ConfigError, KeyPolicy, Loaded, MergeReport, OverrideOptions, Result, SettingsRecord,
    Violation,
};
pub use system::{Nmea, SystemSettings};

/// Write `<TypeName>.schema.json` for every declared record under `base_path`
/// and return the written paths.
pub fn write_all_schemas(base_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let base_path = base_path.as_ref();
    AppSettings::generate_schema(base_path)?;
    SystemSettings::generate_schema(base_path)?;

    Ok(vec![
        AppSettings::schema_path(base_path),
        SystemSettings::schema_path(base_path),
    ])
}

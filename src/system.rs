//! System settings. Not user-overridable.

use std::fmt;

use serde::{Deserialize, Serialize};
use settings_overlay::{render_pretty, FieldSpec, RecordSpec, SettingsRecord};

/// NMEA configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nmea {
    pub ip_address: String,
    pub port: u16,
}

impl Default for Nmea {
    fn default() -> Self {
        Self {
            ip_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

pub static NMEA: RecordSpec = RecordSpec {
    name: "NMEA",
    description: "NMEA configuration settings",
    fields: &[
        FieldSpec::string("ip_address").locked(),
        FieldSpec::integer("port").min(0.0).max(65535.0).locked(),
    ],
};

/// System settings model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub nmea: Nmea,
}

pub static SYSTEM_SETTINGS: RecordSpec = RecordSpec {
    name: "SystemSettings",
    description: "System settings model",
    fields: &[FieldSpec::record("nmea", &NMEA)],
};

impl SettingsRecord for SystemSettings {
    fn spec() -> &'static RecordSpec {
        &SYSTEM_SETTINGS
    }
}

impl fmt::Display for SystemSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_pretty(self).map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SystemSettings::defaults().unwrap();
        assert_eq!(settings.nmea.ip_address, "127.0.0.1");
        assert_eq!(settings.nmea.port, 8080);
    }

    #[test]
    fn test_nmea_fields_are_locked() {
        assert!(NMEA.fields.iter().all(|f| !f.updatable));
    }

    #[test]
    fn test_port_bounds_match_u16() {
        let port = NMEA.field("port").unwrap();
        assert_eq!(port.bounds.minimum, Some(f64::from(u16::MIN)));
        assert_eq!(port.bounds.maximum, Some(f64::from(u16::MAX)));
    }

    #[test]
    fn test_display() {
        let rendered = SystemSettings::default().to_string();
        assert!(rendered.contains("\"SystemSettings\""));
        assert!(rendered.contains("\"port\": 8080"));
    }
}

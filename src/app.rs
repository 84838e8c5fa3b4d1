//! Application settings: object detection and tracking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use settings_overlay::{
    render_pretty, EnumSpec, FieldSpec, RecordSpec, SettingsRecord, Violation,
};

/// CNN network used for object detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CnnNetwork {
    #[default]
    Dan,
    Ahoy,
    Yolo,
    Cerulean,
}

impl CnnNetwork {
    pub const ALL: [CnnNetwork; 4] = [
        CnnNetwork::Dan,
        CnnNetwork::Ahoy,
        CnnNetwork::Yolo,
        CnnNetwork::Cerulean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CnnNetwork::Dan => "DAN",
            CnnNetwork::Ahoy => "AHOY",
            CnnNetwork::Yolo => "YOLO",
            CnnNetwork::Cerulean => "CERULEAN",
        }
    }
}

impl FromStr for CnnNetwork {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CnnNetwork::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| Violation::UnknownVariant {
                value: s.to_string(),
                allowed: CNN_NETWORK.variants.to_vec(),
            })
    }
}

impl fmt::Display for CnnNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static CNN_NETWORK: EnumSpec = EnumSpec {
    name: "CNNNetwork",
    description: "Enum for CNN network options",
    variants: &["DAN", "AHOY", "YOLO", "CERULEAN"],
};

/// Object detection configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetection {
    pub cnn_network: CnnNetwork,
    /// Smallest object, in pixels, passed on to the tracker
    pub min_object_size: u64,
    pub cnn_confidence_threshold: f64,
}

impl Default for ObjectDetection {
    fn default() -> Self {
        Self {
            cnn_network: CnnNetwork::Dan,
            min_object_size: 6,
            cnn_confidence_threshold: 0.5,
        }
    }
}

pub static OBJECT_DETECTION: RecordSpec = RecordSpec {
    name: "ObjectDetection",
    description: "Object detection configuration settings",
    fields: &[
        FieldSpec::one_of("cnn_network", &CNN_NETWORK),
        FieldSpec::integer("min_object_size").min(0.0),
        FieldSpec::number("cnn_confidence_threshold").min(0.0).max(1.0),
    ],
};

/// Tracker configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    /// Detections required before a track is confirmed
    pub count_min_seen: u64,
    /// Missed frames before a track is dropped
    pub count_max_unseen: u64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            count_min_seen: 10,
            count_max_unseen: 20,
        }
    }
}

pub static TRACKER: RecordSpec = RecordSpec {
    name: "Tracker",
    description: "Tracker configuration settings",
    fields: &[
        FieldSpec::integer("count_min_seen").min(0.0),
        FieldSpec::integer("count_max_unseen").min(0.0),
    ],
};

/// Main application settings model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub object_detection: ObjectDetection,
    pub tracker: Tracker,
}

pub static APP_SETTINGS: RecordSpec = RecordSpec {
    name: "AppSettings",
    description: "Main application settings model",
    fields: &[
        FieldSpec::record("object_detection", &OBJECT_DETECTION),
        FieldSpec::record("tracker", &TRACKER),
    ],
};

impl SettingsRecord for AppSettings {
    fn spec() -> &'static RecordSpec {
        &APP_SETTINGS
    }
}

impl fmt::Display for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_pretty(self).map_err(|_| fmt::Error)?)
    }
}

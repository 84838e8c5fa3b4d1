//! Schema generation and persistence for the declared settings records.

mod fixtures;

use std::fs;

use fixtures::Workspace;
use serde_json::{json, Value};
use vision_settings::{write_all_schemas, AppSettings, ConfigError, SettingsRecord, SystemSettings};

fn assert_valid(schema: &Value, instance: &Value) {
    let validator = jsonschema::validator_for(schema).expect("schema should compile");
    let errors: Vec<String> = validator.iter_errors(instance).map(|e| e.to_string()).collect();
    assert!(errors.is_empty(), "instance rejected: {errors:?}");
}

#[test]
fn test_defaults_validate_against_app_schema() {
    let schema = AppSettings::schema().unwrap();
    let defaults = serde_json::to_value(AppSettings::defaults().unwrap()).unwrap();
    assert_valid(&schema, &defaults);
}

#[test]
fn test_defaults_validate_against_system_schema() {
    let schema = SystemSettings::schema().unwrap();
    let defaults = serde_json::to_value(SystemSettings::defaults().unwrap()).unwrap();
    assert_valid(&schema, &defaults);
}

#[test]
fn test_schema_rejects_out_of_range_values() {
    let schema = AppSettings::schema().unwrap();
    let mut instance = serde_json::to_value(AppSettings::default()).unwrap();
    instance["object_detection"]["cnn_confidence_threshold"] = json!(5.0);

    let validator = jsonschema::validator_for(&schema).unwrap();
    assert!(!validator.is_valid(&instance));

    instance["object_detection"]["cnn_confidence_threshold"] = json!(0.9);
    instance["object_detection"]["cnn_network"] = json!("RESNET");
    assert!(!validator.is_valid(&instance));
}

#[test]
fn test_app_schema_shape() {
    let schema = AppSettings::schema().unwrap();

    assert_eq!(schema["title"], "AppSettings");
    assert_eq!(schema["description"], "Main application settings model");
    assert_eq!(
        schema["properties"]["object_detection"]["$ref"],
        "#/$defs/ObjectDetection"
    );

    let detection = &schema["$defs"]["ObjectDetection"]["properties"];
    assert_eq!(detection["cnn_network"]["$ref"], "#/$defs/CNNNetwork");
    assert_eq!(detection["cnn_network"]["default"], "DAN");
    assert_eq!(detection["min_object_size"]["type"], "integer");
    assert_eq!(detection["min_object_size"]["minimum"], 0);
    assert_eq!(detection["min_object_size"]["default"], 6);
    assert_eq!(detection["cnn_confidence_threshold"]["type"], "number");
    assert_eq!(detection["cnn_confidence_threshold"]["maximum"], 1.0);
    assert_eq!(detection["cnn_confidence_threshold"]["default"], 0.5);

    assert_eq!(
        schema["$defs"]["CNNNetwork"]["enum"],
        json!(["DAN", "AHOY", "YOLO", "CERULEAN"])
    );

    let tracker = &schema["$defs"]["Tracker"]["properties"];
    assert_eq!(tracker["count_min_seen"]["default"], 10);
    assert_eq!(tracker["count_max_unseen"]["default"], 20);
}

#[test]
fn test_every_property_carries_updatable_flag() {
    let app = AppSettings::schema().unwrap();
    for def in ["ObjectDetection", "Tracker"] {
        for (name, property) in app["$defs"][def]["properties"].as_object().unwrap() {
            assert_eq!(property["updatable"], true, "{def}.{name}");
        }
    }

    let system = SystemSettings::schema().unwrap();
    for (name, property) in system["$defs"]["NMEA"]["properties"].as_object().unwrap() {
        assert_eq!(property["updatable"], false, "NMEA.{name}");
    }
    assert_eq!(system["$defs"]["NMEA"]["properties"]["port"]["maximum"], 65535);
}

#[test]
fn test_generate_schema_writes_named_file() {
    let ws = Workspace::new();

    let schema = AppSettings::generate_schema(ws.dir.path()).unwrap();

    assert_eq!(ws.read_json("AppSettings.schema.json"), schema);
}

#[test]
fn test_generate_schema_overwrites_existing_file() {
    let ws = Workspace::new();
    ws.write_raw("SystemSettings.schema.json", "old contents");

    let schema = SystemSettings::generate_schema(ws.dir.path()).unwrap();

    assert_eq!(ws.read_json("SystemSettings.schema.json"), schema);
}

#[test]
fn test_generate_schema_creates_base_directory() {
    let ws = Workspace::new();
    let base = ws.path("schemas/v1");

    AppSettings::generate_schema(&base).unwrap();

    assert!(base.join("AppSettings.schema.json").is_file());
}

#[test]
fn test_generate_schema_unwritable_base_is_io_error() {
    let ws = Workspace::new();
    let blocker = ws.write_raw("not-a-dir", "");

    let err = AppSettings::generate_schema(blocker.join("schemas")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
}

#[test]
fn test_generate_schema_to_explicit_path() {
    let ws = Workspace::new();
    let path = ws.path("custom.json");

    AppSettings::generate_schema_to(&path).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["title"], "AppSettings");
}

#[test]
fn test_write_all_schemas() {
    let ws = Workspace::new();

    let written = write_all_schemas(ws.dir.path()).unwrap();

    assert_eq!(
        written,
        vec![
            ws.path("AppSettings.schema.json"),
            ws.path("SystemSettings.schema.json")
        ]
    );
    for path in &written {
        assert!(path.is_file(), "{} missing", path.display());
    }
    assert_eq!(ws.read_json("SystemSettings.schema.json")["title"], "SystemSettings");
}

//! Integration tests for Settings loading with a local `.course-index.toml`.
//!
//! These tests assume no global config and no `COURSE_INDEX_*` variables,
//! so the local file is merged onto compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use course_index::application::ApplicationError;
use course_index::config::{local_config_path, Settings};
use course_index::domain::{Course, ValidationRules};
use course_index::infrastructure::ServiceContainer;

#[test]
fn given_no_local_config_when_loading_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert!(settings.rebalance_on_load);
    assert_eq!(settings.validation.id_length, 7);
}

#[test]
fn given_partial_local_config_when_loading_then_merged_onto_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
catalog_file = "/srv/abcu/courses.csv"
rebalance_on_load = false

[validation]
name_max = 60
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(
        settings.catalog_file,
        Some(PathBuf::from("/srv/abcu/courses.csv"))
    );
    assert!(!settings.rebalance_on_load);
    assert_eq!(
        settings.validation,
        ValidationRules {
            id_length: 7,
            name_min: 3,
            name_max: 60,
        }
    );
}

#[test]
fn given_inverted_name_bounds_in_local_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[validation]\nname_min = 50\nname_max = 10\n",
    )
    .unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("name_min"));
}

#[test]
fn given_malformed_local_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "rebalance_on_load = maybe\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_loaded_settings_when_building_container_then_catalog_uses_them() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "rebalance_on_load = false\n[validation]\nid_length = 8\n",
    )
    .unwrap();
    let settings = Settings::load(Some(dir.path())).unwrap();

    let container = ServiceContainer::new(settings);

    let eight_char_id = Course::new("CSCI1000", "Compilers", vec![]);
    assert!(container
        .catalog
        .new_index()
        .validate_single_course(&eight_char_id));

    let catalog = dir.path().join("courses.csv");
    fs::write(
        &catalog,
        "CSCI1000,Introduction to Computing\nCSCI1010,Programming,CSCI1000\nCSCI2000,Data Structures,CSCI1010\n",
    )
    .unwrap();
    let index = container.catalog.load(&catalog).unwrap();
    assert_eq!(index.height(), 3, "sorted input stays a list without rebalancing");
}

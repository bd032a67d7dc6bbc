//! Configuration system tests
//!
//! Tests for config paths, session settings, and mapping file loading.

mod common;

use std::fs;

use common::{run, RecordingHost};

use vimkeys::config::Settings;
use vimkeys::config_paths;
use vimkeys::keymap::{self, KeymapError, MappingStore, Mode};
use vimkeys::session::Session;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("vimkeys"));
    }
}

#[test]
fn test_files_live_in_config_dir() {
    let (Some(dir), Some(config), Some(mappings)) = (
        config_paths::config_dir(),
        config_paths::config_file(),
        config_paths::mappings_file(),
    ) else {
        return;
    };
    assert!(config.starts_with(&dir));
    assert!(mappings.starts_with(&dir));
    assert!(config.to_string_lossy().ends_with("config.yaml"));
    assert!(mappings.to_string_lossy().ends_with("mappings.yaml"));
}

// ========================================================================
// Settings Tests
// ========================================================================

#[test]
fn test_settings_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "non_interactive: true\nmapleader: \",\"\ninitial_mode: insert\n",
    )
    .unwrap();

    let settings = Settings::load_from(&path);
    assert!(settings.non_interactive);
    assert_eq!(settings.mapleader, ",");
    assert_eq!(settings.maplocalleader, "\\");
    assert_eq!(settings.initial_mode, Mode::Insert);
}

#[test]
fn test_invalid_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "initial_mode: [not, a, mode]\n").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_missing_settings_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("missing.yaml"));
    assert_eq!(settings, Settings::default());
}

// ========================================================================
// Mapping File Tests
// ========================================================================

const MAPPINGS: &str = r#"
mappings:
  - keys: "<leader>w"
    command: save
  - keys: jk
    command: vi_enter_normal_mode
    modes: [insert]
  - keys: "<leader>/"
    command: toggle_comment
    modes: [n, V]
"#;

#[test]
fn test_load_mapping_file_into_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.yaml");
    fs::write(&path, MAPPINGS).unwrap();

    let mut store = MappingStore::new();
    let added = keymap::load_into(&mut store, &path).unwrap();
    assert_eq!(added, 4);
    assert_eq!(store.len(Mode::Normal), 2);
    assert_eq!(store.len(Mode::Insert), 1);
    assert_eq!(store.len(Mode::VisualLine), 1);

    let keys = "\\w".parse().unwrap();
    let entry = store.find_exact(Mode::Normal, &keys).unwrap();
    assert_eq!(entry.target.name, "save");
}

#[test]
fn test_missing_mapping_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = MappingStore::new();
    let result = keymap::load_into(&mut store, &dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(KeymapError::IoError(_))));
}

#[test]
fn test_malformed_mapping_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.yaml");
    fs::write(&path, "mappings: {keys: 3").unwrap();

    let mut store = MappingStore::new();
    let result = keymap::load_into(&mut store, &path);
    assert!(matches!(result, Err(KeymapError::ParseError(_))));
    assert!(store.is_empty());
}

#[test]
fn test_loaded_mappings_use_session_leader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.yaml");
    fs::write(&path, MAPPINGS).unwrap();

    let settings = Settings {
        mapleader: "<Space>".to_string(),
        ..Settings::default()
    };
    let mut session = Session::new(RecordingHost::default(), &settings);
    keymap::load_into(session.store_mut(), &path).unwrap();

    assert_eq!(run(&mut session, "<Space>w"), vec!["save"]);
}

#[test]
fn test_bundled_example_mappings_load() {
    let mut store = MappingStore::new();
    let mappings = keymap::parse_mapping_yaml(include_str!("../mappings.yaml")).unwrap();
    assert!(keymap::apply_mappings(&mut store, &mappings) > 0);
    assert!(store.len(Mode::OperatorPending) > 0);
}

//! Configuration system tests
//!
//! Tests for config paths, lenient record loading, the YAML store and
//! settings edits made while the controller is running.

mod common;

use common::Harness;
use hoverdock::config::{HoverConfig, SettingsStore, YamlSettingsStore, DEFAULT_TRIGGER_PX};
use hoverdock::config_paths;
use hoverdock::presentation::BodyClass;
use hoverdock::settings::{NumericKey, ToggleKey};
use serde_json::json;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("hoverdock"));
    }
}

#[test]
fn test_settings_file_ends_with_yaml() {
    if let Some(path) = config_paths::settings_file() {
        assert!(path.to_string_lossy().ends_with("settings.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Record Loading Tests
// ========================================================================

#[test]
fn test_non_numeric_trigger_uses_default() {
    let record = common::record(&[("leftSideBarPixelTrigger", json!("abc"))]);
    let cfg = HoverConfig::from_record(&record);
    assert_eq!(cfg.left_trigger_px, DEFAULT_TRIGGER_PX);
    assert_eq!(cfg.left_trigger_px, 20);
}

#[test]
fn test_wrong_types_use_defaults() {
    let record = common::record(&[
        ("leftSidebar", json!("yes")),
        ("sidebarDelay", json!([1, 2])),
        ("overlayMode", json!(null)),
    ]);
    assert_eq!(HoverConfig::from_record(&record), HoverConfig::default());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let record = common::record(&[("somethingElse", json!(42)), ("syncLeftRight", json!(true))]);
    let cfg = HoverConfig::from_record(&record);
    assert!(cfg.sync_left_right);
}

#[test]
fn test_record_round_trip_keeps_persisted_keys() {
    let cfg = HoverConfig {
        double_click_pin: true,
        right_max_width_px: 400,
        ..HoverConfig::default()
    };
    let record = cfg.to_record();
    assert_eq!(record.len(), 12);
    assert_eq!(record.get("rightSidebarMaxWidth"), Some(&json!(400)));
    assert_eq!(HoverConfig::from_record(&record), cfg);
}

// ========================================================================
// YAML Store Tests
// ========================================================================

#[test]
fn test_yaml_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = YamlSettingsStore::new(dir.path().join("settings.yaml"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_yaml_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.yaml");
    let mut store = YamlSettingsStore::new(&path);

    let cfg = HoverConfig {
        collapse_delay_ms: 400,
        overlay_mode: true,
        ..HoverConfig::default()
    };
    store.save(&cfg.to_record()).unwrap();
    assert!(path.exists());

    let loaded = HoverConfig::load(&mut store);
    assert_eq!(loaded, cfg);
}

#[test]
fn test_yaml_store_accepts_hand_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    std::fs::write(
        &path,
        "leftSideBarPixelTrigger: abc\nsidebarExpandDelay: \"25\"\nrightSidebar: false\n",
    )
    .unwrap();

    let cfg = HoverConfig::load(&mut YamlSettingsStore::new(&path));
    assert_eq!(cfg.left_trigger_px, 20);
    assert_eq!(cfg.expand_delay_ms, 25);
    assert!(!cfg.right_enabled);
}

#[test]
fn test_yaml_store_malformed_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "- just\n- a list\n").unwrap();

    let mut store = YamlSettingsStore::new(&path);
    assert!(store.load().is_err());
    assert_eq!(HoverConfig::load(&mut store), HoverConfig::default());
}

// ========================================================================
// Settings Editor Tests
// ========================================================================

#[test]
fn test_edit_persists_and_restyles() {
    let mut h = Harness::new(&[]);

    let edit = h.controller.edit_setting(NumericKey::AnimationMs, "500");
    assert_eq!(edit.value, 500);
    assert!(!edit.defaulted);

    let log = h.presentation.snapshot();
    assert_eq!(log.style_updates, 2);
    assert_eq!(log.style.map(|s| s.animation_ms), Some(500));
    assert_eq!(h.store.record().get("expandCollapseSpeed"), Some(&json!(500)));
}

#[test]
fn test_invalid_edit_substitutes_default() {
    let mut h = Harness::new(&[("leftSideBarPixelTrigger", json!(40))]);

    let edit = h.controller.edit_setting(NumericKey::LeftTriggerPx, "abc");
    assert!(edit.defaulted);
    assert_eq!(edit.value, 20);
    assert_eq!(h.controller.config().left_trigger_px, 20);
    assert_eq!(h.store.record().get("leftSideBarPixelTrigger"), Some(&json!(20)));
}

#[test]
fn test_trigger_edit_does_not_restyle() {
    let mut h = Harness::new(&[]);
    h.controller.edit_setting(NumericKey::RightTriggerPx, "30");
    assert_eq!(h.presentation.snapshot().style_updates, 1);
}

#[test]
fn test_overlay_toggle_updates_marker() {
    let mut h = Harness::new(&[]);

    h.controller.toggle_setting(ToggleKey::OverlayMode, true);
    assert!(h.presentation.snapshot().has_class(BodyClass::OverlayMode));
    h.controller.toggle_setting(ToggleKey::OverlayMode, false);
    assert!(!h.presentation.snapshot().has_class(BodyClass::OverlayMode));
    assert_eq!(h.store.save_count(), 2);
}

#[test]
fn test_edit_takes_effect_on_next_event() {
    let mut h = Harness::new(&[]);
    h.controller.edit_setting(NumericKey::LeftTriggerPx, "120");

    h.pointer(100.0);
    h.wait(10);
    assert!(!h.is_collapsed(hoverdock::Side::Left));
}

#[test]
fn test_edits_while_inactive_only_persist() {
    let mut h = Harness::inactive(hoverdock::sim::SimHost::new(), &[]);

    h.controller.toggle_setting(ToggleKey::OverlayMode, true);
    h.controller.edit_setting(NumericKey::LeftMaxWidthPx, "400");

    let log = h.presentation.snapshot();
    assert!(!log.has_class(BodyClass::OverlayMode));
    assert_eq!(log.style_updates, 0);
    assert_eq!(h.store.save_count(), 2);

    // Activation picks the persisted values up
    h.controller.activate();
    let log = h.presentation.snapshot();
    assert!(log.has_class(BodyClass::OverlayMode));
    assert_eq!(log.style.map(|s| s.left_max_width_px), Some(400));
}

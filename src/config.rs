//! Hover configuration and its persistence
//!
//! The configuration is persisted as a flat key-value record. Loading is
//! lenient: every field is validated on its own and anything missing or
//! invalid falls back to the built-in default for that field.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::panel::Side;

/// Flat key-value settings document as handed to and from the store
pub type SettingsRecord = BTreeMap<String, Value>;

pub const DEFAULT_COLLAPSE_DELAY_MS: u32 = 150;
pub const DEFAULT_EXPAND_DELAY_MS: u32 = 10;
pub const DEFAULT_TRIGGER_PX: u32 = 20;
pub const DEFAULT_ANIMATION_MS: u32 = 370;
pub const DEFAULT_MAX_WIDTH_PX: u32 = 325;

pub const MIN_DELAY_MS: u32 = 0;
pub const MIN_TRIGGER_PX: u32 = 1;
pub const MIN_MAX_WIDTH_PX: u32 = 100;

/// Tunable parameters for the hover state machine
///
/// Field names on disk match the keys users already have in their settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverConfig {
    #[serde(rename = "leftSidebar")]
    pub left_enabled: bool,
    #[serde(rename = "rightSidebar")]
    pub right_enabled: bool,
    /// Hovering either panel expands/collapses both
    #[serde(rename = "syncLeftRight")]
    pub sync_left_right: bool,
    #[serde(rename = "sidebarDelay")]
    pub collapse_delay_ms: u32,
    #[serde(rename = "sidebarExpandDelay")]
    pub expand_delay_ms: u32,
    #[serde(rename = "leftSideBarPixelTrigger")]
    pub left_trigger_px: u32,
    #[serde(rename = "rightSideBarPixelTrigger")]
    pub right_trigger_px: u32,
    /// Visual only
    #[serde(rename = "overlayMode")]
    pub overlay_mode: bool,
    #[serde(rename = "doubleClickPin")]
    pub double_click_pin: bool,
    /// Visual only
    #[serde(rename = "expandCollapseSpeed")]
    pub animation_ms: u32,
    /// Visual only
    #[serde(rename = "leftSidebarMaxWidth")]
    pub left_max_width_px: u32,
    /// Visual only
    #[serde(rename = "rightSidebarMaxWidth")]
    pub right_max_width_px: u32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            left_enabled: true,
            right_enabled: true,
            sync_left_right: false,
            collapse_delay_ms: DEFAULT_COLLAPSE_DELAY_MS,
            expand_delay_ms: DEFAULT_EXPAND_DELAY_MS,
            left_trigger_px: DEFAULT_TRIGGER_PX,
            right_trigger_px: DEFAULT_TRIGGER_PX,
            overlay_mode: false,
            double_click_pin: false,
            animation_ms: DEFAULT_ANIMATION_MS,
            left_max_width_px: DEFAULT_MAX_WIDTH_PX,
            right_max_width_px: DEFAULT_MAX_WIDTH_PX,
        }
    }
}

impl HoverConfig {
    /// Build a config from a possibly partial, possibly malformed record
    pub fn from_record(record: &SettingsRecord) -> Self {
        let d = Self::default();
        Self {
            left_enabled: read_bool(record, "leftSidebar", d.left_enabled),
            right_enabled: read_bool(record, "rightSidebar", d.right_enabled),
            sync_left_right: read_bool(record, "syncLeftRight", d.sync_left_right),
            collapse_delay_ms: read_int(record, "sidebarDelay", MIN_DELAY_MS, d.collapse_delay_ms),
            expand_delay_ms: read_int(
                record,
                "sidebarExpandDelay",
                MIN_DELAY_MS,
                d.expand_delay_ms,
            ),
            left_trigger_px: read_int(
                record,
                "leftSideBarPixelTrigger",
                MIN_TRIGGER_PX,
                d.left_trigger_px,
            ),
            right_trigger_px: read_int(
                record,
                "rightSideBarPixelTrigger",
                MIN_TRIGGER_PX,
                d.right_trigger_px,
            ),
            overlay_mode: read_bool(record, "overlayMode", d.overlay_mode),
            double_click_pin: read_bool(record, "doubleClickPin", d.double_click_pin),
            animation_ms: read_int(record, "expandCollapseSpeed", MIN_DELAY_MS, d.animation_ms),
            left_max_width_px: read_int(
                record,
                "leftSidebarMaxWidth",
                MIN_MAX_WIDTH_PX,
                d.left_max_width_px,
            ),
            right_max_width_px: read_int(
                record,
                "rightSidebarMaxWidth",
                MIN_MAX_WIDTH_PX,
                d.right_max_width_px,
            ),
        }
    }

    /// Flatten into the persisted record shape
    pub fn to_record(&self) -> SettingsRecord {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            // A struct of bools and integers always serializes to an object
            _ => SettingsRecord::new(),
        }
    }

    /// Load through a store, falling back to defaults on any failure
    pub fn load(store: &mut dyn SettingsStore) -> Self {
        match store.load() {
            Ok(record) => Self::from_record(&record),
            Err(e) => {
                tracing::warn!("Failed to load settings, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn side_enabled(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_enabled,
            Side::Right => self.right_enabled,
        }
    }

    pub fn trigger_px(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_trigger_px,
            Side::Right => self.right_trigger_px,
        }
    }
}

fn read_bool(record: &SettingsRecord, key: &str, default: bool) -> bool {
    match record.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            tracing::debug!("settings: {} has non-boolean value {}, using default", key, other);
            default
        }
        None => default,
    }
}

fn read_int(record: &SettingsRecord, key: &str, min: u32, default: u32) -> u32 {
    match record.get(key) {
        Some(value) => normalize_number(number_of(value), min).unwrap_or_else(|| {
            tracing::debug!("settings: {} has invalid value {}, using default", key, value);
            default
        }),
        None => default,
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parse a user-typed number. Empty or non-numeric text yields `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Accept a finite value at or above `min`, rounded to a whole number
pub fn normalize_number(value: Option<f64>, min: u32) -> Option<u32> {
    let v = value?;
    if !v.is_finite() || v < min as f64 {
        return None;
    }
    Some(v.round().min(u32::MAX as f64) as u32)
}

/// Persistence collaborator for the settings record
pub trait SettingsStore {
    /// Load whatever was saved. An empty record means "nothing saved yet".
    fn load(&mut self) -> anyhow::Result<SettingsRecord>;

    fn save(&mut self, record: &SettingsRecord) -> anyhow::Result<()>;
}

/// Settings stored as YAML on disk
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/hoverdock/settings.yaml`
    pub fn default_location() -> Option<Self> {
        crate::config_paths::settings_file().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&mut self) -> anyhow::Result<SettingsRecord> {
        if !self.path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.path.display()
            );
            return Ok(SettingsRecord::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings at {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(SettingsRecord::new());
        }
        let record: SettingsRecord = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings at {}", self.path.display()))?;

        tracing::info!("Loaded settings from {}", self.path.display());
        Ok(record)
    }

    fn save(&mut self, record: &SettingsRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(record).context("Failed to serialize settings")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> SettingsRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_record_is_default() {
        assert_eq!(HoverConfig::from_record(&SettingsRecord::new()), HoverConfig::default());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let cfg = HoverConfig::from_record(&record(&[("sidebarDelay", json!("300"))]));
        assert_eq!(cfg.collapse_delay_ms, 300);
    }

    #[test]
    fn test_below_minimum_falls_back() {
        let cfg = HoverConfig::from_record(&record(&[
            ("leftSideBarPixelTrigger", json!(0)),
            ("rightSidebarMaxWidth", json!(99)),
            ("sidebarExpandDelay", json!(-5)),
        ]));
        assert_eq!(cfg.left_trigger_px, DEFAULT_TRIGGER_PX);
        assert_eq!(cfg.right_max_width_px, DEFAULT_MAX_WIDTH_PX);
        assert_eq!(cfg.expand_delay_ms, DEFAULT_EXPAND_DELAY_MS);
    }

    #[test]
    fn test_zero_delay_is_valid() {
        let cfg = HoverConfig::from_record(&record(&[("sidebarDelay", json!(0))]));
        assert_eq!(cfg.collapse_delay_ms, 0);
    }

    #[test]
    fn test_fractional_values_round() {
        let cfg = HoverConfig::from_record(&record(&[("leftSideBarPixelTrigger", json!(15.6))]));
        assert_eq!(cfg.left_trigger_px, 16);
    }

    #[test]
    fn test_wrong_type_bool_falls_back() {
        let cfg = HoverConfig::from_record(&record(&[("rightSidebar", json!("no"))]));
        assert!(cfg.right_enabled);
    }

    #[test]
    fn test_record_uses_persisted_key_names() {
        let rec = HoverConfig::default().to_record();
        assert_eq!(rec.get("leftSideBarPixelTrigger"), Some(&json!(20)));
        assert_eq!(rec.get("sidebarDelay"), Some(&json!(150)));
        assert_eq!(rec.get("doubleClickPin"), Some(&json!(false)));
        assert_eq!(rec.len(), 12);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(normalize_number(Some(f64::NAN), 0), None);
        assert_eq!(normalize_number(Some(f64::INFINITY), 0), None);
    }
}

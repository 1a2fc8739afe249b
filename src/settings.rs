//! Settings editor validation
//!
//! Typed values are normalized the moment they change: anything empty,
//! non-numeric or below the field minimum becomes the field default. The
//! returned `SettingEffect` tells the caller which presentation outputs must
//! be refreshed right away; every other field takes effect on the next event.

use crate::config::{
    normalize_number, parse_number, HoverConfig, DEFAULT_ANIMATION_MS, DEFAULT_COLLAPSE_DELAY_MS,
    DEFAULT_EXPAND_DELAY_MS, DEFAULT_MAX_WIDTH_PX, DEFAULT_TRIGGER_PX, MIN_DELAY_MS,
    MIN_MAX_WIDTH_PX, MIN_TRIGGER_PX,
};

/// Numeric settings edited as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKey {
    LeftTriggerPx,
    RightTriggerPx,
    CollapseDelayMs,
    ExpandDelayMs,
    AnimationMs,
    LeftMaxWidthPx,
    RightMaxWidthPx,
}

/// Boolean settings edited as toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKey {
    LeftEnabled,
    RightEnabled,
    SyncLeftRight,
    OverlayMode,
    DoubleClickPin,
}

impl NumericKey {
    pub const ALL: [NumericKey; 7] = [
        NumericKey::LeftTriggerPx,
        NumericKey::RightTriggerPx,
        NumericKey::CollapseDelayMs,
        NumericKey::ExpandDelayMs,
        NumericKey::AnimationMs,
        NumericKey::LeftMaxWidthPx,
        NumericKey::RightMaxWidthPx,
    ];

    /// Persisted record key
    pub fn record_key(&self) -> &'static str {
        match self {
            NumericKey::LeftTriggerPx => "leftSideBarPixelTrigger",
            NumericKey::RightTriggerPx => "rightSideBarPixelTrigger",
            NumericKey::CollapseDelayMs => "sidebarDelay",
            NumericKey::ExpandDelayMs => "sidebarExpandDelay",
            NumericKey::AnimationMs => "expandCollapseSpeed",
            NumericKey::LeftMaxWidthPx => "leftSidebarMaxWidth",
            NumericKey::RightMaxWidthPx => "rightSidebarMaxWidth",
        }
    }

    pub fn minimum(&self) -> u32 {
        match self {
            NumericKey::LeftTriggerPx | NumericKey::RightTriggerPx => MIN_TRIGGER_PX,
            NumericKey::CollapseDelayMs | NumericKey::ExpandDelayMs | NumericKey::AnimationMs => {
                MIN_DELAY_MS
            }
            NumericKey::LeftMaxWidthPx | NumericKey::RightMaxWidthPx => MIN_MAX_WIDTH_PX,
        }
    }

    pub fn default_value(&self) -> u32 {
        match self {
            NumericKey::LeftTriggerPx | NumericKey::RightTriggerPx => DEFAULT_TRIGGER_PX,
            NumericKey::CollapseDelayMs => DEFAULT_COLLAPSE_DELAY_MS,
            NumericKey::ExpandDelayMs => DEFAULT_EXPAND_DELAY_MS,
            NumericKey::AnimationMs => DEFAULT_ANIMATION_MS,
            NumericKey::LeftMaxWidthPx | NumericKey::RightMaxWidthPx => DEFAULT_MAX_WIDTH_PX,
        }
    }

    /// Fields mirrored into the style variables
    pub fn affects_style(&self) -> bool {
        matches!(
            self,
            NumericKey::ExpandDelayMs
                | NumericKey::AnimationMs
                | NumericKey::LeftMaxWidthPx
                | NumericKey::RightMaxWidthPx
        )
    }

    fn slot<'a>(&self, config: &'a mut HoverConfig) -> &'a mut u32 {
        match self {
            NumericKey::LeftTriggerPx => &mut config.left_trigger_px,
            NumericKey::RightTriggerPx => &mut config.right_trigger_px,
            NumericKey::CollapseDelayMs => &mut config.collapse_delay_ms,
            NumericKey::ExpandDelayMs => &mut config.expand_delay_ms,
            NumericKey::AnimationMs => &mut config.animation_ms,
            NumericKey::LeftMaxWidthPx => &mut config.left_max_width_px,
            NumericKey::RightMaxWidthPx => &mut config.right_max_width_px,
        }
    }
}

impl ToggleKey {
    pub fn record_key(&self) -> &'static str {
        match self {
            ToggleKey::LeftEnabled => "leftSidebar",
            ToggleKey::RightEnabled => "rightSidebar",
            ToggleKey::SyncLeftRight => "syncLeftRight",
            ToggleKey::OverlayMode => "overlayMode",
            ToggleKey::DoubleClickPin => "doubleClickPin",
        }
    }

    fn slot<'a>(&self, config: &'a mut HoverConfig) -> &'a mut bool {
        match self {
            ToggleKey::LeftEnabled => &mut config.left_enabled,
            ToggleKey::RightEnabled => &mut config.right_enabled,
            ToggleKey::SyncLeftRight => &mut config.sync_left_right,
            ToggleKey::OverlayMode => &mut config.overlay_mode,
            ToggleKey::DoubleClickPin => &mut config.double_click_pin,
        }
    }
}

/// Side effects an accepted edit requires immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingEffect {
    /// Re-apply the style variables
    pub restyle: bool,
    /// Set the overlay marker to this value
    pub overlay: Option<bool>,
}

/// Outcome of a text edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericEdit {
    /// Value now stored in the config
    pub value: u32,
    /// Whether the typed text was rejected in favour of the default
    pub defaulted: bool,
    pub effect: SettingEffect,
}

/// Apply a typed value to a numeric field
pub fn apply_text(config: &mut HoverConfig, key: NumericKey, raw: &str) -> NumericEdit {
    let parsed = normalize_number(parse_number(raw), key.minimum());
    let value = parsed.unwrap_or_else(|| key.default_value());
    *key.slot(config) = value;

    if parsed.is_none() {
        tracing::debug!(key = key.record_key(), raw, value, "invalid setting, using default");
    }

    NumericEdit {
        value,
        defaulted: parsed.is_none(),
        effect: SettingEffect {
            restyle: key.affects_style(),
            overlay: None,
        },
    }
}

/// Apply a toggle to a boolean field
pub fn apply_toggle(config: &mut HoverConfig, key: ToggleKey, value: bool) -> SettingEffect {
    *key.slot(config) = value;
    SettingEffect {
        restyle: false,
        overlay: (key == ToggleKey::OverlayMode).then_some(value),
    }
}

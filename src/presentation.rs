//! Presentation collaborator
//!
//! Write-only outputs: style variables, global body markers and the per-side
//! "hovered" indicator. Nothing here is ever read back by the state machine.

use crate::config::HoverConfig;
use crate::panel::Side;

/// Global marker classes on the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyClass {
    /// Panels slide over content instead of pushing it
    OverlayMode,
    /// Present while the extension is active
    Active,
}

impl BodyClass {
    pub fn class_name(&self) -> &'static str {
        match self {
            BodyClass::OverlayMode => "sidebar-overlay-mode",
            BodyClass::Active => "open-sidebar-hover-plugin",
        }
    }
}

/// Values of the style custom properties derived from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleVars {
    pub animation_ms: u32,
    pub expand_delay_ms: u32,
    pub left_max_width_px: u32,
    pub right_max_width_px: u32,
}

impl StyleVars {
    pub fn from_config(config: &HoverConfig) -> Self {
        Self {
            animation_ms: config.animation_ms,
            expand_delay_ms: config.expand_delay_ms,
            left_max_width_px: config.left_max_width_px,
            right_max_width_px: config.right_max_width_px,
        }
    }

    /// Render as a stylesheet body the host can install verbatim
    pub fn to_css(&self) -> String {
        format!(
            ":root {{\n  --sidebar-expand-collapse-speed: {}ms;\n  --sidebar-expand-delay: {}ms;\n  --left-sidebar-max-width: {}px;\n  --right-sidebar-max-width: {}px;\n}}\n\nbody {{\n  --sidebar-width: {}px !important;\n  --right-sidebar-width: {}px !important;\n}}\n",
            self.animation_ms,
            self.expand_delay_ms,
            self.left_max_width_px,
            self.right_max_width_px,
            self.left_max_width_px,
            self.right_max_width_px,
        )
    }
}

/// Host presentation layer
pub trait Presentation {
    /// Replace the whole style variable block
    fn apply_style(&mut self, vars: &StyleVars);

    fn set_body_class(&mut self, class: BodyClass, on: bool);

    /// Purely visual hover indicator on a panel
    fn set_hovered(&mut self, side: Side, on: bool);
}

/// Presentation that discards everything, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPresentation;

impl Presentation for NoPresentation {
    fn apply_style(&mut self, _vars: &StyleVars) {}
    fn set_body_class(&mut self, _class: BodyClass, _on: bool) {}
    fn set_hovered(&mut self, _side: Side, _on: bool) {}
}

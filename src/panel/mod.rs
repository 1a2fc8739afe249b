//! Panel system - the two edge-anchored panels driven by hover
//!
//! ## Architecture
//!
//! - `Side`: Left or Right edge
//! - `SideMap`: one value per side, so the state machine is written once
//! - `PanelHandle` / `RibbonHandle`: host-implemented objects
//! - `PanelProxy`: facade over one host panel (idempotent expand/collapse)
//! - `BoundPanels`: every reference acquired by a single bind
//!
//! ## Integration
//!
//! - Hit-testing via `PanelProxy::contains()` in `router.rs`
//! - Transitions via `hover.rs`
//! - Rebinding via `runtime/lifecycle.rs`

mod proxy;
mod side;

pub use proxy::{BoundPanels, HandleError, PanelError, PanelHandle, PanelProxy, RibbonHandle};
pub use side::{Side, SideMap};

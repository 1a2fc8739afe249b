//! Activation, teardown and forced reinitialize

mod common;

use common::{Harness, LEFT_INSIDE_X};
use hoverdock::listeners::{EventKind, ListenerTarget, Scope};
use hoverdock::messages::ElementId;
use hoverdock::presentation::BodyClass;
use hoverdock::runtime::{LifecycleState, REINIT_DEBOUNCE_MS};
use hoverdock::sim::SimHost;
use hoverdock::{HostEvent, Side};
use serde_json::json;

/// Three global listeners plus three per panel and one on the ribbon
const FULL_LISTENER_COUNT: usize = 10;

// =============================================================================
// Activation
// =============================================================================

#[test]
fn test_activate_installs_markers_and_style() {
    let h = Harness::new(&[
        ("overlayMode", json!(true)),
        ("expandCollapseSpeed", json!(500)),
    ]);
    let log = h.presentation.snapshot();

    assert!(log.has_class(BodyClass::Active));
    assert!(log.has_class(BodyClass::OverlayMode));
    assert_eq!(log.style_updates, 1);
    assert_eq!(log.style.map(|s| s.animation_ms), Some(500));
    assert_eq!(h.controller.state(), LifecycleState::Active);
}

#[test]
fn test_activate_without_overlay_leaves_marker_off() {
    let h = Harness::new(&[]);
    let log = h.presentation.snapshot();
    assert!(log.has_class(BodyClass::Active));
    assert!(!log.has_class(BodyClass::OverlayMode));
}

#[test]
fn test_listeners_attached_once() {
    let mut h = Harness::new(&[]);
    assert_eq!(h.controller.host().subscription_count(), FULL_LISTENER_COUNT);
    assert_eq!(h.controller.listeners().len(), FULL_LISTENER_COUNT);

    let host = h.controller.host();
    assert!(host.is_subscribed(ListenerTarget::Document, EventKind::PointerMove));
    assert!(host.is_subscribed(ListenerTarget::Document, EventKind::Click));
    assert!(host.is_subscribed(ListenerTarget::Workspace, EventKind::LayoutChange));
    assert!(host.is_subscribed(ListenerTarget::Ribbon, EventKind::MouseEnter));
    for side in Side::ALL {
        assert!(host.is_subscribed(ListenerTarget::Panel(side), EventKind::MouseLeave));
    }

    // A repeated ready notification must not attach anything again
    h.send(HostEvent::LayoutReady);
    assert_eq!(h.controller.host().subscription_count(), FULL_LISTENER_COUNT);
}

#[test]
fn test_host_without_ribbon() {
    let h = Harness::with_host(SimHost::new().without_ribbon(), &[]);
    assert_eq!(
        h.controller.host().subscription_count(),
        FULL_LISTENER_COUNT - 1
    );
}

#[test]
fn test_waits_for_layout_ready() {
    let mut h = Harness::with_host(SimHost::loading(), &[]);
    assert_eq!(h.controller.state(), LifecycleState::WaitingForLayout);
    assert_eq!(h.controller.host().subscription_count(), 0);

    // Nothing is bound yet
    h.pointer(15.0);
    h.wait(100);
    assert_eq!(h.panel(Side::Left).expand_calls(), 0);

    h.controller.host_mut().set_layout_ready(true);
    h.send(HostEvent::LayoutReady);
    assert!(h.controller.is_active());
    assert_eq!(h.controller.host().subscription_count(), FULL_LISTENER_COUNT);

    h.pointer(15.0);
    h.wait(10);
    assert!(!h.is_collapsed(Side::Left));
}

// =============================================================================
// Deactivation
// =============================================================================

#[test]
fn test_deactivate_leaves_nothing_behind() {
    let mut h = Harness::new(&[("overlayMode", json!(true))]);
    h.pointer(15.0);
    h.send(HostEvent::LayoutChange);
    assert!(h.controller.pending_timers() > 0);

    h.controller.deactivate();

    assert_eq!(h.controller.state(), LifecycleState::Inactive);
    assert_eq!(h.controller.host().subscription_count(), 0);
    assert!(h.controller.listeners().is_empty());
    assert_eq!(h.controller.pending_timers(), 0);
    assert_eq!(h.controller.next_deadline(), None);

    let log = h.presentation.snapshot();
    assert!(!log.has_class(BodyClass::Active));
    assert!(!log.has_class(BodyClass::OverlayMode));
    assert!(!log.hovered.left && !log.hovered.right);
}

#[test]
fn test_deactivate_persists_settings() {
    let mut h = Harness::new(&[("sidebarDelay", json!("250"))]);
    let saves = h.store.save_count();

    h.controller.deactivate();

    assert_eq!(h.store.save_count(), saves + 1);
    assert_eq!(h.store.record().get("sidebarDelay"), Some(&json!(250)));
    assert_eq!(h.store.record().get("doubleClickPin"), Some(&json!(false)));
}

#[test]
fn test_events_after_deactivate_are_ignored() {
    let mut h = Harness::new(&[]);
    h.controller.deactivate();

    h.pointer(15.0);
    h.send(HostEvent::RibbonEnter);
    h.wait(1000);
    assert_eq!(h.panel(Side::Left).expand_calls(), 0);
}

#[test]
fn test_deactivate_while_waiting_for_layout() {
    let mut h = Harness::with_host(SimHost::loading(), &[]);
    h.controller.deactivate();
    assert_eq!(h.controller.state(), LifecycleState::Inactive);

    h.controller.host_mut().set_layout_ready(true);
    h.send(HostEvent::LayoutReady);
    assert_eq!(h.controller.state(), LifecycleState::Inactive);
    assert_eq!(h.controller.host().subscription_count(), 0);
}

#[test]
fn test_reactivate_after_deactivate() {
    let mut h = Harness::new(&[]);
    h.controller.deactivate();
    h.controller.activate();

    assert!(h.controller.is_active());
    assert_eq!(h.controller.host().subscription_count(), FULL_LISTENER_COUNT);
    h.pointer(15.0);
    h.wait(10);
    assert!(!h.is_collapsed(Side::Left));
}

// =============================================================================
// Forced reinitialize
// =============================================================================

#[test]
fn test_layout_changes_are_debounced() {
    let mut h = Harness::new(&[]);

    h.send(HostEvent::LayoutChange);
    h.wait(20);
    h.send(HostEvent::LayoutChange);
    assert_eq!(h.controller.next_deadline(), Some(20 + REINIT_DEBOUNCE_MS));

    h.wait(REINIT_DEBOUNCE_MS - 1);
    assert_eq!(h.controller.reinitialize_count(), 0);
    h.wait(1);
    assert_eq!(h.controller.reinitialize_count(), 1);
    h.wait(1000);
    assert_eq!(h.controller.reinitialize_count(), 1);
}

#[test]
fn test_reinitialize_rebinds_replaced_panels() {
    let mut h = Harness::new(&[]);
    let old_left = h.panel(Side::Left);

    h.controller.host_mut().replace_panels();
    assert!(old_left.is_detached());
    h.send(HostEvent::LayoutChange);
    h.wait(REINIT_DEBOUNCE_MS);

    // Global listeners stay, panel listeners are fresh
    assert_eq!(h.controller.host().subscription_count(), FULL_LISTENER_COUNT);
    let panel_scope = h
        .controller
        .listeners()
        .iter()
        .filter(|l| l.scope == Scope::Panels)
        .count();
    assert_eq!(panel_scope, 7);

    h.pointer(15.0);
    h.wait(10);
    assert_eq!(old_left.expand_calls(), 0);
    assert_eq!(h.panel(Side::Left).expand_calls(), 1);
}

#[test]
fn test_reinitialize_collapses_and_drops_pins() {
    let mut h = Harness::new(&common::pin_settings());
    h.pointer(15.0);
    h.wait(10);
    h.send(HostEvent::Click {
        target: ElementId(5),
        x: LEFT_INSIDE_X,
        y: 100.0,
    });
    h.wait(50);
    h.send(HostEvent::Click {
        target: ElementId(5),
        x: LEFT_INSIDE_X,
        y: 100.0,
    });
    assert!(h.is_pinned(Side::Left));

    h.send(HostEvent::LayoutChange);
    h.wait(REINIT_DEBOUNCE_MS);

    assert!(!h.is_pinned(Side::Left));
    assert!(h.is_collapsed(Side::Left));
    assert!(!h.controller.hover_state(Side::Left).is_hovering);
}

#[test]
fn test_reinitialize_collapses_disabled_side_too() {
    let mut h = Harness::new(&[("rightSidebar", json!(false))]);
    h.panel(Side::Right).set_collapsed(false);

    h.send(HostEvent::LayoutChange);
    h.wait(REINIT_DEBOUNCE_MS);

    assert_eq!(h.controller.reinitialize_count(), 1);
    assert!(h.is_collapsed(Side::Right));
    assert_eq!(h.panel(Side::Right).collapse_calls(), 1);
}

#[test]
fn test_pending_expand_is_dropped_by_reinitialize() {
    let mut h = Harness::new(&[("sidebarExpandDelay", json!(300))]);
    h.pointer(15.0);
    h.send(HostEvent::LayoutChange);
    h.wait(1000);

    assert_eq!(h.controller.reinitialize_count(), 1);
    assert_eq!(h.panel(Side::Left).expand_calls(), 0);
}

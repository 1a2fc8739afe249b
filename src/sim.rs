//! In-memory host for tests and scenario replay
//!
//! `SimHost` models a host surface with two panels and a ribbon. Panels
//! record every effective expand/collapse call, can be detached to simulate a
//! layout reload the host has not announced yet, and can be replaced wholesale
//! the way a real layout change does.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::config::{SettingsRecord, SettingsStore};
use crate::geometry::Rect;
use crate::host::Host;
use crate::listeners::{EventKind, ListenerHandle, ListenerTarget};
use crate::panel::{HandleError, PanelHandle, RibbonHandle, Side, SideMap};
use crate::presentation::{BodyClass, Presentation, StyleVars};

pub const SIM_SURFACE_WIDTH: f64 = 1200.0;
pub const SIM_SURFACE_HEIGHT: f64 = 800.0;
pub const SIM_PANEL_WIDTH: f64 = 300.0;
pub const SIM_RIBBON_WIDTH: f64 = 44.0;

/// A host panel with observable call counts
#[derive(Debug)]
pub struct SimPanel {
    side: Side,
    open_region: Rect,
    collapsed: Cell<bool>,
    detached: Cell<bool>,
    expand_calls: Cell<usize>,
    collapse_calls: Cell<usize>,
}

impl SimPanel {
    /// A collapsed panel occupying `open_region` when expanded
    pub fn new(side: Side, open_region: Rect) -> Self {
        Self {
            side,
            open_region,
            collapsed: Cell::new(true),
            detached: Cell::new(false),
            expand_calls: Cell::new(0),
            collapse_calls: Cell::new(0),
        }
    }

    pub fn left() -> Self {
        Self::new(
            Side::Left,
            Rect::new(SIM_RIBBON_WIDTH, 0.0, SIM_PANEL_WIDTH, SIM_SURFACE_HEIGHT),
        )
    }

    pub fn right() -> Self {
        Self::new(
            Side::Right,
            Rect::new(
                SIM_SURFACE_WIDTH - SIM_PANEL_WIDTH,
                0.0,
                SIM_PANEL_WIDTH,
                SIM_SURFACE_HEIGHT,
            ),
        )
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Host-side state change that bypasses the proxy (user clicked the
    /// host's own toggle button, restored layout, ...)
    pub fn set_collapsed(&self, collapsed: bool) {
        self.collapsed.set(collapsed);
    }

    pub fn is_collapsed_now(&self) -> bool {
        self.collapsed.get()
    }

    /// Make every further call fail as a stale reference
    pub fn detach(&self) {
        self.detached.set(true);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.get()
    }

    pub fn expand_calls(&self) -> usize {
        self.expand_calls.get()
    }

    pub fn collapse_calls(&self) -> usize {
        self.collapse_calls.get()
    }

    fn check(&self) -> Result<(), HandleError> {
        if self.detached.get() {
            Err(HandleError::Detached)
        } else {
            Ok(())
        }
    }
}

impl PanelHandle for SimPanel {
    fn expand(&self) -> Result<(), HandleError> {
        self.check()?;
        self.expand_calls.set(self.expand_calls.get() + 1);
        self.collapsed.set(false);
        Ok(())
    }

    fn collapse(&self) -> Result<(), HandleError> {
        self.check()?;
        self.collapse_calls.set(self.collapse_calls.get() + 1);
        self.collapsed.set(true);
        Ok(())
    }

    fn is_collapsed(&self) -> Result<bool, HandleError> {
        self.check()?;
        Ok(self.collapsed.get())
    }

    fn region(&self) -> Result<Rect, HandleError> {
        self.check()?;
        if self.collapsed.get() {
            Ok(Rect {
                width: 0.0,
                ..self.open_region
            })
        } else {
            Ok(self.open_region)
        }
    }
}

#[derive(Debug)]
pub struct SimRibbon {
    region: Rect,
}

impl SimRibbon {
    pub fn new(region: Rect) -> Self {
        Self { region }
    }
}

impl Default for SimRibbon {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, SIM_RIBBON_WIDTH, SIM_SURFACE_HEIGHT))
    }
}

impl RibbonHandle for SimRibbon {
    fn region(&self) -> Result<Rect, HandleError> {
        Ok(self.region)
    }
}

/// Simulated host surface
#[derive(Debug)]
pub struct SimHost {
    layout_ready: bool,
    width: f64,
    panels: SideMap<Option<Rc<SimPanel>>>,
    ribbon: Option<Rc<SimRibbon>>,
    subscriptions: BTreeMap<ListenerHandle, (ListenerTarget, EventKind)>,
    next_handle: u64,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    /// Layout ready, both panels collapsed, ribbon present
    pub fn new() -> Self {
        Self {
            layout_ready: true,
            width: SIM_SURFACE_WIDTH,
            panels: SideMap::new(
                Some(Rc::new(SimPanel::left())),
                Some(Rc::new(SimPanel::right())),
            ),
            ribbon: Some(Rc::new(SimRibbon::default())),
            subscriptions: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Host whose layout is still loading
    pub fn loading() -> Self {
        Self {
            layout_ready: false,
            ..Self::new()
        }
    }

    pub fn set_layout_ready(&mut self, ready: bool) {
        self.layout_ready = ready;
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn without_ribbon(mut self) -> Self {
        self.ribbon = None;
        self
    }

    /// Current panel object; tests hold on to it to observe calls
    pub fn sim_panel(&self, side: Side) -> Option<Rc<SimPanel>> {
        self.panels.get(side).clone()
    }

    /// Simulate a layout reload: the old objects go stale and fresh ones,
    /// carrying over the collapsed state, take their place.
    pub fn replace_panels(&mut self) {
        for side in Side::ALL {
            let slot = self.panels.get_mut(side);
            if let Some(old) = slot.take() {
                old.detach();
                let fresh = SimPanel::new(old.side(), old.open_region);
                fresh.set_collapsed(old.is_collapsed_now());
                *slot = Some(Rc::new(fresh));
            }
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, target: ListenerTarget, event: EventKind) -> bool {
        self.subscriptions
            .values()
            .any(|&(t, e)| t == target && e == event)
    }
}

impl Host for SimHost {
    fn is_layout_ready(&self) -> bool {
        self.layout_ready
    }

    fn panel(&self, side: Side) -> Option<Rc<dyn PanelHandle>> {
        self.panels
            .get(side)
            .clone()
            .map(|p| p as Rc<dyn PanelHandle>)
    }

    fn ribbon(&self) -> Option<Rc<dyn RibbonHandle>> {
        self.ribbon.clone().map(|r| r as Rc<dyn RibbonHandle>)
    }

    fn surface_width(&self) -> f64 {
        self.width
    }

    fn subscribe(&mut self, target: ListenerTarget, event: EventKind) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.subscriptions.insert(handle, (target, event));
        handle
    }

    fn unsubscribe(&mut self, handle: ListenerHandle) {
        if self.subscriptions.remove(&handle).is_none() {
            tracing::warn!(?handle, "unsubscribe of unknown listener");
        }
    }
}

/// Everything written to the presentation layer
#[derive(Debug, Default, Clone)]
pub struct PresentationLog {
    pub style: Option<StyleVars>,
    pub style_updates: usize,
    pub body_classes: HashMap<BodyClass, bool>,
    pub hovered: SideMap<bool>,
}

impl PresentationLog {
    pub fn has_class(&self, class: BodyClass) -> bool {
        self.body_classes.get(&class).copied().unwrap_or(false)
    }
}

/// Presentation that records into a shared log
#[derive(Debug, Default, Clone)]
pub struct RecordingPresentation {
    log: Rc<RefCell<PresentationLog>>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PresentationLog {
        self.log.borrow().clone()
    }
}

impl Presentation for RecordingPresentation {
    fn apply_style(&mut self, vars: &StyleVars) {
        let mut log = self.log.borrow_mut();
        log.style = Some(*vars);
        log.style_updates += 1;
    }

    fn set_body_class(&mut self, class: BodyClass, on: bool) {
        self.log.borrow_mut().body_classes.insert(class, on);
    }

    fn set_hovered(&mut self, side: Side, on: bool) {
        *self.log.borrow_mut().hovered.get_mut(side) = on;
    }
}

/// Settings store kept in memory, shared between clones
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    record: Rc<RefCell<SettingsRecord>>,
    saves: Rc<Cell<usize>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: SettingsRecord) -> Self {
        let store = Self::default();
        *store.record.borrow_mut() = record;
        store
    }

    pub fn record(&self) -> SettingsRecord {
        self.record.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&mut self) -> anyhow::Result<SettingsRecord> {
        Ok(self.record.borrow().clone())
    }

    fn save(&mut self, record: &SettingsRecord) -> anyhow::Result<()> {
        *self.record.borrow_mut() = record.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

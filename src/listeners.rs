//! Listener registry
//!
//! Every subscription we make on the host is recorded here at attach time,
//! and teardown walks exactly this list. Handlers are never reconstructed for
//! removal, so nothing can be left behind.

use crate::host::Host;
use crate::messages::HostEvent;
use crate::panel::Side;

/// Host object a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The whole application surface
    Document,
    /// The host workspace (layout notifications)
    Workspace,
    Panel(Side),
    Ribbon,
}

/// Event name a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    Click,
    MouseEnter,
    MouseLeave,
    MouseMove,
    LayoutChange,
}

/// Token returned by the host for one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

/// Lifetime group of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Attached once on layout ready, detached once on deactivate
    Global,
    /// Re-attached on every forced reinitialize
    Panels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub scope: Scope,
    pub target: ListenerTarget,
    pub event: EventKind,
    pub handle: ListenerHandle,
}

impl HostEvent {
    /// The subscription that must be live for this event to be processed
    pub fn listener_key(&self) -> Option<(ListenerTarget, EventKind)> {
        match self {
            HostEvent::LayoutReady => None,
            HostEvent::LayoutChange => Some((ListenerTarget::Workspace, EventKind::LayoutChange)),
            HostEvent::PointerMove { .. } => Some((ListenerTarget::Document, EventKind::PointerMove)),
            HostEvent::Click { .. } => Some((ListenerTarget::Document, EventKind::Click)),
            HostEvent::PanelEnter { side } => {
                Some((ListenerTarget::Panel(*side), EventKind::MouseEnter))
            }
            HostEvent::PanelLeave { side, .. } => {
                Some((ListenerTarget::Panel(*side), EventKind::MouseLeave))
            }
            HostEvent::PanelMove { side } => {
                Some((ListenerTarget::Panel(*side), EventKind::MouseMove))
            }
            HostEvent::RibbonEnter => Some((ListenerTarget::Ribbon, EventKind::MouseEnter)),
        }
    }
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe on the host and record the subscription
    pub fn attach(
        &mut self,
        host: &mut dyn Host,
        scope: Scope,
        target: ListenerTarget,
        event: EventKind,
    ) {
        let handle = host.subscribe(target, event);
        tracing::debug!(?scope, ?target, ?event, ?handle, "listener attached");
        self.entries.push(Listener {
            scope,
            target,
            event,
            handle,
        });
    }

    /// Unsubscribe every listener of `scope`. Returns how many were removed.
    pub fn detach_scope(&mut self, host: &mut dyn Host, scope: Scope) -> usize {
        let (detach, keep): (Vec<Listener>, Vec<Listener>) =
            self.entries.drain(..).partition(|l| l.scope == scope);
        for listener in &detach {
            host.unsubscribe(listener.handle);
        }
        self.entries = keep;
        tracing::debug!(?scope, count = detach.len(), "listeners detached");
        detach.len()
    }

    /// Unsubscribe everything
    pub fn detach_all(&mut self, host: &mut dyn Host) -> usize {
        let count = self.entries.len();
        for listener in self.entries.drain(..) {
            host.unsubscribe(listener.handle);
        }
        tracing::debug!(count, "all listeners detached");
        count
    }

    pub fn is_attached(&self, target: ListenerTarget, event: EventKind) -> bool {
        self.entries
            .iter()
            .any(|l| l.target == target && l.event == event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.entries.iter()
    }
}

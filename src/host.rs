//! Host collaborator interface
//!
//! The host owns the panels, the ribbon and the event streams. We acquire
//! fresh references through this trait on every bind and never assume an
//! earlier reference is still valid.

use std::rc::Rc;

use crate::listeners::{EventKind, ListenerHandle, ListenerTarget};
use crate::panel::{PanelHandle, RibbonHandle, Side};

pub trait Host {
    /// Whether the host layout has finished loading
    fn is_layout_ready(&self) -> bool;

    /// Current panel object for `side`, if the layout has one
    fn panel(&self, side: Side) -> Option<Rc<dyn PanelHandle>>;

    /// Current ribbon object, if the layout has one
    fn ribbon(&self) -> Option<Rc<dyn RibbonHandle>>;

    /// Width of the application surface, for right-edge proximity
    fn surface_width(&self) -> f64;

    /// Start delivering `event` on `target`
    fn subscribe(&mut self, target: ListenerTarget, event: EventKind) -> ListenerHandle;

    /// Stop delivering the subscription behind `handle`
    fn unsubscribe(&mut self, handle: ListenerHandle);
}

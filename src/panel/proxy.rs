//! Panel proxies over host-owned panel objects
//!
//! The host owns the actual panels. We only hold shared references that are
//! replaced wholesale on every rebind; nothing outside `BoundPanels` caches one.

use std::rc::Rc;

use crate::geometry::{Point, Rect};

use super::side::{Side, SideMap};

/// Failure reported by a host handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The host replaced the underlying object without notifying us
    Detached,
    /// Any other host-side failure
    Failed(String),
}

/// Host-side panel object
///
/// Methods take `&self`: the host owns the panel and mutates it behind its own
/// interior mutability, exactly as a UI tree does.
pub trait PanelHandle {
    fn expand(&self) -> Result<(), HandleError>;
    fn collapse(&self) -> Result<(), HandleError>;
    fn is_collapsed(&self) -> Result<bool, HandleError>;
    fn region(&self) -> Result<Rect, HandleError>;
}

/// Host-side ribbon (auxiliary trigger strip next to the left panel)
pub trait RibbonHandle {
    fn region(&self) -> Result<Rect, HandleError>;
}

/// Error from a proxied panel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The panel reference is stale and must be re-acquired
    Stale(Side),
    /// No panel is bound on this side
    Unbound(Side),
    /// The host reported some other failure
    Host { side: Side, message: String },
}

impl PanelError {
    pub fn side(&self) -> Side {
        match self {
            PanelError::Stale(side) | PanelError::Unbound(side) => *side,
            PanelError::Host { side, .. } => *side,
        }
    }

    fn from_handle(side: Side, err: HandleError) -> Self {
        match err {
            HandleError::Detached => PanelError::Stale(side),
            HandleError::Failed(message) => PanelError::Host { side, message },
        }
    }
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::Stale(side) => write!(f, "stale {} panel reference", side),
            PanelError::Unbound(side) => write!(f, "no {} panel bound", side),
            PanelError::Host { side, message } => {
                write!(f, "{} panel host error: {}", side, message)
            }
        }
    }
}

impl std::error::Error for PanelError {}

/// Thin facade around one host panel
#[derive(Clone)]
pub struct PanelProxy {
    side: Side,
    handle: Rc<dyn PanelHandle>,
}

impl PanelProxy {
    pub fn new(side: Side, handle: Rc<dyn PanelHandle>) -> Self {
        Self { side, handle }
    }

    /// Open the panel. Already-open panels are left alone so the host never
    /// restarts its animation.
    pub fn expand(&self) -> Result<(), PanelError> {
        if !self.is_collapsed()? {
            return Ok(());
        }
        self.handle
            .expand()
            .map_err(|e| PanelError::from_handle(self.side, e))
    }

    /// Close the panel. Pin enforcement is the state machine's job, not ours.
    pub fn collapse(&self) -> Result<(), PanelError> {
        if self.is_collapsed()? {
            return Ok(());
        }
        self.handle
            .collapse()
            .map_err(|e| PanelError::from_handle(self.side, e))
    }

    pub fn is_collapsed(&self) -> Result<bool, PanelError> {
        self.handle
            .is_collapsed()
            .map_err(|e| PanelError::from_handle(self.side, e))
    }

    /// Current bounding box, re-queried on every call since panels resize
    pub fn region(&self) -> Result<Rect, PanelError> {
        self.handle
            .region()
            .map_err(|e| PanelError::from_handle(self.side, e))
    }

    pub fn contains(&self, pt: Point) -> Result<bool, PanelError> {
        Ok(self.region()?.contains(pt))
    }
}

impl std::fmt::Debug for PanelProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelProxy").field("side", &self.side).finish()
    }
}

/// The complete set of host references acquired by one bind
///
/// Swapped as a whole by the lifecycle manager; everything else reads it
/// through the controller and never keeps a copy.
#[derive(Clone, Default)]
pub struct BoundPanels {
    panels: SideMap<Option<PanelProxy>>,
    ribbon: Option<Rc<dyn RibbonHandle>>,
}

impl BoundPanels {
    pub fn new(
        left: Option<Rc<dyn PanelHandle>>,
        right: Option<Rc<dyn PanelHandle>>,
        ribbon: Option<Rc<dyn RibbonHandle>>,
    ) -> Self {
        Self {
            panels: SideMap::new(
                left.map(|h| PanelProxy::new(Side::Left, h)),
                right.map(|h| PanelProxy::new(Side::Right, h)),
            ),
            ribbon,
        }
    }

    pub fn is_bound(&self, side: Side) -> bool {
        self.panels.get(side).is_some()
    }

    pub fn has_ribbon(&self) -> bool {
        self.ribbon.is_some()
    }

    pub fn panel(&self, side: Side) -> Result<&PanelProxy, PanelError> {
        self.panels.get(side).as_ref().ok_or(PanelError::Unbound(side))
    }

    /// Whether the ribbon region contains `pt`. A missing or detached ribbon
    /// simply contains nothing.
    pub fn ribbon_contains(&self, pt: Point) -> bool {
        match &self.ribbon {
            Some(ribbon) => match ribbon.region() {
                Ok(region) => region.contains(pt),
                Err(e) => {
                    tracing::debug!("ribbon region unavailable: {:?}", e);
                    false
                }
            },
            None => false,
        }
    }
}

impl std::fmt::Debug for BoundPanels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundPanels")
            .field("left", &self.panels.left.is_some())
            .field("right", &self.panels.right.is_some())
            .field("ribbon", &self.ribbon.is_some())
            .finish()
    }
}

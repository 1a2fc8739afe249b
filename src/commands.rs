//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that the controller performs after the
//! state machine has processed an intent or a timer.

use crate::messages::TimerMsg;
use crate::panel::Side;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Deliver `msg` back to the state machine after `delay_ms`.
    /// Never cancelled; the handler re-checks state when it fires.
    Schedule { delay_ms: u64, msg: TimerMsg },
    /// Toggle the visual hovered indicator on a panel
    SetHovered { side: Side, on: bool },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening away empty ones
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn schedule(delay_ms: u32, msg: TimerMsg) -> Self {
        Cmd::Schedule {
            delay_ms: delay_ms as u64,
            msg,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Flatten into a list of leaf commands in execution order
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }
}

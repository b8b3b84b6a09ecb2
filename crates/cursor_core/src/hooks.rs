//! Extension points for cursor variants.
//!
//! A cursor delegates classification and state-change reactions to a
//! [`CursorHooks`] value. The defaults implement the plain cursor; variants
//! override only what they need.

use crate::services::EventData;
use crate::state::StateInputs;
use ecs_core::CursorState;

pub trait CursorHooks {
    /// Decide the state for this frame.
    fn check_state(&mut self, inputs: &StateInputs) -> CursorState {
        inputs.classify()
    }

    /// Called before the stored state changes.
    fn on_state_change(&mut self, _from: CursorState, _to: CursorState) {}

    /// Primary input was clicked.
    fn on_input_clicked(&mut self, _data: &EventData) {}

    /// The cursor was shown or hidden.
    fn on_visibility(&mut self, _visible: bool) {}
}

/// Plain cursor behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl CursorHooks for DefaultHooks {}

/// Records every state change; handy for hosts that poll rather than react.
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    pub changes: Vec<(CursorState, CursorState)>,
    pub clicks: usize,
}

impl CursorHooks for RecordingHooks {
    fn on_state_change(&mut self, from: CursorState, to: CursorState) {
        self.changes.push((from, to));
    }

    fn on_input_clicked(&mut self, _data: &EventData) {
        self.clicks += 1;
    }
}

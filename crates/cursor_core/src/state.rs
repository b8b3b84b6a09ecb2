//! Cursor state classification.
//!
//! The next state is a pure function of the current state and three flags;
//! no transition table is stored. `Released` is only reachable from
//! `Selecting`, and `Contextual` absorbs every input until an explicit
//! command replaces it.

use ecs_core::CursorState;

/// Everything the classifier looks at for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateInputs {
    pub current: CursorState,
    pub hand_visible: bool,
    pub input_down: bool,
    pub has_target: bool,
}

impl StateInputs {
    #[must_use]
    pub fn classify(&self) -> CursorState {
        classify(self.current, self.hand_visible, self.input_down, self.has_target)
    }
}

/// Next cursor state, evaluated in strict priority order.
#[must_use]
pub fn classify(
    current: CursorState,
    hand_visible: bool,
    input_down: bool,
    has_target: bool,
) -> CursorState {
    if current == CursorState::Contextual {
        return CursorState::Contextual;
    }
    if input_down {
        return CursorState::Selecting;
    }
    // Only the first frame after the press ends still sees `Selecting`.
    if current == CursorState::Selecting {
        return CursorState::Released;
    }
    if hand_visible {
        return if has_target {
            CursorState::Hovering
        } else {
            CursorState::Interacting
        };
    }
    CursorState::Observing
}

//! Cursor visuals: show/hide handles and the per-state object cursor.

use crate::hooks::CursorHooks;
use anyhow::{Result, bail};
use data_runtime::configs::cursor::StateVisualCfg;
use ecs_core::CursorState;
use ecs_core::parse::parse_cursor_state;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Something the host renders for the cursor.
pub trait CursorVisual {
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;
}

/// Visual backed by a shared flag. Clones observe the same flag, so the
/// host (or a test) can keep one and hand another to the cursor.
#[derive(Clone, Debug, Default)]
pub struct FlagVisual(Rc<Cell<bool>>);

impl FlagVisual {
    #[must_use]
    pub fn new(active: bool) -> Self {
        Self(Rc::new(Cell::new(active)))
    }
}

impl CursorVisual for FlagVisual {
    fn set_active(&mut self, active: bool) {
        self.0.set(active);
    }
    fn is_active(&self) -> bool {
        self.0.get()
    }
}

struct StateVisual {
    state: CursorState,
    name: String,
    visual: Box<dyn CursorVisual>,
}

/// Cursor variant that swaps between one visual per state.
///
/// On a state change the visual bound to the new state becomes the only
/// active one. States without a visual, and `Contextual`, leave the current
/// visual as is. While the cursor is hidden every visual stays off; showing
/// it again brings back the current one.
#[derive(Default)]
pub struct ObjectCursor {
    visuals: Vec<StateVisual>,
    current: Option<usize>,
    hidden: bool,
}

impl ObjectCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visual(
        mut self,
        state: CursorState,
        name: impl Into<String>,
        visual: Box<dyn CursorVisual>,
    ) -> Self {
        self.visuals.push(StateVisual {
            state,
            name: name.into(),
            visual,
        });
        self
    }

    /// Build from config entries; `make` creates the visual for a name.
    pub fn from_cfg(
        entries: &[StateVisualCfg],
        mut make: impl FnMut(&str) -> Box<dyn CursorVisual>,
    ) -> Result<Self> {
        let mut out = Self::new();
        for e in entries {
            let Some(state) = parse_cursor_state(&e.state) else {
                bail!("unknown cursor state '{}' for visual '{}'", e.state, e.visual);
            };
            out = out.with_visual(state, e.visual.clone(), make(&e.visual));
        }
        Ok(out)
    }

    /// Name of the first active visual.
    #[must_use]
    pub fn active_visual(&self) -> Option<&str> {
        self.visuals
            .iter()
            .find(|v| v.visual.is_active())
            .map(|v| v.name.as_str())
    }

    fn show_for(&mut self, state: CursorState) {
        if state == CursorState::Contextual {
            return;
        }
        let Some(idx) = self.visuals.iter().position(|v| v.state == state) else {
            return;
        };
        self.current = Some(idx);
        self.apply();
        debug!(
            target: "cursor",
            state = %state,
            visual = %self.visuals[idx].name,
            hidden = self.hidden,
            "object cursor visual"
        );
    }

    fn apply(&mut self) {
        let shown = if self.hidden { None } else { self.current };
        for (i, v) in self.visuals.iter_mut().enumerate() {
            v.visual.set_active(shown == Some(i));
        }
    }
}

impl CursorHooks for ObjectCursor {
    fn on_state_change(&mut self, _from: CursorState, to: CursorState) {
        self.show_for(to);
    }

    fn on_visibility(&mut self, visible: bool) {
        self.hidden = !visible;
        self.apply();
    }
}

//! Shared plain data for the gaze cursor: ids, transforms and cursor states.

pub mod components;
pub mod parse;

pub use components::{CursorId, CursorState, EntityId, Transform};

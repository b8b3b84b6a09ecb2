//! Parsers for string -> ECS enums for data-driven configs.

use crate::components::CursorState;

/// Case-insensitive cursor state parser with common aliases.
pub fn parse_cursor_state(s: &str) -> Option<CursorState> {
    Some(match s.trim().to_ascii_lowercase().as_str() {
        // canonical
        "none" => CursorState::None,
        "observing" => CursorState::Observing,
        "interacting" => CursorState::Interacting,
        "hovering" => CursorState::Hovering,
        "selecting" => CursorState::Selecting,
        "released" => CursorState::Released,
        "contextual" => CursorState::Contextual,
        // aliases
        "observe" | "gaze" => CursorState::Observing,
        "interact" | "hand" => CursorState::Interacting,
        "hover" => CursorState::Hovering,
        "select" | "pressed" | "down" => CursorState::Selecting,
        "release" | "up" => CursorState::Released,
        "context" | "disabled" => CursorState::Contextual,
        _ => return None,
    })
}

//! Shared component types for the gaze cursor.
//!
//! Plain data shared by the cursor core, the scenario harness and the
//! config parsers. Nothing here owns behavior beyond small helpers.

use glam::{Quat, Vec3};

/// Opaque entity identifier (host-assigned). Stable for the lifetime of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Identifier a cursor uses when registering as a listener or binding to a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorId(pub u32);

/// Discrete interaction state of a cursor.
///
/// Variants are listed in classification priority order after `None`.
/// `Contextual` is a sticky override that only explicit commands enter or leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorState {
    #[default]
    None,
    /// Gaze only; no hand or controller in view.
    Observing,
    /// Hand visible, nothing targeted.
    Interacting,
    /// Hand visible and an object is targeted.
    Hovering,
    /// Primary input held.
    Selecting,
    /// Single frame after the primary input was let go.
    Released,
    Contextual,
}

impl CursorState {
    pub const ALL: [CursorState; 7] = [
        CursorState::None,
        CursorState::Observing,
        CursorState::Interacting,
        CursorState::Hovering,
        CursorState::Selecting,
        CursorState::Released,
        CursorState::Contextual,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CursorState::None => "none",
            CursorState::Observing => "observing",
            CursorState::Interacting => "interacting",
            CursorState::Hovering => "hovering",
            CursorState::Selecting => "selecting",
            CursorState::Released => "released",
            CursorState::Contextual => "contextual",
        }
    }
}

impl std::fmt::Display for CursorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position/rotation/scale triple. Used for both the live cursor pose and
/// the per-frame goal pose.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    #[must_use]
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Local +Z expressed in world space: the direction the cursor faces.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

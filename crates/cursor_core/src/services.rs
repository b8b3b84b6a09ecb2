//! Host services the cursor talks to: gaze, input, pose modifiers.
//!
//! The host owns raycasting and event dispatch. Services are shared with the
//! cursor as `Rc` handles; everything runs on the frame thread.

use ecs_core::{CursorId, CursorState, EntityId, Transform};
use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// Single-threaded shared handle for host services.
pub type Shared<T> = Rc<RefCell<T>>;

/// Result of the host's gaze raycast for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeHit {
    pub point: Vec3,
    pub normal: Vec3,
    /// Object under the ray, when the hit belongs to one.
    pub object: Option<EntityId>,
}

/// Per-frame gaze data plus focus-change listener registration.
pub trait GazeProvider {
    fn hit(&self) -> Option<GazeHit>;
    fn origin(&self) -> Vec3;
    /// Unit gaze direction. May be zero when tracking is lost.
    fn direction(&self) -> Vec3;
    fn add_focus_listener(&mut self, listener: CursorId);
    fn remove_focus_listener(&mut self, listener: CursorId);
}

/// Source of input events. The host dispatches events to registered global
/// listeners by calling [`crate::Cursor::handle_input_event`].
pub trait InputEventSource {
    fn add_global_listener(&mut self, listener: CursorId);
    fn remove_global_listener(&mut self, listener: CursorId);
}

/// Read-only view of a cursor handed to pose modifiers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorSnapshot {
    pub id: CursorId,
    pub state: CursorState,
    pub pose: Transform,
}

impl CursorSnapshot {
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.translation
    }
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }
    #[inline]
    #[must_use]
    pub fn local_scale(&self) -> Vec3 {
        self.pose.scale
    }
}

/// Pose override bound to a scene object (snap to a button center, scale up
/// over a hologram, and so on).
pub trait PoseModifier {
    /// Handshake when a cursor starts targeting the owning object.
    fn bind_cursor(&self, cursor: CursorId);
    /// Full goal pose for `cursor` this frame.
    fn modified_pose(&self, cursor: &CursorSnapshot) -> Transform;
}

/// Finds the pose modifier attached to an object, if any.
pub trait ModifierLookup {
    fn modifier_for(&self, object: EntityId) -> Option<Rc<dyn PoseModifier>>;
}

/// Lookup for scenes without modifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoModifiers;

impl ModifierLookup for NoModifiers {
    fn modifier_for(&self, _object: EntityId) -> Option<Rc<dyn PoseModifier>> {
        None
    }
}

/// Opaque payload carried by every input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventData {
    pub source_id: u32,
}

/// Input events delivered by the host between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Down(EventData),
    Up(EventData),
    Clicked(EventData),
    SourceDetected(EventData),
    SourceLost(EventData),
}

impl InputEvent {
    #[must_use]
    pub fn data(&self) -> &EventData {
        match self {
            InputEvent::Down(d)
            | InputEvent::Up(d)
            | InputEvent::Clicked(d)
            | InputEvent::SourceDetected(d)
            | InputEvent::SourceLost(d) => d,
        }
    }
}

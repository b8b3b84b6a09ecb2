//! Gaze cursor core: state classification, pose blending and host wiring.
//!
//! The cursor follows one gaze ray. Each frame it classifies an interaction
//! state from hand/input flags (`state`), computes a goal pose from the gaze
//! hit and smooths toward it (`blend`). Host services are injected through
//! the traits in `services`; variants customize behavior through `hooks`.

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod blend;
pub mod config;
pub mod cursor;
pub mod hooks;
pub mod services;
pub mod signals;
pub mod state;
pub mod telemetry;
pub mod visual;

pub use blend::FrameTime;
pub use config::CursorConfig;
pub use cursor::Cursor;
pub use ecs_core::{CursorId, CursorState, EntityId, Transform};
pub use hooks::{CursorHooks, DefaultHooks};
pub use services::{
    CursorSnapshot, EventData, GazeHit, GazeProvider, InputEvent, InputEventSource,
    ModifierLookup, PoseModifier, Shared,
};

//! Pose blending: per-frame goal pose and exponential smoothing toward it.
//!
//! The goal pose depends on what the gaze ray landed on:
//! - nothing: float at `default_distance` along the ray, facing the viewer;
//! - a surface with a pose modifier: use the modifier's pose verbatim;
//! - a bare surface: sit just off the hit point, oriented between the surface
//!   normal and the viewer by `look_rotation_blend`.
//!
//! Each channel then moves toward its goal by `clamp01(dt / time_constant)`.
//! Rotations face along local +Z (`rotation * Vec3::Z`), with world +Y as up.

use crate::config::CursorConfig;
use ecs_core::Transform;
use glam::{Mat3, Quat, Vec3};

/// Elapsed time since the previous tick, scaled and unscaled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub unscaled_delta: f32,
}

impl FrameTime {
    /// Same value for scaled and unscaled time.
    #[must_use]
    pub fn uniform(dt: f32) -> Self {
        Self {
            delta: dt,
            unscaled_delta: dt,
        }
    }

    #[must_use]
    pub fn select(&self, unscaled: bool) -> f32 {
        if unscaled { self.unscaled_delta } else { self.delta }
    }
}

/// What the cursor is aimed at this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    /// Nothing hit.
    Free,
    /// A hit surface without a pose modifier.
    Surface { point: Vec3, normal: Vec3 },
    /// A hit surface whose modifier supplied the whole pose.
    Modified(Transform),
}

/// Rotation whose local +Z points along `forward` with `up` as the vertical hint.
///
/// `None` for a zero-length `forward`. When `forward` is parallel to `up` the
/// shortest arc from +Z is used instead.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let f = forward.try_normalize()?;
    let right = up.cross(f);
    if right.length_squared() < 1e-12 {
        return Some(Quat::from_rotation_arc(Vec3::Z, f));
    }
    let right = right.normalize();
    let up = f.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, f)))
}

/// Spherical interpolation between two directions. Output is unit length
/// when both inputs are non-zero.
#[must_use]
pub fn slerp_dir(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let (Some(a), Some(b)) = (a.try_normalize(), b.try_normalize()) else {
        return a.lerp(b, t);
    };
    let arc = Quat::from_rotation_arc(a, b);
    Quat::IDENTITY.slerp(arc, t) * a
}

/// Goal pose for one frame.
///
/// `direction` is the (normalized) gaze direction; `current_rotation` is only
/// used when the direction is degenerate.
#[must_use]
pub fn target_pose(
    cfg: &CursorConfig,
    origin: Vec3,
    direction: Vec3,
    aim: Aim,
    current_rotation: Quat,
) -> Transform {
    let back = -direction;
    match aim {
        Aim::Free => Transform {
            translation: origin + direction * cfg.default_distance,
            rotation: look_rotation(back, Vec3::Y).unwrap_or(current_rotation),
            scale: Vec3::ONE,
        },
        Aim::Modified(pose) => pose,
        Aim::Surface { point, normal } => {
            let facing = if back.length_squared() > 0.0 {
                slerp_dir(normal, back, cfg.look_rotation_blend)
            } else {
                normal
            };
            Transform {
                translation: point + back * cfg.surface_distance,
                rotation: look_rotation(facing, Vec3::Y).unwrap_or(current_rotation),
                // Reset so a modifier's scale never sticks to a plain surface.
                scale: Vec3::ONE,
            }
        }
    }
}

/// Fraction of the remaining distance covered this frame.
///
/// A zero `time_constant` is out of contract and yields NaN.
#[inline]
#[must_use]
pub fn blend_factor(dt: f32, time_constant: f32) -> f32 {
    (dt / time_constant).clamp(0.0, 1.0)
}

/// Move `current` toward `target`, each channel with its own time constant.
#[must_use]
pub fn smooth_toward(
    cfg: &CursorConfig,
    current: &Transform,
    target: &Transform,
    dt: f32,
) -> Transform {
    Transform {
        translation: current
            .translation
            .lerp(target.translation, blend_factor(dt, cfg.position_lerp_time)),
        rotation: current
            .rotation
            .slerp(target.rotation, blend_factor(dt, cfg.rotation_lerp_time)),
        scale: current
            .scale
            .lerp(target.scale, blend_factor(dt, cfg.scale_lerp_time)),
    }
}

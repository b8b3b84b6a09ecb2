//! Cursor tuning with concrete defaults.

use anyhow::{Result, ensure};
use data_runtime::configs::cursor::CursorCfg;

/// Per-cursor tuning. Immutable once a cursor is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorConfig {
    /// Closest the free-floating cursor may sit to the eye.
    pub min_distance: f32,
    /// Distance along the gaze ray when nothing is hit.
    pub default_distance: f32,
    /// Offset from a hit surface back toward the viewer.
    pub surface_distance: f32,
    pub position_lerp_time: f32,
    pub scale_lerp_time: f32,
    pub rotation_lerp_time: f32,
    /// 0 aligns the cursor with the surface normal, 1 faces the viewer.
    pub look_rotation_blend: f32,
    /// Smooth with unscaled frame time (ignores host time dilation).
    pub use_unscaled_time: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            default_distance: 2.0,
            surface_distance: 0.02,
            position_lerp_time: 0.01,
            scale_lerp_time: 0.01,
            rotation_lerp_time: 0.01,
            look_rotation_blend: 0.5,
            use_unscaled_time: false,
        }
    }
}

impl CursorConfig {
    /// Overlay loaded values on the defaults.
    #[must_use]
    pub fn from_cfg(cfg: &CursorCfg) -> Self {
        let d = Self::default();
        Self {
            min_distance: cfg.min_distance.unwrap_or(d.min_distance),
            default_distance: cfg.default_distance.unwrap_or(d.default_distance),
            surface_distance: cfg.surface_distance.unwrap_or(d.surface_distance),
            position_lerp_time: cfg.position_lerp_time.unwrap_or(d.position_lerp_time),
            scale_lerp_time: cfg.scale_lerp_time.unwrap_or(d.scale_lerp_time),
            rotation_lerp_time: cfg.rotation_lerp_time.unwrap_or(d.rotation_lerp_time),
            look_rotation_blend: cfg.look_rotation_blend.unwrap_or(d.look_rotation_blend),
            use_unscaled_time: cfg.use_unscaled_time.unwrap_or(d.use_unscaled_time),
        }
    }

    /// Load `data/config/cursor.toml` plus env overrides and validate.
    pub fn load_default() -> Result<Self> {
        let cfg = Self::from_cfg(&data_runtime::configs::cursor::load_default()?);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate invariants the blender relies on.
    pub fn validate(&self) -> Result<()> {
        for (name, t) in [
            ("position_lerp_time", self.position_lerp_time),
            ("scale_lerp_time", self.scale_lerp_time),
            ("rotation_lerp_time", self.rotation_lerp_time),
        ] {
            ensure!(t.is_finite() && t > 0.0, "{name} must be positive (got {t})");
        }
        ensure!(
            (0.0..=1.0).contains(&self.look_rotation_blend),
            "look_rotation_blend must be in [0, 1] (got {})",
            self.look_rotation_blend
        );
        ensure!(
            self.min_distance >= 0.0 && self.surface_distance >= 0.0,
            "distances must be non-negative"
        );
        ensure!(
            self.default_distance >= self.min_distance,
            "default_distance {} is closer than min_distance {}",
            self.default_distance,
            self.min_distance
        );
        Ok(())
    }
}

//! Cursor tuning loaded from data/config/cursor.toml.

use crate::loader::{env_parse, read_optional_toml};
use anyhow::Result;
use serde::Deserialize;

/// Raw cursor tuning. Every field is optional; missing values fall back to
/// the cursor's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorCfg {
    pub min_distance: Option<f32>,
    pub default_distance: Option<f32>,
    pub surface_distance: Option<f32>,
    pub position_lerp_time: Option<f32>,
    pub scale_lerp_time: Option<f32>,
    pub rotation_lerp_time: Option<f32>,
    pub look_rotation_blend: Option<f32>,
    pub use_unscaled_time: Option<bool>,
    /// Optional state -> visual name map for object cursors.
    #[serde(default)]
    pub visuals: Vec<StateVisualCfg>,
}

/// One entry of the object-cursor visual map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateVisualCfg {
    pub state: String,
    pub visual: String,
}

impl CursorCfg {
    /// Apply `CURSOR_*` env overrides for quick tuning.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("CURSOR_MIN_DISTANCE") {
            self.min_distance = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_DEFAULT_DISTANCE") {
            self.default_distance = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_SURFACE_DISTANCE") {
            self.surface_distance = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_POSITION_LERP") {
            self.position_lerp_time = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_SCALE_LERP") {
            self.scale_lerp_time = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_ROTATION_LERP") {
            self.rotation_lerp_time = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_LOOK_BLEND") {
            self.look_rotation_blend = Some(v);
        }
        if let Some(v) = env_parse("CURSOR_UNSCALED_TIME") {
            self.use_unscaled_time = Some(v);
        }
    }
}

/// Load `config/cursor.toml` (if present) and apply env overrides.
pub fn load_default() -> Result<CursorCfg> {
    let mut cfg = read_optional_toml::<CursorCfg>("config/cursor.toml")?.unwrap_or_default();
    cfg.apply_env();
    Ok(cfg)
}

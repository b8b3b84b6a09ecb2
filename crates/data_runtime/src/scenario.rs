//! Scripted cursor scenarios (JSON) replayed by the harness and tests.
//!
//! A scenario is a list of frames. Each frame carries the gaze ray the raycast
//! layer would have produced, an optional hit, and the input events delivered
//! before that frame's tick.

use crate::loader::read_text;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ScenarioModifier>,
    pub frames: Vec<ScenarioFrame>,
    /// Expected state after the last frame.
    #[serde(default)]
    pub expect_final: Option<String>,
}

/// Pose override attached to an object in the scene.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioModifier {
    pub object: u64,
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    #[serde(default = "identity_quat")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFrame {
    pub dt: f32,
    #[serde(default)]
    pub unscaled_dt: Option<f32>,
    #[serde(default)]
    pub origin: [f32; 3],
    pub direction: [f32; 3],
    #[serde(default)]
    pub hit: Option<ScenarioHit>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
    /// Expected state after this frame's tick.
    #[serde(default)]
    pub expect: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioHit {
    pub point: [f32; 3],
    pub normal: [f32; 3],
    pub object: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioEvent {
    Down,
    Up,
    Clicked,
    SourceDetected,
    SourceLost,
    DisableInput,
    EnableInput,
}

fn identity_quat() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Scenario {
    /// Basic sanity checks: at least one frame and positive frame times.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.frames.is_empty(), "scenario '{}' has no frames", self.name);
        for (i, f) in self.frames.iter().enumerate() {
            ensure!(f.dt >= 0.0, "frame {i}: negative dt");
            if let Some(u) = f.unscaled_dt {
                ensure!(u >= 0.0, "frame {i}: negative unscaled_dt");
            }
        }
        Ok(())
    }
}

/// Parse a scenario from JSON text.
pub fn parse_scenario(txt: &str) -> Result<Scenario> {
    let scen: Scenario = serde_json::from_str(txt).context("parse scenario json")?;
    scen.validate()?;
    Ok(scen)
}

/// Load a scenario relative to `data/` (or from an absolute path).
pub fn load_scenario(rel: impl AsRef<Path>) -> Result<Scenario> {
    let txt = read_text(rel)?;
    parse_scenario(&txt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_frame_uses_defaults() {
        let s = parse_scenario(
            r#"{"name":"m","frames":[{"dt":0.016,"direction":[0,0,1],"events":["source_detected"]}]}"#,
        )
        .expect("parse");
        assert_eq!(s.frames[0].origin, [0.0; 3]);
        assert!(s.frames[0].hit.is_none());
        assert_eq!(s.frames[0].events, vec![ScenarioEvent::SourceDetected]);
    }

    #[test]
    fn empty_frames_rejected() {
        assert!(parse_scenario(r#"{"name":"e","frames":[]}"#).is_err());
    }
}

//! data_runtime: data schemas and loaders for the gaze cursor.
//!
//! Tuning and telemetry configs are TOML under `data/config/`; scripted
//! scenarios are JSON under `data/scenarios/`.

pub mod loader;
pub mod scenario;
pub mod configs {
    pub mod cursor;
    pub mod telemetry;
}

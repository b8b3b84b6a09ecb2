//! Telemetry configuration loaded from data/config/telemetry.toml with env overrides.

use crate::loader::{env_parse, read_optional_toml};
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetryCfg {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl Default for TelemetryCfg {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            json_logs: Some(false),
        }
    }
}

pub fn load_default() -> Result<TelemetryCfg> {
    let mut cfg = read_optional_toml::<TelemetryCfg>("config/telemetry.toml")?.unwrap_or_default();
    // Env overrides
    if let Ok(lvl) = std::env::var("LOG_LEVEL") { cfg.log_level = Some(lvl); }
    if let Some(json) = env_parse("JSON_LOGS") { cfg.json_logs = Some(json); }
    Ok(cfg)
}

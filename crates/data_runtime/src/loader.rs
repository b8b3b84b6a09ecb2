//! Data loaders. Resolve paths under `data/` and read raw text.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Root of the `data/` tree.
///
/// `CURSOR_DATA_ROOT` wins when set so tests and tools can point at fixtures.
pub fn data_root() -> PathBuf {
    if let Ok(p) = std::env::var("CURSOR_DATA_ROOT") {
        return PathBuf::from(p);
    }
    // Prefer top-level workspace `data/` so tests and tools can run from any crate.
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a file relative to `data/`. Absolute paths are read as-is.
pub fn read_text(rel: impl AsRef<Path>) -> Result<String> {
    let rel = rel.as_ref();
    let path = if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        data_root().join(rel)
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read data: {}", path.display()))?;
    Ok(s)
}

/// Read an optional TOML file under `data/`; `None` when it does not exist.
pub fn read_optional_toml<T: serde::de::DeserializeOwned>(
    rel: impl AsRef<Path>,
) -> Result<Option<T>> {
    let path = data_root().join(rel);
    if !path.is_file() {
        return Ok(None);
    }
    let txt = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let v = toml::from_str::<T>(&txt).with_context(|| format!("parse TOML {}", path.display()))?;
    Ok(Some(v))
}

/// Parse an env var, ignoring it when unset or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

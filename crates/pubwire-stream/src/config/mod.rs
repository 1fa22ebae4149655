//! Stream config loader (strict parsing).

pub mod schema;

use std::fs;

use pubwire_core::error::{PubwireError, Result};

pub use schema::{PagingSection, RoutingSection, StreamConfig};

pub fn load_from_file(path: &str) -> Result<StreamConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PubwireError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StreamConfig> {
    let cfg: StreamConfig = serde_yaml::from_str(s)
        .map_err(|e| PubwireError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

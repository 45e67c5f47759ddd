// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            data_dir: PathBuf::from("data"),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

pub fn validate_startup_config(config: &AppConfig) -> Result<(), String> {
    if config.bind_addr.trim().is_empty() {
        return Err("bind_addr must not be empty".to_string());
    }
    if config.data_dir.as_os_str().is_empty() {
        return Err("data_dir must not be empty".to_string());
    }
    if config.session_ttl.is_zero() {
        return Err("session_ttl must be > 0".to_string());
    }
    Ok(())
}

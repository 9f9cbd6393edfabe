use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Saved CLI session: which server to talk to and the bearer token from the
/// last login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub email: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token: None,
            email: None,
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("DEVLINK_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("devlink").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<SessionConfig> {
    let session_file = get_config_dir()?.join("session.json");

    if !session_file.exists() {
        return Ok(SessionConfig::default());
    }

    let content = fs::read_to_string(session_file)?;
    let config: SessionConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_session(config: &SessionConfig) -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(session_file, content)?;
    Ok(())
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::ProviderError;

/// Side of the game being launched. Selects which entrypoint candidates apply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    /// Interactive desktop client.
    Client,
    /// Headless dedicated server.
    Server,
}

impl std::fmt::Display for EnvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvType::Client => write!(f, "client"),
            EnvType::Server => write!(f, "server"),
        }
    }
}

impl FromStr for EnvType {
    type Err = ProviderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(EnvType::Client),
            "server" => Ok(EnvType::Server),
            other => Err(ProviderError::Config(format!(
                "unknown environment '{}', expected 'client' or 'server'",
                other
            ))),
        }
    }
}

/// OS name for the current platform, using the launcher naming
/// (`windows`, `osx`, `linux`).
pub fn current_os_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "osx"
    } else {
        "linux"
    }
}

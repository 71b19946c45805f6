use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::env::EnvType;
use crate::core::error::{ProviderError, ProviderResult};

/// Brand string rewrite applied by the branding patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandingRule {
    pub find: String,
    pub replace: String,
}

/// Everything the provider needs to know about one target game.
///
/// Persisted as camelCase JSON, e.g.
///
/// ```json
/// {
///   "id": "mindustry",
///   "name": "Mindustry",
///   "clientEntrypoints": ["mindustry.desktop.DesktopLauncher"],
///   "serverEntrypoints": ["mindustry.server.ServerLauncher"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameDefinition {
    pub id: String,
    pub name: String,
    /// Candidate entrypoints for the client, in priority order.
    pub client_entrypoints: Vec<String>,
    /// Candidate entrypoints for the dedicated server, in priority order.
    pub server_entrypoints: Vec<String>,
    /// Byte pattern after which the hook marker is inserted.
    #[serde(default)]
    pub hook_anchor: Option<String>,
    #[serde(default)]
    pub branding: Option<BrandingRule>,
    /// OS names (`windows`, `osx`, `linux`) where the error UI must not open.
    #[serde(default = "default_unsupported_ui_platforms")]
    pub unsupported_ui_platforms: Vec<String>,
}

fn default_unsupported_ui_platforms() -> Vec<String> {
    // The UI toolkit cannot start on the first thread, which the game's
    // windowing library requires on macOS.
    vec!["osx".into()]
}

impl Default for GameDefinition {
    fn default() -> Self {
        Self::mindustry()
    }
}

impl GameDefinition {
    /// Built-in definition for Mindustry.
    pub fn mindustry() -> Self {
        Self {
            id: "mindustry".into(),
            name: "Mindustry".into(),
            client_entrypoints: vec!["mindustry.desktop.DesktopLauncher".into()],
            server_entrypoints: vec!["mindustry.server.ServerLauncher".into()],
            hook_anchor: Some("([Ljava/lang/String;)V".into()),
            branding: Some(BrandingRule {
                find: "Mindustry".into(),
                replace: "Mindustry (modded)".into(),
            }),
            unsupported_ui_platforms: default_unsupported_ui_platforms(),
        }
    }

    /// Candidate entrypoint names for `env`, in resolution order.
    pub fn candidates(&self, env: EnvType) -> &[String] {
        match env {
            EnvType::Client => &self.client_entrypoints,
            EnvType::Server => &self.server_entrypoints,
        }
    }

    pub fn from_json(raw: &str) -> ProviderResult<Self> {
        let definition: GameDefinition = serde_json::from_str(raw)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load and validate a definition from a JSON file.
    pub fn load_from(path: &Path) -> ProviderResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition = Self::from_json(&raw)?;
        debug!("Loaded game definition '{}' from {:?}", definition.id, path);
        Ok(definition)
    }

    pub fn validate(&self) -> ProviderResult<()> {
        if self.id.trim().is_empty() {
            return Err(ProviderError::Config("game id is empty".into()));
        }

        for env in [EnvType::Client, EnvType::Server] {
            let candidates = self.candidates(env);
            if candidates.is_empty() {
                return Err(ProviderError::Config(format!(
                    "no {} entrypoint candidates for '{}'",
                    env, self.id
                )));
            }
            if candidates.iter().any(|c| c.trim().is_empty()) {
                return Err(ProviderError::Config(format!(
                    "blank {} entrypoint candidate for '{}'",
                    env, self.id
                )));
            }
        }

        if let Some(rule) = &self.branding {
            if rule.find.is_empty() || rule.replace.is_empty() {
                return Err(ProviderError::Config(
                    "branding rule needs non-empty 'find' and 'replace'".into(),
                ));
            }
        }

        Ok(())
    }
}

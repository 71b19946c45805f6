// ─── Version Extraction ───
// Pins the game version from the launch arguments or the process-wide
// configuration, failing hard when neither is available.

use tracing::debug;

use crate::core::args::{Arguments, GAME_VERSION};
use crate::core::config::GAME_VERSION_PROPERTY;
use crate::core::error::{ProviderError, ProviderResult};

/// Resolve the game version.
///
/// 1. `--gameVersion <v>` is removed from `args` and returned.
/// 2. Otherwise the `fabric.gameVersion` property value is used.
/// 3. Otherwise `MissingVersion`.
///
/// Blank values count as absent. The argument pair is removed even when it
/// is blank, so it never reaches the game.
pub fn extract_version(args: &mut Arguments, property: Option<String>) -> ProviderResult<String> {
    if let Some(version) = args.remove(GAME_VERSION).as_deref().and_then(normalize_version) {
        debug!("Game version {} taken from --{}", version, GAME_VERSION);
        return Ok(version);
    }

    if let Some(version) = property.as_deref().and_then(normalize_version) {
        debug!("Game version {} taken from '{}'", version, GAME_VERSION_PROPERTY);
        return Ok(version);
    }

    Err(ProviderError::MissingVersion {
        argument: GAME_VERSION.into(),
        property: GAME_VERSION_PROPERTY.into(),
    })
}

/// Normalized form of a raw version string, `None` when blank.
pub fn normalize_version(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

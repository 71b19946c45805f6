use std::fmt;

use crate::core::args::Arguments;
use crate::core::env::EnvType;
use crate::core::resolver::ResolutionResult;

/// Lifecycle phase of a provider, without the data each phase carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPhase {
    Uninitialized,
    Locating,
    Located,
    Launched,
    LocateFailed,
}

impl ProviderPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderPhase::Uninitialized => "uninitialized",
            ProviderPhase::Locating => "locating",
            ProviderPhase::Located => "located",
            ProviderPhase::Launched => "launched",
            ProviderPhase::LocateFailed => "locate-failed",
        }
    }
}

impl fmt::Display for ProviderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything pinned down by a successful locate. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct LocatedGame {
    pub env: EnvType,
    pub entrypoint: ResolutionResult,
    /// Canonical argument store, version flag already consumed.
    pub arguments: Arguments,
    pub version: String,
}

/// Provider state machine.
///
/// `Uninitialized → Locating → Located → Launched`, with `LocateFailed` as
/// the terminal failure. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Default)]
pub enum ProviderState {
    #[default]
    Uninitialized,
    /// Arguments parsed, resolution in progress.
    Locating { env: EnvType, arguments: Arguments },
    Located(LocatedGame),
    /// Entrypoint handed control. Set before invocation, so a failed launch
    /// still ends here.
    Launched(LocatedGame),
    /// Resolution or version extraction failed.
    LocateFailed { env: EnvType, arguments: Arguments },
}

impl ProviderState {
    pub fn phase(&self) -> ProviderPhase {
        match self {
            ProviderState::Uninitialized => ProviderPhase::Uninitialized,
            ProviderState::Locating { .. } => ProviderPhase::Locating,
            ProviderState::Located(_) => ProviderPhase::Located,
            ProviderState::Launched(_) => ProviderPhase::Launched,
            ProviderState::LocateFailed { .. } => ProviderPhase::LocateFailed,
        }
    }

    /// Game data, available once located (also after launch).
    pub fn located(&self) -> Option<&LocatedGame> {
        match self {
            ProviderState::Located(game) | ProviderState::Launched(game) => Some(game),
            _ => None,
        }
    }

    /// Environment and parsed arguments, whenever a locate has started.
    pub fn session(&self) -> Option<(EnvType, &Arguments)> {
        match self {
            ProviderState::Uninitialized => None,
            ProviderState::Locating { env, arguments }
            | ProviderState::LocateFailed { env, arguments } => Some((*env, arguments)),
            ProviderState::Located(game) | ProviderState::Launched(game) => {
                Some((game.env, &game.arguments))
            }
        }
    }
}

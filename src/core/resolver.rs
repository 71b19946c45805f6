// ─── Symbol Resolver ───
// Finds the first existing entrypoint among prioritized candidates.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::loader::ModuleLoader;

/// Where the entrypoint was found. Created once per successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    #[serde(rename = "symbolName")]
    symbol_name: String,
    #[serde(rename = "modulePath")]
    module_location: PathBuf,
}

impl ResolutionResult {
    pub fn new(symbol_name: impl Into<String>, module_location: impl Into<PathBuf>) -> Self {
        Self {
            symbol_name: symbol_name.into(),
            module_location: module_location.into(),
        }
    }

    pub fn symbol_name(&self) -> &str {
        &self.symbol_name
    }

    pub fn module_location(&self) -> &Path {
        &self.module_location
    }
}

/// Return the first candidate the loader knows, with its location.
///
/// Candidates after the first hit are never queried. Only presence and
/// location are asked for, so nothing gets initialized. `None` is not an
/// error: the caller decides whether a missing game is fatal.
pub fn find_first<S: AsRef<str>>(
    loader: &dyn ModuleLoader,
    candidates: &[S],
) -> Option<ResolutionResult> {
    for candidate in candidates {
        let name = candidate.as_ref();

        if !loader.exists(name) {
            debug!("Entrypoint candidate {} not present", name);
            continue;
        }

        match loader.location_of(name) {
            Some(location) => {
                debug!("Entrypoint candidate {} found in {:?}", name, location);
                return Some(ResolutionResult::new(name, location));
            }
            None => warn!("Entrypoint candidate {} exists but has no location", name),
        }
    }

    None
}

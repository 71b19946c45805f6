use std::fmt;

use crate::core::error::ProviderResult;
use crate::core::loader::LoadedModule;

/// Why a patch left a module untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The patch's own marker or replacement is already there.
    AlreadyApplied,
    /// The pattern the patch edits does not occur in this module.
    PatternNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyApplied => write!(f, "already applied"),
            SkipReason::PatternNotFound => write!(f, "pattern not found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched(LoadedModule),
    Skipped(SkipReason),
}

/// One named, stateless rewrite of an entrypoint module.
///
/// `apply` must be total over well-formed input: a module the patch has no
/// business with yields `Skipped`, never an error. Re-applying to its own
/// output must yield `Skipped(AlreadyApplied)` or an identical module.
pub trait EntrypointPatch {
    fn name(&self) -> &str;

    /// Marker that must already be present before this patch may run.
    /// When it is missing the whole pipeline aborts.
    fn requires(&self) -> Option<&[u8]> {
        None
    }

    fn apply(&self, module: &LoadedModule) -> ProviderResult<PatchOutcome>;
}

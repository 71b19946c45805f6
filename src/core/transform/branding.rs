use super::patch::{EntrypointPatch, PatchOutcome, SkipReason};
use crate::core::error::ProviderResult;
use crate::core::loader::LoadedModule;

/// Overwrites the first occurrence of a brand string.
///
/// A module already containing the replacement is treated as branded, which
/// keeps replacements that embed the original text (`X` → `X (modded)`)
/// from stacking. `replace` must not be empty.
pub struct BrandingPatch {
    find: Vec<u8>,
    replace: Vec<u8>,
    requires: Option<Vec<u8>>,
}

impl BrandingPatch {
    pub fn new(find: &str, replace: &str) -> Self {
        Self {
            find: find.as_bytes().to_vec(),
            replace: replace.as_bytes().to_vec(),
            requires: None,
        }
    }

    pub fn requiring(mut self, marker: Vec<u8>) -> Self {
        self.requires = Some(marker);
        self
    }
}

impl EntrypointPatch for BrandingPatch {
    fn name(&self) -> &str {
        "branding"
    }

    fn requires(&self) -> Option<&[u8]> {
        self.requires.as_deref()
    }

    fn apply(&self, module: &LoadedModule) -> ProviderResult<PatchOutcome> {
        if module.contains(&self.replace) {
            return Ok(PatchOutcome::Skipped(SkipReason::AlreadyApplied));
        }

        let Some(at) = module.find(&self.find) else {
            return Ok(PatchOutcome::Skipped(SkipReason::PatternNotFound));
        };

        let bytes = module.bytes();
        let mut patched = Vec::with_capacity(bytes.len() - self.find.len() + self.replace.len());
        patched.extend_from_slice(&bytes[..at]);
        patched.extend_from_slice(&self.replace);
        patched.extend_from_slice(&bytes[at + self.find.len()..]);

        Ok(PatchOutcome::Patched(module.with_bytes(patched)))
    }
}

use super::patch::{EntrypointPatch, PatchOutcome, SkipReason};
use crate::core::error::ProviderResult;
use crate::core::loader::LoadedModule;

/// Marker the default hook patch injects into the entrypoint.
pub const DEFAULT_HOOK_MARKER: &[u8] = b"game_provider/hooks/EntrypointHook";

/// Inserts a hook marker right after the first occurrence of an anchor.
///
/// The marker doubles as the guard: a module that already carries it is
/// left alone.
pub struct HookPatch {
    anchor: Vec<u8>,
    hook: Vec<u8>,
    requires: Option<Vec<u8>>,
}

impl HookPatch {
    pub fn new(anchor: Vec<u8>, hook: Vec<u8>) -> Self {
        Self {
            anchor,
            hook,
            requires: None,
        }
    }

    pub fn requiring(mut self, marker: Vec<u8>) -> Self {
        self.requires = Some(marker);
        self
    }

    pub fn hook(&self) -> &[u8] {
        &self.hook
    }
}

impl EntrypointPatch for HookPatch {
    fn name(&self) -> &str {
        "hook"
    }

    fn requires(&self) -> Option<&[u8]> {
        self.requires.as_deref()
    }

    fn apply(&self, module: &LoadedModule) -> ProviderResult<PatchOutcome> {
        if module.contains(&self.hook) {
            return Ok(PatchOutcome::Skipped(SkipReason::AlreadyApplied));
        }

        let Some(at) = module.find(&self.anchor) else {
            return Ok(PatchOutcome::Skipped(SkipReason::PatternNotFound));
        };
        let split = at + self.anchor.len();

        let bytes = module.bytes();
        let mut patched = Vec::with_capacity(bytes.len() + self.hook.len());
        patched.extend_from_slice(&bytes[..split]);
        patched.extend_from_slice(&self.hook);
        patched.extend_from_slice(&bytes[split..]);

        Ok(PatchOutcome::Patched(module.with_bytes(patched)))
    }
}

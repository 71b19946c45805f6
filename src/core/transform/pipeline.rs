// ─── Entrypoint Transformer ───
// Runs the ordered patch chain over the entrypoint module before it is
// first invoked.

use tracing::{debug, info, warn};

use super::patch::{EntrypointPatch, PatchOutcome, SkipReason};
use crate::core::error::{ProviderError, ProviderResult};
use crate::core::loader::LoadedModule;

/// Ordered patch pipeline.
///
/// Each patch receives the previous patch's output. A patch whose required
/// marker is missing aborts the run with `PipelineDependency`, so code a
/// later mandatory patch was meant to fix is never produced half-patched.
#[derive(Default)]
pub struct EntrypointTransformer {
    patches: Vec<Box<dyn EntrypointPatch>>,
}

impl EntrypointTransformer {
    pub fn new(patches: Vec<Box<dyn EntrypointPatch>>) -> Self {
        Self { patches }
    }

    pub fn with_patch(mut self, patch: impl EntrypointPatch + 'static) -> Self {
        self.patches.push(Box::new(patch));
        self
    }

    pub fn patch_names(&self) -> Vec<&str> {
        self.patches.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Apply every patch in order, returning the final module.
    pub fn transform(&self, module: LoadedModule) -> ProviderResult<LoadedModule> {
        let input_digest = module.digest();
        let mut current = module;
        let mut applied = 0usize;

        for patch in &self.patches {
            if let Some(marker) = patch.requires() {
                if !current.contains(marker) {
                    return Err(ProviderError::PipelineDependency {
                        patch: patch.name().to_string(),
                        module: current.name().to_string(),
                        missing: String::from_utf8_lossy(marker).into_owned(),
                    });
                }
            }

            match patch.apply(&current)? {
                PatchOutcome::Patched(next) => {
                    debug!("Patch '{}' applied to {}", patch.name(), current.name());
                    current = next;
                    applied += 1;
                }
                PatchOutcome::Skipped(SkipReason::AlreadyApplied) => {
                    debug!(
                        "Patch '{}' already applied to {}",
                        patch.name(),
                        current.name()
                    );
                }
                PatchOutcome::Skipped(reason) => {
                    warn!(
                        "Patch '{}' skipped for {}: {}",
                        patch.name(),
                        current.name(),
                        reason
                    );
                }
            }
        }

        info!(
            "Transformed {}: {}/{} patches applied (sha256 {} -> {})",
            current.name(),
            applied,
            self.patches.len(),
            &input_digest[..12],
            &current.digest()[..12]
        );

        Ok(current)
    }
}

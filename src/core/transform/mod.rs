pub mod branding;
pub mod hook;
pub mod patch;
pub mod pipeline;

pub use branding::BrandingPatch;
pub use hook::{HookPatch, DEFAULT_HOOK_MARKER};
pub use patch::{EntrypointPatch, PatchOutcome, SkipReason};
pub use pipeline::EntrypointTransformer;

use crate::core::config::GameDefinition;

/// Default pipeline for a game: `[hook, branding]`, each present only when
/// the definition configures it.
pub fn default_transformer(definition: &GameDefinition) -> EntrypointTransformer {
    let mut transformer = EntrypointTransformer::default();

    if let Some(anchor) = &definition.hook_anchor {
        transformer = transformer.with_patch(HookPatch::new(
            anchor.as_bytes().to_vec(),
            DEFAULT_HOOK_MARKER.to_vec(),
        ));
    }

    if let Some(rule) = &definition.branding {
        transformer = transformer.with_patch(BrandingPatch::new(&rule.find, &rule.replace));
    }

    transformer
}

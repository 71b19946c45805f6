// ─── Host Driver ───
// The sequence a host runs against a provider:
// locate → log sanitized args → transform entrypoint → launch.

use tracing::{error, info};

use crate::core::env::EnvType;
use crate::core::error::{ProviderError, ProviderResult};
use crate::core::loader::{ModuleLoader, ModuleSource};
use crate::core::provider::GameProvider;

/// Window or dialog a host uses to show fatal errors. The log entry is
/// written by [`report_fatal`], so implementations only display.
pub trait DiagnosticUi {
    fn show_fatal(&self, title: &str, error: &ProviderError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Entrypoint invoked and returned normally.
    Launched,
    /// No candidate entrypoint exists for the environment.
    GameNotFound,
}

/// Drive `provider` through a full launch against `loader`.
pub fn launch_game<P, L>(
    provider: &mut P,
    env: EnvType,
    argv: &[String],
    loader: &mut L,
) -> ProviderResult<LaunchOutcome>
where
    P: GameProvider + ?Sized,
    L: ModuleLoader + ModuleSource,
{
    if !provider.locate_game(env, argv, &*loader)? {
        info!("{} not found for {}", provider.game_name(), env);
        return Ok(LaunchOutcome::GameNotFound);
    }

    info!(
        "Loading {} {} with arguments {:?}",
        provider.game_name(),
        provider.raw_game_version()?,
        provider.launch_arguments(true)?
    );

    if !provider.entrypoint_transformer().is_empty() {
        provider.transform_entrypoint(&mut *loader)?;
    }

    provider.launch(&*loader)?;
    Ok(LaunchOutcome::Launched)
}

/// Log `error` once and, when the provider allows it, show it through `ui`.
pub fn report_fatal<P>(provider: &P, ui: Option<&dyn DiagnosticUi>, error: &ProviderError)
where
    P: GameProvider + ?Sized,
{
    let title = format!("Failed to launch {}", provider.game_name());
    error!("{}: {}", title, error);

    if let Some(ui) = ui {
        if provider.can_show_diagnostic_ui() {
            ui.show_fatal(&title, error);
        }
    }
}

pub mod core;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

pub use crate::core::env::EnvType;
pub use crate::core::error::{ProviderError, ProviderResult};
pub use crate::core::launch::{launch_game, report_fatal, DiagnosticUi, LaunchOutcome};
pub use crate::core::provider::{GameProvider, StandardGameProvider};

use crate::core::config::{GameDefinition, SystemProperties};
use crate::core::loader::ClasspathLoader;

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,game_provider=debug")),
        )
        .try_init();
}

/// Launch the game described by `definition` from `roots` and map the
/// outcome to a process exit code.
pub fn run(
    definition: GameDefinition,
    properties: SystemProperties,
    env: EnvType,
    argv: &[String],
    roots: Vec<PathBuf>,
) -> ExitCode {
    init_tracing();
    tracing::info!("Game provider for {} starting...", definition.name);

    let mut provider = StandardGameProvider::with_properties(definition, Box::new(properties));
    let mut loader = ClasspathLoader::new(roots);

    match launch_game(&mut provider, env, argv, &mut loader) {
        Ok(LaunchOutcome::Launched) => ExitCode::SUCCESS,
        Ok(LaunchOutcome::GameNotFound) => {
            tracing::error!(
                "Could not find {} on the classpath ({:?})",
                provider.game_name(),
                loader.roots()
            );
            ExitCode::from(2)
        }
        Err(e) => {
            report_fatal(&provider, None, &e);
            ExitCode::FAILURE
        }
    }
}

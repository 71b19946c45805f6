// ─── Game Provider ───
// Lifecycle façade the host drives: locate → expose metadata/arguments →
// transform entrypoint → launch.

use std::path::PathBuf;

use tracing::{info, warn};

use super::builtin::{BuiltinMod, BuiltinModMetadata};
use super::state::{LocatedGame, ProviderPhase, ProviderState};
use crate::core::args::{sanitize_launch_args, Arguments, GAME_DIRECTORY, NO_GUI_FLAGS};
use crate::core::config::{GameDefinition, PropertySource, SystemProperties, GAME_VERSION_PROPERTY};
use crate::core::env::{current_os_name, EnvType};
use crate::core::error::{ProviderError, ProviderResult};
use crate::core::loader::{ModuleLoader, ModuleSource};
use crate::core::resolver::{find_first, ResolutionResult};
use crate::core::transform::{default_transformer, EntrypointTransformer};
use crate::core::version::extract_version;

/// Contract between a host and the component that knows one game.
///
/// `locate_game` must succeed before any accessor returning
/// `ProviderResult` is used; earlier calls fail with `InvalidState`.
pub trait GameProvider {
    fn game_id(&self) -> &str;
    fn game_name(&self) -> &str;

    fn raw_game_version(&self) -> ProviderResult<&str>;
    fn normalized_game_version(&self) -> ProviderResult<&str>;

    /// Exactly one descriptor wrapping the game's module location.
    fn builtin_mods(&self) -> ProviderResult<Vec<BuiltinMod>>;

    /// Resolved entrypoint descriptor.
    fn entrypoint(&self) -> ProviderResult<&ResolutionResult>;

    fn game_context_jars(&self) -> ProviderResult<Vec<PathBuf>>;

    /// `--gameDir` when given, the current directory otherwise.
    fn launch_directory(&self) -> PathBuf;

    fn is_obfuscated(&self) -> bool {
        false
    }

    fn requires_url_class_loader(&self) -> bool {
        false
    }

    /// Find the game in `loader`. `Ok(false)` means this provider does not
    /// apply; errors are fatal.
    fn locate_game(
        &mut self,
        env: EnvType,
        args: &[String],
        loader: &dyn ModuleLoader,
    ) -> ProviderResult<bool>;

    /// Stored arguments, with credentials redacted when `redact` is set.
    fn launch_arguments(&self, redact: bool) -> ProviderResult<Vec<String>>;

    fn entrypoint_transformer(&self) -> &EntrypointTransformer;

    /// Run the pipeline over the entrypoint and define the result in `source`.
    fn transform_entrypoint(&self, source: &mut dyn ModuleSource) -> ProviderResult<()>;

    fn can_show_diagnostic_ui(&self) -> bool;

    /// Hand control to the entrypoint. Valid once.
    fn launch(&mut self, loader: &dyn ModuleLoader) -> ProviderResult<()>;
}

/// Data-driven provider: one [`GameDefinition`] plus a property store.
pub struct StandardGameProvider {
    definition: GameDefinition,
    properties: Box<dyn PropertySource>,
    transformer: EntrypointTransformer,
    state: ProviderState,
}

impl StandardGameProvider {
    /// Provider reading process-wide properties from the environment.
    pub fn new(definition: GameDefinition) -> Self {
        Self::with_properties(definition, Box::new(SystemProperties::from_env()))
    }

    pub fn with_properties(definition: GameDefinition, properties: Box<dyn PropertySource>) -> Self {
        let transformer = default_transformer(&definition);
        Self {
            definition,
            properties,
            transformer,
            state: ProviderState::Uninitialized,
        }
    }

    /// Replace the default `[hook, branding]` pipeline.
    pub fn with_transformer(mut self, transformer: EntrypointTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn definition(&self) -> &GameDefinition {
        &self.definition
    }

    pub fn state(&self) -> &ProviderState {
        &self.state
    }

    pub fn phase(&self) -> ProviderPhase {
        self.state.phase()
    }

    fn located(&self, operation: &'static str) -> ProviderResult<&LocatedGame> {
        self.state
            .located()
            .ok_or_else(|| ProviderError::InvalidState {
                operation,
                state: self.state.phase().as_str(),
            })
    }

    /// Diagnostic UI predicate for a given OS name.
    pub fn can_show_diagnostic_ui_on(&self, os_name: &str) -> bool {
        if self
            .definition
            .unsupported_ui_platforms
            .iter()
            .any(|platform| platform == os_name)
        {
            return false;
        }

        match self.state.session() {
            None | Some((EnvType::Client, _)) => true,
            Some((EnvType::Server, arguments)) => !requests_no_gui(arguments),
        }
    }
}

/// Only extra tokens count: `--nogui <value>` parses as a pair and keeps the UI.
fn requests_no_gui(arguments: &Arguments) -> bool {
    arguments
        .extra_args()
        .iter()
        .any(|extra| NO_GUI_FLAGS.contains(&extra.as_str()))
}

impl GameProvider for StandardGameProvider {
    fn game_id(&self) -> &str {
        &self.definition.id
    }

    fn game_name(&self) -> &str {
        &self.definition.name
    }

    fn raw_game_version(&self) -> ProviderResult<&str> {
        Ok(&self.located("raw_game_version")?.version)
    }

    fn normalized_game_version(&self) -> ProviderResult<&str> {
        // Extraction already stores the normalized form.
        Ok(&self.located("normalized_game_version")?.version)
    }

    fn builtin_mods(&self) -> ProviderResult<Vec<BuiltinMod>> {
        let game = self.located("builtin_mods")?;
        let metadata = BuiltinModMetadata::builder(&self.definition.id, &game.version)
            .name(&self.definition.name)
            .build();

        Ok(vec![BuiltinMod {
            location: game.entrypoint.module_location().to_path_buf(),
            metadata,
        }])
    }

    fn entrypoint(&self) -> ProviderResult<&ResolutionResult> {
        Ok(&self.located("entrypoint")?.entrypoint)
    }

    fn game_context_jars(&self) -> ProviderResult<Vec<PathBuf>> {
        let game = self.located("game_context_jars")?;
        Ok(vec![game.entrypoint.module_location().to_path_buf()])
    }

    fn launch_directory(&self) -> PathBuf {
        self.state
            .session()
            .and_then(|(_, arguments)| arguments.get(GAME_DIRECTORY))
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn locate_game(
        &mut self,
        env: EnvType,
        args: &[String],
        loader: &dyn ModuleLoader,
    ) -> ProviderResult<bool> {
        if self.state.phase() != ProviderPhase::Uninitialized {
            return Err(ProviderError::InvalidState {
                operation: "locate_game",
                state: self.state.phase().as_str(),
            });
        }

        let mut arguments = Arguments::parse(args);
        self.state = ProviderState::Locating {
            env,
            arguments: arguments.clone(),
        };

        let candidates = self.definition.candidates(env);
        let Some(entrypoint) = find_first(loader, candidates) else {
            info!(
                "No {} entrypoint for {} among {:?}",
                env, self.definition.name, candidates
            );
            self.state = ProviderState::LocateFailed { env, arguments };
            return Ok(false);
        };

        let property = self.properties.property(GAME_VERSION_PROPERTY);
        let version = match extract_version(&mut arguments, property) {
            Ok(version) => version,
            Err(e) => {
                warn!(
                    "Found {} in {:?} but its version is unknown",
                    entrypoint.symbol_name(),
                    entrypoint.module_location()
                );
                self.state = ProviderState::LocateFailed { env, arguments };
                return Err(e);
            }
        };

        info!(
            "Located {} {} ({}) at {:?}",
            self.definition.name,
            version,
            entrypoint.symbol_name(),
            entrypoint.module_location()
        );

        self.state = ProviderState::Located(LocatedGame {
            env,
            entrypoint,
            arguments,
            version,
        });
        Ok(true)
    }

    fn launch_arguments(&self, redact: bool) -> ProviderResult<Vec<String>> {
        let game = self.located("launch_arguments")?;
        Ok(sanitize_launch_args(&game.arguments.to_vec(), redact))
    }

    fn entrypoint_transformer(&self) -> &EntrypointTransformer {
        &self.transformer
    }

    fn transform_entrypoint(&self, source: &mut dyn ModuleSource) -> ProviderResult<()> {
        // Only before launch: patches must never run after the entrypoint starts.
        let game = match &self.state {
            ProviderState::Located(game) => game,
            other => {
                return Err(ProviderError::InvalidState {
                    operation: "transform_entrypoint",
                    state: other.phase().as_str(),
                })
            }
        };

        let module = source.read_module(game.entrypoint.symbol_name())?;
        let patched = self.transformer.transform(module)?;
        source.define_module(patched);
        Ok(())
    }

    fn can_show_diagnostic_ui(&self) -> bool {
        self.can_show_diagnostic_ui_on(current_os_name())
    }

    fn launch(&mut self, loader: &dyn ModuleLoader) -> ProviderResult<()> {
        let game = match std::mem::take(&mut self.state) {
            ProviderState::Located(game) => game,
            other => {
                let state = other.phase().as_str();
                self.state = other;
                return Err(ProviderError::InvalidState {
                    operation: "launch",
                    state,
                });
            }
        };

        let entrypoint = game.entrypoint.symbol_name().to_string();
        let args = game.arguments.to_vec();
        self.state = ProviderState::Launched(game);

        info!(
            "Launching {} with arguments {:?}",
            entrypoint,
            sanitize_launch_args(&args, true)
        );

        if !loader.exists(&entrypoint) {
            return Err(ProviderError::LaunchInvocation {
                source: Box::new(ProviderError::ModuleNotFound(entrypoint.clone())),
                entrypoint,
            });
        }

        loader
            .load_and_invoke(&entrypoint, &args)
            .map_err(|source| ProviderError::LaunchInvocation {
                entrypoint,
                source: Box::new(source),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::{LoadedModule, MemoryLoader, MockModuleLoader};
    use crate::core::transform::DEFAULT_HOOK_MARKER;
    use std::path::Path;

    const CLIENT: &str = "mindustry.desktop.DesktopLauncher";
    const SERVER: &str = "mindustry.server.ServerLauncher";

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn provider(properties: SystemProperties) -> StandardGameProvider {
        StandardGameProvider::with_properties(GameDefinition::mindustry(), Box::new(properties))
    }

    fn game_loader() -> MemoryLoader {
        MemoryLoader::new()
            .with_module(
                CLIENT,
                "/games/Mindustry.jar",
                b"main([Ljava/lang/String;)V title=Mindustry".to_vec(),
            )
            .with_module(SERVER, "/games/server-release.jar", b"server".to_vec())
    }

    #[test]
    fn client_scenario_consumes_version_and_redacts_token() {
        let mut provider = provider(SystemProperties::isolated());
        let loader = game_loader();

        let found = provider
            .locate_game(
                EnvType::Client,
                &args(&["--accessToken", "secret", "--gameVersion", "1.2.3"]),
                &loader,
            )
            .unwrap();

        assert!(found);
        assert_eq!(provider.phase(), ProviderPhase::Located);
        assert_eq!(provider.launch_arguments(true).unwrap(), Vec::<String>::new());
        assert_eq!(
            provider.launch_arguments(false).unwrap(),
            args(&["--accessToken", "secret"])
        );
        assert_eq!(provider.raw_game_version().unwrap(), "1.2.3");
        assert_eq!(provider.normalized_game_version().unwrap(), "1.2.3");
    }

    #[test]
    fn server_without_version_fails_and_locks_accessors() {
        let mut provider = provider(SystemProperties::isolated());
        let loader = game_loader();

        let err = provider
            .locate_game(EnvType::Server, &[], &loader)
            .unwrap_err();

        assert!(matches!(err, ProviderError::MissingVersion { .. }));
        assert_eq!(provider.phase(), ProviderPhase::LocateFailed);
        assert!(matches!(
            provider.entrypoint(),
            Err(ProviderError::InvalidState { .. })
        ));
        assert!(provider.launch_arguments(false).is_err());
    }

    #[test]
    fn property_supplies_version_when_argument_absent() {
        let mut provider =
            provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "126.2"));

        assert!(provider
            .locate_game(EnvType::Server, &[], &game_loader())
            .unwrap());
        assert_eq!(provider.raw_game_version().unwrap(), "126.2");
        assert_eq!(
            provider.entrypoint().unwrap(),
            &ResolutionResult::new(SERVER, "/games/server-release.jar")
        );
    }

    #[test]
    fn missing_game_returns_false_without_error() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));

        let found = provider
            .locate_game(EnvType::Client, &[], &MemoryLoader::new())
            .unwrap();

        assert!(!found);
        assert_eq!(provider.phase(), ProviderPhase::LocateFailed);
        assert!(provider.builtin_mods().is_err());
    }

    #[test]
    fn locate_only_resolves_environment_candidates() {
        let mut loader = MockModuleLoader::new();
        loader
            .expect_exists()
            .withf(|name: &str| name == SERVER)
            .times(1)
            .return_const(false);
        loader
            .expect_exists()
            .withf(|name: &str| name == CLIENT)
            .never();
        loader.expect_load_and_invoke().never();

        let mut provider = provider(SystemProperties::isolated());
        assert!(!provider.locate_game(EnvType::Server, &[], &loader).unwrap());
    }

    #[test]
    fn accessors_before_locate_are_invalid_state() {
        let provider = provider(SystemProperties::isolated());

        assert_eq!(provider.phase(), ProviderPhase::Uninitialized);
        assert!(matches!(
            provider.entrypoint(),
            Err(ProviderError::InvalidState {
                operation: "entrypoint",
                state: "uninitialized"
            })
        ));
        assert!(provider.builtin_mods().is_err());
        assert!(provider.game_context_jars().is_err());
        assert!(provider.launch_arguments(true).is_err());
        assert!(provider.raw_game_version().is_err());
        assert_eq!(provider.launch_directory(), PathBuf::from("."));
    }

    #[test]
    fn locate_twice_is_rejected() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        let loader = game_loader();
        provider.locate_game(EnvType::Client, &[], &loader).unwrap();

        assert!(matches!(
            provider.locate_game(EnvType::Client, &[], &loader),
            Err(ProviderError::InvalidState { .. })
        ));
    }

    #[test]
    fn builtin_mod_wraps_module_location() {
        let mut provider = provider(SystemProperties::isolated());
        provider
            .locate_game(EnvType::Client, &args(&["--gameVersion", "126.2"]), &game_loader())
            .unwrap();

        let mods = provider.builtin_mods().unwrap();

        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].location, PathBuf::from("/games/Mindustry.jar"));
        assert_eq!(mods[0].metadata.id, "mindustry");
        assert_eq!(mods[0].metadata.name, "Mindustry");
        assert_eq!(mods[0].metadata.version, "126.2");
        assert_eq!(
            provider.game_context_jars().unwrap(),
            vec![PathBuf::from("/games/Mindustry.jar")]
        );
    }

    #[test]
    fn launch_directory_follows_game_dir_argument() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        provider
            .locate_game(EnvType::Client, &args(&["--gameDir", "/srv/game"]), &game_loader())
            .unwrap();

        assert_eq!(provider.launch_directory(), Path::new("/srv/game"));
    }

    #[test]
    fn transform_then_launch_runs_patched_entrypoint_with_raw_arguments() {
        let mut provider = provider(SystemProperties::isolated());
        let mut loader = game_loader().with_entrypoint(CLIENT, |module, args| {
            assert!(module.contains(DEFAULT_HOOK_MARKER));
            assert!(module.contains(b"Mindustry (modded)"));
            assert_eq!(args, ["--accessToken", "secret"]);
            Ok(())
        });

        provider
            .locate_game(
                EnvType::Client,
                &args(&["--accessToken", "secret", "--gameVersion", "1.2.3"]),
                &loader,
            )
            .unwrap();
        provider.transform_entrypoint(&mut loader).unwrap();
        provider.launch(&loader).unwrap();

        assert_eq!(provider.phase(), ProviderPhase::Launched);
        assert_eq!(loader.invocations().len(), 1);
        // Patching is closed once the game runs.
        assert!(matches!(
            provider.transform_entrypoint(&mut loader),
            Err(ProviderError::InvalidState { .. })
        ));
    }

    #[test]
    fn launch_is_valid_once() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        let loader = game_loader().with_entrypoint(CLIENT, |_, _| Ok(()));
        provider.locate_game(EnvType::Client, &[], &loader).unwrap();

        provider.launch(&loader).unwrap();

        assert!(matches!(
            provider.launch(&loader),
            Err(ProviderError::InvalidState {
                operation: "launch",
                state: "launched"
            })
        ));
        assert_eq!(loader.invocations().len(), 1);
    }

    #[test]
    fn launch_before_locate_is_invalid_state() {
        let mut provider = provider(SystemProperties::isolated());

        assert!(matches!(
            provider.launch(&MemoryLoader::new()),
            Err(ProviderError::InvalidState { .. })
        ));
        assert_eq!(provider.phase(), ProviderPhase::Uninitialized);
    }

    #[test]
    fn invocation_failure_is_wrapped() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        let loader = game_loader().with_entrypoint(CLIENT, |_, _| {
            Err(ProviderError::Other("boom".into()))
        });
        provider.locate_game(EnvType::Client, &[], &loader).unwrap();

        let err = provider.launch(&loader).unwrap_err();

        match err {
            ProviderError::LaunchInvocation { entrypoint, source } => {
                assert_eq!(entrypoint, CLIENT);
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(provider.phase(), ProviderPhase::Launched);
    }

    #[test]
    fn launch_rechecks_symbol_in_host_loader() {
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        provider
            .locate_game(EnvType::Client, &[], &game_loader())
            .unwrap();

        let err = provider.launch(&MemoryLoader::new()).unwrap_err();

        assert!(matches!(err, ProviderError::LaunchInvocation { .. }));
    }

    #[test]
    fn pipeline_dependency_aborts_before_launch() {
        use crate::core::transform::{BrandingPatch, HookPatch};

        let transformer = EntrypointTransformer::default()
            .with_patch(BrandingPatch::new("Mindustry", "Modded").requiring(b"#HOOK#".to_vec()))
            .with_patch(HookPatch::new(b"main".to_vec(), b"#HOOK#".to_vec()));
        let mut provider = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"))
            .with_transformer(transformer);
        let mut loader = game_loader();
        provider.locate_game(EnvType::Client, &[], &loader).unwrap();

        let err = provider.transform_entrypoint(&mut loader).unwrap_err();

        assert!(matches!(err, ProviderError::PipelineDependency { .. }));
        assert_eq!(
            loader.read_module(CLIENT).unwrap(),
            LoadedModule::new(
                CLIENT,
                b"main([Ljava/lang/String;)V title=Mindustry".to_vec()
            )
        );
    }

    #[test]
    fn diagnostic_ui_rules() {
        let loader = game_loader();

        let fresh = provider(SystemProperties::isolated());
        assert!(fresh.can_show_diagnostic_ui_on("linux"));
        assert!(!fresh.can_show_diagnostic_ui_on("osx"));

        let mut client = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        client
            .locate_game(EnvType::Client, &args(&["nogui"]), &loader)
            .unwrap();
        assert!(client.can_show_diagnostic_ui_on("windows"));

        let mut server = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        server
            .locate_game(EnvType::Server, &args(&["--port", "6567"]), &loader)
            .unwrap();
        assert!(server.can_show_diagnostic_ui_on("linux"));

        for no_gui in [
            &["nogui"][..],
            &["--nogui"][..],
            &["--port", "6567", "--nogui"][..],
        ] {
            let mut headless =
                provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
            headless
                .locate_game(EnvType::Server, &args(no_gui), &loader)
                .unwrap();
            assert!(!headless.can_show_diagnostic_ui_on("linux"), "{no_gui:?}");
        }
    }

    #[test]
    fn nogui_parsed_as_pair_keeps_diagnostic_ui() {
        let mut server = provider(SystemProperties::isolated().with(GAME_VERSION_PROPERTY, "1"));
        server
            .locate_game(EnvType::Server, &args(&["--nogui", "true"]), &game_loader())
            .unwrap();

        assert!(server.can_show_diagnostic_ui_on("linux"));
    }
}

// ─── Game Provider Core ───
// Locates a game's entrypoint, pins its version, patches it and launches it.
//
// Architecture:
//   core/
//     args/     : Launch argument model + credential sanitizer
//     config/   : Game definitions (JSON) + process-wide properties
//     loader/   : Module loader interfaces, in-memory and classpath loaders
//     resolver  : First-match entrypoint resolution
//     version/  : Game version extraction
//     transform/: Ordered entrypoint patch pipeline
//     provider/ : Lifecycle state machine exposed to the host
//     launch/   : Host driver + fatal error reporting

pub mod args;
pub mod config;
pub mod env;
pub mod error;
pub mod launch;
pub mod loader;
pub mod provider;
pub mod resolver;
pub mod transform;
pub mod version;

pub mod host;

pub use host::{launch_game, report_fatal, DiagnosticUi, LaunchOutcome};

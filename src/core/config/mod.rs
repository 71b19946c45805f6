pub mod game;
pub mod properties;

pub use game::{BrandingRule, GameDefinition};
pub use properties::{PropertySource, SystemProperties};

/// Process-wide property carrying an externally supplied game version.
pub const GAME_VERSION_PROPERTY: &str = "fabric.gameVersion";

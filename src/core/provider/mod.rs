pub mod builtin;
pub mod game;
pub mod state;

pub use builtin::{BuiltinMod, BuiltinModMetadata};
pub use game::{GameProvider, StandardGameProvider};
pub use state::{LocatedGame, ProviderPhase, ProviderState};

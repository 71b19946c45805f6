pub mod arguments;
pub mod sanitize;

pub use arguments::Arguments;
pub use sanitize::{sanitize_launch_args, strip_flag_pairs};

/// Sensitive flag redacted from surfaced argument lists (flag + one value).
pub const ACCESS_TOKEN_FLAG: &str = "--accessToken";

/// Argument key consumed during version extraction (`--gameVersion <v>`).
pub const GAME_VERSION: &str = "gameVersion";

/// Argument key naming the game working directory (`--gameDir <path>`).
pub const GAME_DIRECTORY: &str = "gameDir";

/// Tokens that disable any GUI on a headless server.
pub const NO_GUI_FLAGS: [&str; 2] = ["nogui", "--nogui"];

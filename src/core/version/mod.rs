pub mod extract;

pub use extract::{extract_version, normalize_version};

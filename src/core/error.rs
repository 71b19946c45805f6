use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the provider.
/// Every module returns `Result<T, ProviderError>`.
#[derive(Debug, Error)]
pub enum ProviderError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Archive ─────────────────────────────────────────
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ── JSON / config ───────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid game definition: {0}")]
    Config(String),

    // ── Locate ──────────────────────────────────────────
    #[error(
        "Could not determine game version: no --{argument} argument and no '{property}' property"
    )]
    MissingVersion { argument: String, property: String },

    // ── Pipeline ────────────────────────────────────────
    #[error("Patch '{patch}' requires marker {missing:?} which is missing from module {module}")]
    PipelineDependency {
        patch: String,
        module: String,
        missing: String,
    },

    // ── Launch ──────────────────────────────────────────
    #[error("Failed to launch entrypoint {entrypoint}: {source}")]
    LaunchInvocation {
        entrypoint: String,
        #[source]
        source: Box<ProviderError>,
    },

    #[error("Entrypoint process for {entrypoint} exited with status {code:?}")]
    ProcessExit {
        entrypoint: String,
        code: Option<i32>,
    },

    // ── Lifecycle ───────────────────────────────────────
    #[error("'{operation}' is not valid while the provider is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<std::io::Error> for ProviderError {
    fn from(source: std::io::Error) -> Self {
        ProviderError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

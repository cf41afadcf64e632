//! Page loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading a page manifest.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No manifest exists for the requested address
    #[error("No page at {address} (looked for {manifest})")]
    NotFound { address: String, manifest: PathBuf },

    /// Manifest exists but could not be read
    #[error("Failed to read page manifest {manifest}: {source}")]
    ReadFailed {
        manifest: PathBuf,
        source: std::io::Error,
    },

    /// Manifest is not valid page markup
    #[error("Failed to parse page manifest {manifest}: {message}")]
    ParseFailed { manifest: PathBuf, message: String },
}

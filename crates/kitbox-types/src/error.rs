//! Error types for the kit system.
//!
//! [`KitError`] covers every failure the registry can report. Registration
//! and lookup failures leave state untouched; persistence failures are
//! reported *after* the in-memory effect has been applied, so callers use
//! [`KitError::is_persistence`] to tell the two apart.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by kit construction, registration and enablement.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KitError {
    // ── Rejected operations ──────────────────────────────────────────

    /// `register` was called with an id that is already known.
    #[error("kit already registered: {id}")]
    DuplicateKit {
        /// The conflicting kit id.
        id: String,
    },

    /// The referenced kit id has not been registered.
    #[error("unknown kit: {id}")]
    UnknownKit {
        /// The id that could not be resolved.
        id: String,
    },

    /// A kit failed validation at construction time.
    #[error("invalid kit: {reason}")]
    InvalidKit {
        /// What is wrong with the kit.
        reason: String,
    },

    // ── Applied in memory, not durable ───────────────────────────────

    /// Reading or writing the kits file failed.
    #[error("failed to persist kit configuration{}: {source}", display_path(.path))]
    Persistence {
        /// File involved, when known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be encoded for writing.
    ///
    /// Unreadable files are not an error on load; they fall back to an
    /// empty configuration.
    #[error("kit configuration serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KitError {
    /// Build a [`KitError::Persistence`] for the given file.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: Some(path.into()),
            source,
        }
    }

    /// Whether this error came from the persistence layer.
    ///
    /// `enable`/`disable` return such errors after the in-memory state has
    /// already changed: the kit is active for this process but may not
    /// survive a restart.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Serialization(_))
    }
}

impl From<std::io::Error> for KitError {
    fn from(source: std::io::Error) -> Self {
        Self::Persistence { path: None, source }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

/// Convenience alias used throughout the kitbox crates.
pub type Result<T> = std::result::Result<T, KitError>;

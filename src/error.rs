//! Top-level error type for the portal.
//!
//! Each subsystem defines its own error with miette `#[diagnostic]` derives;
//! this enum chains them transparently so codes and help text survive to the
//! user. Inside the TUI, errors never propagate — they become per-panel
//! "failed to load" strings instead.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error for well-portal.
#[derive(Debug, Error, Diagnostic)]
pub enum PortalError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] crate::api::ApiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Paths(#[from] crate::paths::PathError),
}

/// Convenience alias for functions returning portal results.
pub type PortalResult<T> = std::result::Result<T, PortalError>;

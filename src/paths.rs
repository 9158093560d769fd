//! XDG-compliant path resolution for the portal.
//!
//! Only the directories this application actually uses: the config dir (for
//! `config.toml`) and the state dir (for logs written by one-shot commands).

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(wellport::paths::no_home),
        help("Set the HOME environment variable or ensure a valid user profile exists.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(wellport::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// XDG directories for well-portal.
#[derive(Debug, Clone)]
pub struct PortalPaths {
    /// `$XDG_CONFIG_HOME/well-portal/`
    pub config_dir: PathBuf,
    /// `$XDG_STATE_HOME/well-portal/`
    pub state_dir: PathBuf,
}

impl PortalPaths {
    /// Resolve from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("well-portal");

        let state_dir = std::env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/state"))
            .join("well-portal");

        Ok(Self {
            config_dir,
            state_dir,
        })
    }

    /// Location of the portal config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Create the directories if missing.
    pub fn ensure(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.state_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PathError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_config_dir() {
        let paths = PortalPaths {
            config_dir: PathBuf::from("/tmp/xdg/well-portal"),
            state_dir: PathBuf::from("/tmp/state/well-portal"),
        };
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/xdg/well-portal/config.toml")
        );
    }
}

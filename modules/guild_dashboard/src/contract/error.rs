//! Contract error types for the guild dashboard

use std::path::PathBuf;

/// Failure reported by a [`GuildDirectory`](super::GuildDirectory).
///
/// "Not found" is not an error: lookups return `Ok(None)` for absent guilds
/// and members. This type covers the directory being unreachable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Guild directory unavailable: {0}")]
    Unavailable(String),

    #[error("Guild directory request failed: {0}")]
    Request(String),
}

/// Dashboard errors
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Startup-time misconfiguration; the dashboard refuses to start
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A theme entry points at a file that cannot be read
    #[error("Theme template for '{key}' not found at {}: {source}", path.display())]
    ThemeFile {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two settings share a name within the same scope
    #[error("Duplicate setting name '{name}' in {scope}")]
    DuplicateSetting { name: String, scope: String },

    /// A settings form body that cannot be decoded
    #[error("Malformed settings submission: {0}")]
    InvalidSubmission(String),

    /// Template engine failure while rendering a page
    #[error("{0}")]
    Render(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl DashboardError {
    /// Whether the error belongs to the startup-only configuration class
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::ThemeFile { .. } | Self::DuplicateSetting { .. }
        )
    }
}

use thiserror::Error;

/// Failure to produce a usable session configuration.
///
/// Errors are never retried by this crate; they propagate to whoever asked for
/// the session or pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no region could be resolved for profile '{profile}'")]
    MissingRegion { profile: String },

    #[error("session runtime unavailable: {0}")]
    Runtime(String),

    #[error("failed to create session for profile '{profile}' in region '{region}': {source}")]
    Session {
        profile: String,
        region: String,
        #[source]
        source: Box<ConfigurationError>,
    },

    #[error("invalid pool request: {0}")]
    InvalidRequest(String),
}

impl ConfigurationError {
    pub fn for_pair(
        profile: impl Into<String>,
        region: impl Into<String>,
        source: ConfigurationError,
    ) -> Self {
        Self::Session {
            profile: profile.into(),
            region: region.into(),
            source: Box::new(source),
        }
    }

    /// Stable machine-readable code, used in JSON log and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRegion { .. } => "missing_region",
            Self::Runtime(_) => "runtime_unavailable",
            Self::Session { .. } => "session_failed",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    /// The innermost error, skipping pair wrappers.
    pub fn root_cause(&self) -> &ConfigurationError {
        match self {
            Self::Session { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

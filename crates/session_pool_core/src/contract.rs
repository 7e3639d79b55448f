use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Profile and region lists a pool is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolRequest {
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub profile: String,
    pub region: String,
    pub resolved_region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolSummary {
    pub count: usize,
    pub sessions: Vec<SessionSummary>,
}

impl PoolSummary {
    pub fn new(sessions: Vec<SessionSummary>) -> Self {
        Self {
            count: sessions.len(),
            sessions,
        }
    }
}

impl PoolRequest {
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(text)
            .map_err(|error| ConfigurationError::InvalidRequest(format!("malformed JSON: {error}")))
    }

    /// Appends the other request's lists after this one's.
    pub fn merge(mut self, other: PoolRequest) -> Self {
        self.profiles.extend(other.profiles);
        self.regions.extend(other.regions);
        self
    }

    /// Substitutes the default profile (`""`) when no profile was given.
    pub fn with_default_profile(mut self) -> Self {
        if self.profiles.is_empty() {
            self.profiles.push(String::new());
        }
        self
    }

    pub fn max_sessions(&self) -> usize {
        self.profiles.len().saturating_mul(self.regions.len())
    }
}

/// Splits comma separated values, trimming whitespace and dropping blanks.
pub fn split_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

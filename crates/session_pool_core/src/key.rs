use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a pool entry. Equality is by value over both strings, so the
/// same pair listed twice maps to one entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub profile: String,
    pub region: String,
}

impl PoolKey {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }

    pub fn uses_default_profile(&self) -> bool {
        self.profile.is_empty()
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = if self.uses_default_profile() {
            "<default>"
        } else {
            &self.profile
        };
        let region = if self.region.is_empty() {
            "<resolved>"
        } else {
            &self.region
        };
        write!(f, "{profile}/{region}")
    }
}

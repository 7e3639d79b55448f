use aws_types::SdkConfig;
use session_pool_core::contract::SessionSummary;
use session_pool_core::ValueSource;

/// Loaded SDK configuration for one `(profile, region)` pair.
#[derive(Debug, Clone)]
pub struct AwsSession {
    profile: String,
    effective_profile: Option<String>,
    region: String,
    region_source: ValueSource,
    config: SdkConfig,
}

impl AwsSession {
    pub fn new(
        profile: impl Into<String>,
        effective_profile: Option<String>,
        region: impl Into<String>,
        region_source: ValueSource,
        config: SdkConfig,
    ) -> Self {
        Self {
            profile: profile.into(),
            effective_profile,
            region: region.into(),
            region_source,
            config,
        }
    }

    /// Profile as requested; empty for the default credential chain.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Profile handed to the SDK after environment fallback, if any.
    pub fn effective_profile(&self) -> Option<&str> {
        self.effective_profile.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn region_source(&self) -> ValueSource {
        self.region_source
    }

    /// Shared config for building service clients, e.g.
    /// `aws_sdk_s3::Client::new(session.sdk_config())`.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn into_sdk_config(self) -> SdkConfig {
        self.config
    }

    pub fn summary(&self, requested_region: &str) -> SessionSummary {
        SessionSummary {
            profile: self.profile.clone(),
            region: requested_region.to_string(),
            resolved_region: Some(self.region.clone()),
        }
    }
}

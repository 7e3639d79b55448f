use std::sync::Arc;
use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_types::SdkConfig;
use serde_json::json;
use session_pool_core::env::{resolve_profile, resolve_region};
use session_pool_core::{
    ConfigurationError, EnvSource, LogSink, ProcessEnv, ResolvedValue, SessionFactory,
};

use crate::runtime;
use crate::session::AwsSession;

/// Creates sessions by loading `aws-config` for each pair.
///
/// Region precedence is explicit argument, then `AWS_REGION` /
/// `AWS_DEFAULT_REGION` from the injected environment, then the SDK's default
/// region chain for the chosen profile.
///
/// Only the first two steps read the injected [`EnvSource`]. The SDK chain
/// reads the real process environment, shared config files and IMDS on its
/// own; disable it with [`SdkSessionFactory::without_sdk_region_fallback`]
/// when region resolution must not depend on process state.
#[derive(Clone)]
pub struct SdkSessionFactory {
    env: Arc<dyn EnvSource>,
    behavior_version: BehaviorVersion,
    timeout_config: Option<TimeoutConfig>,
    sdk_region_fallback: bool,
}

impl SdkSessionFactory {
    pub fn new(env: Arc<dyn EnvSource>) -> Self {
        Self {
            env,
            behavior_version: BehaviorVersion::latest(),
            timeout_config: None,
            sdk_region_fallback: true,
        }
    }

    pub fn from_process_env() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }

    pub fn with_timeouts(mut self, connect: Duration, operation: Duration) -> Self {
        self.timeout_config = Some(
            TimeoutConfig::builder()
                .connect_timeout(connect)
                .operation_timeout(operation)
                .build(),
        );
        self
    }

    /// Fails with `MissingRegion` instead of consulting the SDK's default
    /// region chain when neither argument nor environment names a region.
    pub fn without_sdk_region_fallback(mut self) -> Self {
        self.sdk_region_fallback = false;
        self
    }

    async fn load_config(&self, profile: Option<String>, region: Option<String>) -> SdkConfig {
        let mut loader = aws_config::defaults(self.behavior_version.clone());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(timeout_config) = self.timeout_config.clone() {
            loader = loader.timeout_config(timeout_config);
        }
        loader.load().await
    }
}

impl SessionFactory for SdkSessionFactory {
    type Session = AwsSession;

    fn create_session(
        &self,
        profile: &str,
        region: &str,
        log: &dyn LogSink,
    ) -> Result<AwsSession, ConfigurationError> {
        let ResolvedValue {
            value: region_value,
            source: region_source,
        } = resolve_region(region, self.env.as_ref());
        let effective_profile = resolve_profile(profile, self.env.as_ref()).value;

        let loaded = match region_value {
            None if !self.sdk_region_fallback => Err(ConfigurationError::MissingRegion {
                profile: profile.to_string(),
            }),
            region_value => {
                runtime::block_on(self.load_config(effective_profile.clone(), region_value))
            }
        };
        let resolved_region = loaded.and_then(|config| {
            let resolved = config
                .region()
                .map(|value| value.to_string())
                .ok_or_else(|| ConfigurationError::MissingRegion {
                    profile: profile.to_string(),
                })?;
            Ok((config, resolved))
        });

        match resolved_region {
            Ok((config, resolved)) => {
                log.info(
                    "session_created",
                    json!({
                        "profile": profile,
                        "effective_profile": effective_profile,
                        "requested_region": region,
                        "region": resolved,
                        "region_source": region_source.as_str(),
                    }),
                );
                Ok(AwsSession::new(
                    profile,
                    effective_profile,
                    resolved,
                    region_source,
                    config,
                ))
            }
            Err(error) => {
                log.error(
                    "session_failed",
                    json!({
                        "profile": profile,
                        "requested_region": region,
                        "error": error.code(),
                        "message": error.to_string(),
                    }),
                );
                Err(error)
            }
        }
    }
}

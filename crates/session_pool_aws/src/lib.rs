//! AWS-backed session construction for `session_pool_core`.
//!
//! This crate owns the SDK integration: loading `aws-config` for a
//! `(profile, region)` pair, bridging its async loader into the synchronous
//! pool build, and the `session-pool` command line entry point.

pub mod factory;
pub mod runtime;
pub mod session;

pub use factory::SdkSessionFactory;
pub use session::AwsSession;

use session_pool_core::{ConfigurationError, LogSink, SessionPool};

pub type AwsSessionPool = SessionPool<AwsSession>;

/// Builds a pool of AWS sessions reading region and profile fallbacks from the
/// process environment.
pub fn new_pool<P, R>(
    profiles: &[P],
    regions: &[R],
    log: &dyn LogSink,
) -> Result<AwsSessionPool, ConfigurationError>
where
    P: AsRef<str>,
    R: AsRef<str>,
{
    SessionPool::build(profiles, regions, &SdkSessionFactory::from_process_env(), log)
}

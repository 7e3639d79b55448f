//! SDK-free primitives for building pools of cloud sessions.
//!
//! This crate owns the deduplicating pool, its keys, and the seams the pool
//! depends on (session construction, environment lookup, and log output). It
//! intentionally excludes the AWS SDK and the async runtime; see
//! `session_pool_aws` for the SDK-backed factory.

pub mod contract;
pub mod env;
pub mod error;
pub mod factory;
pub mod key;
pub mod log_sink;
pub mod pool;

pub use env::{EnvSource, ProcessEnv, ResolvedValue, StaticEnv, ValueSource};
pub use error::ConfigurationError;
pub use factory::SessionFactory;
pub use key::PoolKey;
pub use log_sink::{DiscardSink, JsonLinesSink, LogLevel, LogSink, TracingSink};
pub use pool::{build_pool, SessionPool};

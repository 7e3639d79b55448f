use std::future::Future;

use session_pool_core::ConfigurationError;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Runs an async SDK call to completion from synchronous code.
///
/// Inside a multi-thread runtime the current worker is handed off with
/// `block_in_place`. Outside any runtime a private current-thread runtime is
/// started for the call. A current-thread runtime cannot be blocked without
/// stalling itself, so that case is an error.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, ConfigurationError> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::MultiThread => {
                Ok(tokio::task::block_in_place(|| handle.block_on(future)))
            }
            flavor => Err(ConfigurationError::Runtime(format!(
                "cannot block inside a {flavor:?} runtime; use a multi-thread runtime"
            ))),
        },
        Err(_) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|error| {
                    ConfigurationError::Runtime(format!("failed to start runtime: {error}"))
                })?;
            Ok(runtime.block_on(future))
        }
    }
}

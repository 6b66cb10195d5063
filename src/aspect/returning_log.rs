use std::fmt;
use std::future::Future;

use tracing::info;

use super::{Signature, LOG_TARGET};

/// Logs the value a successful call returned. Errors pass through silently.
pub async fn log_returning<F, T, E>(signature: Signature, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    T: fmt::Debug,
{
    let result = work.await;

    if let Ok(value) = &result {
        info!(
            target: LOG_TARGET,
            declaring_type = signature.declaring_type,
            method = signature.method,
            "CALL: method {}(), type {}, returned -> {:?}",
            signature.method,
            signature.declaring_type,
            value
        );
    }

    result
}

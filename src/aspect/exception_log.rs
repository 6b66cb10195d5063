use std::fmt;
use std::future::Future;

use tracing::error;

use super::{Signature, LOG_TARGET};
use crate::metrics;

/// Logs the error of a failed call and hands it back untouched.
///
/// Successful calls pass through without a log line.
pub async fn log_exceptions<F, T, E>(signature: Signature, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let result = work.await;

    if let Err(err) = &result {
        error!(
            target: LOG_TARGET,
            declaring_type = signature.declaring_type,
            method = signature.method,
            "ERROR: method -> {}(), type -> {}, cause -> {}",
            signature.method,
            signature.declaring_type,
            err
        );
        metrics::record_method_failure(&signature);
    }

    result
}

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use super::{Signature, LOG_TARGET};
use crate::metrics;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message carried by every [`TimeTrackingError`].
pub const TIME_TRACKING_MARKER: &str = "TimeTracking Exception";

/// A failure re-tagged by [`track_time`]. The original error is the `source`.
#[derive(Debug, Error)]
#[error("{}", TIME_TRACKING_MARKER)]
pub struct TimeTrackingError {
    #[source]
    source: BoxError,
}

impl TimeTrackingError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// Measures `work` and always logs the elapsed time with the arguments,
/// whether it succeeds, fails or is dropped early. Failures come back wrapped
/// in [`TimeTrackingError`].
pub fn track_time<F, T, E>(
    signature: Signature,
    args: &[&dyn fmt::Debug],
    work: F,
) -> impl Future<Output = Result<T, TimeTrackingError>>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    let args = format!("{args:?}");

    async move {
        let _stopwatch = Stopwatch {
            signature,
            args,
            start: Instant::now(),
        };
        work.await.map_err(TimeTrackingError::new)
    }
}

struct Stopwatch {
    signature: Signature,
    args: String,
    start: Instant,
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            target: LOG_TARGET,
            declaring_type = self.signature.declaring_type,
            method = self.signature.method,
            elapsed_ms = whole_millis(elapsed),
            "TIME: method {}(), args {}, type {}: execution time -> {} ms",
            self.signature.method,
            self.args,
            self.signature.declaring_type,
            whole_millis(elapsed)
        );
        metrics::record_method_duration(&self.signature, elapsed);
    }
}

/// Saturates instead of truncating.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

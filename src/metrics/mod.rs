use std::time::Duration;

use metrics::{counter, histogram, Counter, Histogram};
use once_cell::sync::Lazy;

use crate::aspect::Signature;
use crate::config::DetailLevel;

pub struct WebLogMetrics {
    pub short_lines_total: Counter,
    pub default_lines_total: Counter,
    pub full_lines_total: Counter,
    pub request_duration_seconds: Histogram,
}

pub static WEB_LOG_METRICS: Lazy<WebLogMetrics> = Lazy::new(|| WebLogMetrics {
    short_lines_total: counter!("weblog_requests_logged_total", "detail" => "short"),
    default_lines_total: counter!("weblog_requests_logged_total", "detail" => "default"),
    full_lines_total: counter!("weblog_requests_logged_total", "detail" => "full"),
    request_duration_seconds: histogram!("weblog_request_duration_seconds"),
});

/// Counts one request line. Duration is only known on the success path.
pub fn record_request_logged(level: DetailLevel, elapsed: Option<Duration>) {
    match level {
        DetailLevel::Short => WEB_LOG_METRICS.short_lines_total.increment(1),
        DetailLevel::Default => WEB_LOG_METRICS.default_lines_total.increment(1),
        DetailLevel::Full => WEB_LOG_METRICS.full_lines_total.increment(1),
    }

    if let Some(elapsed) = elapsed {
        WEB_LOG_METRICS
            .request_duration_seconds
            .record(elapsed.as_secs_f64());
    }
}

pub fn record_method_failure(signature: &Signature) {
    counter!(
        "weblog_method_failures_total",
        "type" => signature.declaring_type,
        "method" => signature.method
    )
    .increment(1);
}

pub fn record_method_duration(signature: &Signature, elapsed: Duration) {
    histogram!(
        "weblog_method_duration_seconds",
        "type" => signature.declaring_type,
        "method" => signature.method
    )
    .record(elapsed.as_secs_f64());
}

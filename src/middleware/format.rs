//! Request log line rendering.

use std::net::IpAddr;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use chrono::NaiveDateTime;

use super::capture::CapturedBody;
use super::params::RequestParams;
use crate::config::DetailLevel;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Everything known about one handled request when its line is written.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub timestamp: NaiveDateTime,
    pub method: Method,
    /// Path only, without the query string.
    pub uri: String,
    pub params: RequestParams,
    pub remote_addr: Option<IpAddr>,
    pub status: StatusCode,
    /// Response body. Only collected for `FULL`.
    pub body: Option<CapturedBody>,
    /// `None` when the handler failed.
    pub elapsed: Option<Duration>,
}

impl RequestRecord {
    pub fn render(&self, level: DetailLevel) -> String {
        let mut line = match level {
            DetailLevel::Short => {
                return format!(
                    "request method: {}, request URI: {}, response status: {}",
                    self.method,
                    self.uri,
                    self.status.as_u16()
                );
            }
            DetailLevel::Full => format!(
                "date: {}, request method: {}, request URI: {}, params: {}, from: {}, response status: {}, body: {}",
                self.timestamp.format(TIMESTAMP_FORMAT),
                self.method,
                self.uri,
                self.params,
                self.remote_addr
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                self.status.as_u16(),
                self.body.as_ref().map(ToString::to_string).unwrap_or_default()
            ),
            DetailLevel::Default => format!(
                "request method: {}, request URI: {}, response status: {}",
                self.method,
                self.uri,
                self.status.as_u16()
            ),
        };

        if let Some(elapsed) = self.elapsed {
            line.push_str(&format!(", request processing time: {} ms", elapsed.as_millis()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items_request() -> RequestRecord {
        let mut params = RequestParams::new();
        params.extend_urlencoded(b"x=1&x=2");
        RequestRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .and_then(|d| d.and_hms_milli_opt(14, 5, 1, 250))
                .unwrap(),
            method: Method::GET,
            uri: "/items".to_string(),
            params,
            remote_addr: Some("10.0.0.7".parse().unwrap()),
            status: StatusCode::OK,
            body: Some(CapturedBody::Text("OK".to_string())),
            elapsed: Some(Duration::from_millis(5)),
        }
    }

    #[test]
    fn full_line_has_every_field() {
        assert_eq!(
            items_request().render(DetailLevel::Full),
            "date: 2024-03-09T14:05:01.250, request method: GET, request URI: /items, \
             params: x=[1, 2];, from: 10.0.0.7, response status: 200, body: OK, \
             request processing time: 5 ms"
        );
    }

    #[test]
    fn short_line_has_method_uri_status_only() {
        assert_eq!(
            items_request().render(DetailLevel::Short),
            "request method: GET, request URI: /items, response status: 200"
        );
    }

    #[test]
    fn default_line_adds_processing_time() {
        assert_eq!(
            items_request().render(DetailLevel::Default),
            "request method: GET, request URI: /items, response status: 200, request processing time: 5 ms"
        );
    }

    #[test]
    fn failed_request_omits_processing_time() {
        let record = RequestRecord {
            status: StatusCode::NOT_FOUND,
            elapsed: None,
            ..items_request()
        };
        assert_eq!(
            record.render(DetailLevel::Default),
            "request method: GET, request URI: /items, response status: 404"
        );
        assert!(!record.render(DetailLevel::Full).contains("processing time"));
    }

    #[test]
    fn missing_peer_renders_unknown() {
        let record = RequestRecord {
            remote_addr: None,
            ..items_request()
        };
        assert!(record.render(DetailLevel::Full).contains("from: unknown,"));
    }

    #[test]
    fn uncaptured_body_renders_placeholder() {
        let record = RequestRecord {
            body: Some(CapturedBody::TooLarge(8)),
            ..items_request()
        };
        assert!(record
            .render(DetailLevel::Full)
            .contains("body: <over 8 bytes, not captured>, request processing time: 5 ms"));
    }

    #[test]
    fn repeated_renders_are_identical() {
        let record = items_request();
        assert_eq!(record.render(DetailLevel::Full), record.render(DetailLevel::Full));
    }
}

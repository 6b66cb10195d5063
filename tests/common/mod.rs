//! Shared utilities for the integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use weblog::aspect::LOG_TARGET;

/// Collects formatted log output written while the guard is alive.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Messages of every line under the crate's log target, fields stripped.
    pub fn messages(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        let prefix = format!("{LOG_TARGET}: ");
        String::from_utf8_lossy(&buf)
            .lines()
            .filter_map(|line| line.split_once(prefix.as_str()).map(|(_, rest)| rest))
            .map(|rest| strip_fields(rest).to_owned())
            .collect()
    }

    /// Whole formatted lines under the crate's log target, fields included.
    #[allow(dead_code)]
    pub fn raw_lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(LOG_TARGET))
            .map(str::to_owned)
            .collect()
    }

    /// Only the request logger's lines.
    pub fn request_lines(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|msg| msg.starts_with("request method:") || msg.starts_with("date:"))
            .collect()
    }
}

fn strip_fields(rest: &str) -> &str {
    ["method=", "declaring_type="]
        .iter()
        .filter_map(|field| rest.find(&format!(" {field}")))
        .min()
        .map_or(rest, |end| &rest[..end])
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

/// Drops the trailing `N ms` so lines of repeated requests compare equal.
#[allow(dead_code)]
pub fn without_duration(line: &str) -> &str {
    line.rsplit_once(", request processing time:")
        .map_or(line, |(head, _)| head)
}

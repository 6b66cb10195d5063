//! Body capture for `FULL` lines. The body handed back always yields the same
//! bytes, and the same error, as the one that was read.

use std::fmt;

use axum::body::{Body, Bytes, HttpBody};
use futures::{stream, StreamExt};

/// What a `FULL` line shows for a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedBody {
    /// The whole body, decoded as lossy UTF-8.
    Text(String),
    /// Length unknown up front, left to stream through.
    Streaming,
    /// Longer than the configured limit.
    TooLarge(usize),
    /// The body errored while it was being read.
    Failed,
}

impl fmt::Display for CapturedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Streaming => f.write_str("<streamed, not captured>"),
            Self::TooLarge(limit) => write!(f, "<over {limit} bytes, not captured>"),
            Self::Failed => f.write_str("<read failed>"),
        }
    }
}

/// Reads at most `limit` bytes of `body`.
///
/// Past the limit the bytes already read are put back in front of the rest
/// of the stream. A read error is replayed after the bytes that preceded it.
pub(crate) async fn capture(body: Body, limit: usize) -> (Body, CapturedBody) {
    let mut frames = body.into_data_stream();
    let mut buffer = Vec::new();

    while let Some(frame) = frames.next().await {
        match frame {
            Ok(chunk) => {
                buffer.extend_from_slice(&chunk);
                if buffer.len() > limit {
                    let head = stream::once(async move {
                        Ok::<_, axum::Error>(Bytes::from(buffer))
                    });
                    return (
                        Body::from_stream(head.chain(frames)),
                        CapturedBody::TooLarge(limit),
                    );
                }
            }
            Err(err) => {
                let replay = stream::iter([Ok(Bytes::from(buffer)), Err(err)]);
                return (Body::from_stream(replay), CapturedBody::Failed);
            }
        }
    }

    let bytes = Bytes::from(buffer);
    let text = String::from_utf8_lossy(&bytes).into_owned();
    (Body::from(bytes), CapturedBody::Text(text))
}

/// Like [`capture`], but only touches bodies whose exact length is known and
/// within `limit`. Anything else is returned as is.
pub(crate) async fn capture_sized(body: Body, limit: usize) -> (Body, CapturedBody) {
    match body.size_hint().exact() {
        Some(len) if usize::try_from(len).is_ok_and(|len| len <= limit) => {
            capture(body, limit).await
        }
        Some(_) => (body, CapturedBody::TooLarge(limit)),
        None => (body, CapturedBody::Streaming),
    }
}

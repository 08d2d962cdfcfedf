//! Audio relay
//!
//! Opens a streaming GET against a resolved media URL and hands the body to
//! axum as a stream of fixed-size chunks. Nothing beyond one chunk is buffered,
//! so a slow caller back-pressures the upstream read.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use bytes::{Bytes, BytesMut};
use futures::{stream, Stream, StreamExt, TryStreamExt};
use reqwest::Client as HttpClient;

use crate::error::{AppError, AppResult};

pub const RELAY_CHUNK_SIZE: usize = 8 * 1024;
pub const RELAY_CONTENT_TYPE: &str = "audio/webm";

#[derive(Clone)]
pub struct Relay {
    http_client: HttpClient,
}

impl Relay {
    /// Builds the relay client. Only the connect phase is bounded; a whole-request
    /// timeout would cut long tracks.
    pub fn new(user_agent: &str, connect_timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { http_client })
    }

    /// Connects to `url` and returns a response streaming its body.
    ///
    /// A caller `Range` header is forwarded. Fails before any byte is sent if
    /// the upstream does not answer 200 or 206.
    pub async fn open(&self, url: &str, caller_headers: &HeaderMap) -> AppResult<Response> {
        let mut request = self.http_client.get(url);
        if let Some(range) = caller_headers.get(header::RANGE) {
            request = request.header(header::RANGE, range.clone());
        }

        let upstream = request.send().await?;
        let status = upstream.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(AppError::Relay(format!("Upstream returned status {}", status)));
        }

        let content_length = upstream.headers().get(header::CONTENT_LENGTH).cloned();
        let content_range = upstream.headers().get(header::CONTENT_RANGE).cloned();

        tracing::debug!(
            status = %status,
            content_length = ?content_length,
            "Relay connected to upstream"
        );

        let chunks = rechunk(upstream.bytes_stream(), RELAY_CHUNK_SIZE).inspect_err(|e| {
            tracing::warn!(error = %e, "Upstream failed mid-stream, response truncated");
        });

        let mut response = Response::new(Body::from_stream(chunks));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(RELAY_CONTENT_TYPE));
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        if let Some(length) = content_length {
            headers.insert(header::CONTENT_LENGTH, length);
        }
        if status == StatusCode::PARTIAL_CONTENT {
            if let Some(range) = content_range {
                headers.insert(header::CONTENT_RANGE, range);
            }
        }

        Ok(response)
    }
}

/// Regroups an arbitrary byte stream into `chunk_size` pieces; only the final
/// piece may be shorter. The byte sequence is unchanged. On an upstream error
/// the bytes already buffered are yielded first, then the error once, and the
/// stream ends.
pub fn rechunk<S, E>(
    upstream: S,
    chunk_size: usize,
) -> impl Stream<Item = Result<Bytes, E>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    let state = (Box::pin(upstream), BytesMut::new(), None::<E>, false);

    stream::unfold(state, move |(mut upstream, mut buffer, mut failed, mut done)| async move {
        loop {
            if buffer.len() >= chunk_size {
                let chunk = buffer.split_to(chunk_size).freeze();
                return Some((Ok(chunk), (upstream, buffer, failed, done)));
            }

            if done || failed.is_some() {
                if !buffer.is_empty() {
                    let chunk = buffer.split().freeze();
                    return Some((Ok(chunk), (upstream, buffer, failed, done)));
                }
                return failed.take().map(|e| (Err(e), (upstream, buffer, None, true)));
            }

            match upstream.next().await {
                Some(Ok(bytes)) => buffer.extend_from_slice(&bytes),
                Some(Err(e)) => failed = Some(e),
                None => done = true,
            }
        }
    })
}

//! Streaming of generated PDFs back to the client.
//!
//! The request's [`ScratchGuard`] travels inside the response body. It is
//! released when the stream ends, fails, or is dropped because the client
//! went away, and the scratch files are removed after the grace delay.

use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};
use bytes::Bytes;
use docpress_core::constants::PDF_CONTENT_TYPE;
use docpress_core::AppError;
use docpress_storage::ScratchGuard;
use futures::Stream;
use tokio_util::io::ReaderStream;

/// Body stream that owns the scratch guard of its request.
pub struct GuardedStream<S> {
    inner: S,
    guard: Option<ScratchGuard>,
    sent: u64,
    expected: u64,
}

impl<S> GuardedStream<S> {
    pub fn new(inner: S, guard: ScratchGuard, expected: u64) -> Self {
        GuardedStream {
            inner,
            guard: Some(guard),
            sent: 0,
            expected,
        }
    }
}

impl<S> Stream for GuardedStream<S>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.sent += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(e))) => {
                tracing::warn!(error = %e, sent = this.sent, "Failed to stream PDF");
                this.guard.take();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                tracing::debug!(sent = this.sent, "PDF delivered");
                this.guard.take();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S> Drop for GuardedStream<S> {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!(
                sent = self.sent,
                expected = self.expected,
                "Client disconnected before the download finished"
            );
        }
    }
}

/// Build the attachment response for `output`, moving `guard` into the body.
pub async fn pdf_attachment(
    output: &Path,
    size_bytes: u64,
    download_name: &str,
    guard: ScratchGuard,
) -> Result<Response<Body>, AppError> {
    let file = tokio::fs::File::open(output).await.map_err(|e| {
        AppError::Internal(format!("Failed to open {}: {}", output.display(), e))
    })?;

    let stream = GuardedStream::new(ReaderStream::new(file), guard, size_bytes);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PDF_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_name),
        )
        .header(header::CONTENT_LENGTH, size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}

//! Server-streaming responses as newline-delimited JSON.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use tokio::sync::mpsc;

/// Messages buffered between the producing task and the response body.
pub const STREAM_BUFFER: usize = 16;

/// Sending half of a response stream.
pub struct StreamWriter<T> {
    tx: mpsc::Sender<T>,
}

#[derive(Debug)]
pub struct StreamClosed;

impl std::fmt::Display for StreamClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "response stream closed by peer")
    }
}

impl<T> StreamWriter<T> {
    pub async fn send(&self, msg: T) -> Result<(), StreamClosed> {
        self.tx.send(msg).await.map_err(|_| StreamClosed)
    }
}

/// Open a response stream: messages sent through the writer become NDJSON lines.
pub fn channel<T: Serialize + Send + 'static>() -> (StreamWriter<T>, NdjsonStream<T>) {
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    (StreamWriter { tx }, NdjsonStream { rx })
}

pub struct NdjsonStream<T> {
    rx: mpsc::Receiver<T>,
}

impl<T: Serialize + Send + 'static> IntoResponse for NdjsonStream<T> {
    fn into_response(self) -> Response {
        let lines = stream::unfold(self.rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        })
        .filter_map(|msg| async move {
            match serde_json::to_vec(&msg) {
                Ok(mut line) => {
                    line.push(b'\n');
                    Some(Ok::<_, Infallible>(Bytes::from(line)))
                }
                Err(e) => {
                    tracing::error!("Failed to encode stream message: {e}");
                    None
                }
            }
        });

        (
            [(header::CONTENT_TYPE, "application/x-ndjson")],
            Body::from_stream(lines),
        )
            .into_response()
    }
}

use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use crate::config::Config;
use crate::error::ServeError;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::webroot::{Resource, Webroot};

const READ_CHUNK: usize = 1024;

/// Per-connection bounds.
///
/// `read_timeout` covers reading the request head. `lifetime` covers
/// everything up to the point the response is ready; the write itself is
/// never cut short.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_request_bytes: usize,
    pub read_timeout: Duration,
    pub lifetime: Duration,
}

impl Limits {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            max_request_bytes: cfg.max_request_bytes,
            read_timeout: cfg.read_timeout(),
            lifetime: cfg.connection_timeout(),
        }
    }
}

/// One accepted client, driven from request to close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    webroot: Arc<Webroot>,
    limits: Limits,
}

#[derive(Debug)]
pub enum ConnectionState {
    AwaitingRequest,
    Parsed(Request),
    Resolved(Resource),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, webroot: Arc<Webroot>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::AwaitingRequest,
            webroot,
            limits,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Serves exactly one request and closes the stream.
    ///
    /// The stream is shut down whatever happens. Errors returned here are
    /// the ones that left the client without a response.
    pub async fn run(&mut self) -> Result<(), ServeError> {
        let deadline = Instant::now() + self.limits.lifetime;

        let result = match tokio::time::timeout_at(deadline, self.prepare()).await {
            Ok(Ok(())) => self.deliver().await,
            Ok(Err(e)) => Err(e),
            Err(_) => Err(ServeError::Timeout),
        };

        self.state = ConnectionState::Closed;
        // The peer may already be gone; nothing left to report either way.
        let _ = self.stream.shutdown().await;

        result
    }

    /// Advances the state machine until a response is ready or there is
    /// nothing to answer.
    async fn prepare(&mut self) -> Result<(), ServeError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::AwaitingRequest => {
                    self.state = match self.read_request().await {
                        Ok(Some(req)) => ConnectionState::Parsed(req),
                        Ok(None) => {
                            tracing::debug!("Client closed before sending a request");
                            ConnectionState::Closed
                        }
                        Err(e) => Self::respond_with_error(e)?,
                    };
                }

                ConnectionState::Parsed(req) => {
                    tracing::info!(
                        path = %req.path,
                        listing = req.wants_listing(),
                        "Request received"
                    );

                    self.state = match self.webroot.resolve(&req.path).await {
                        Ok(resource) => ConnectionState::Resolved(resource),
                        Err(e) => Self::respond_with_error(e)?,
                    };
                }

                ConnectionState::Resolved(resource) => {
                    tracing::debug!(
                        media_type = %resource.media_type,
                        bytes = resource.content.len(),
                        "Resource resolved"
                    );
                    let response = Response::ok(resource.content, &resource.media_type);
                    self.state = Self::respond(&response);
                }

                state @ (ConnectionState::Responding(_) | ConnectionState::Closed) => {
                    self.state = state;
                    return Ok(());
                }
            }
        }
    }

    /// Writes the prepared response, if any, in one go.
    async fn deliver(&mut self) -> Result<(), ServeError> {
        if let ConnectionState::Responding(writer) = &self.state {
            writer.write_to_stream(&mut self.stream).await?;
            tracing::debug!(bytes = writer.size(), "Response sent");
        }
        self.state = ConnectionState::Closed;
        Ok(())
    }

    /// Reads until the header terminator, bounded in time and size.
    ///
    /// `Ok(None)` means the client hung up before finishing its request.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ServeError> {
        match tokio::time::timeout(self.limits.read_timeout, self.read_head()).await {
            Ok(result) => result,
            Err(_) => Err(ServeError::Timeout),
        }
    }

    async fn read_head(&mut self) -> Result<Option<Request>, ServeError> {
        let limit = self.limits.max_request_bytes;

        loop {
            // Only a head that ends within the limit counts as complete
            let window = self.buffer.len().min(limit);
            if let Some((request, consumed)) = parse_http_request(&self.buffer[..window])? {
                self.buffer.advance(consumed);
                return Ok(Some(request));
            }

            if self.buffer.len() > limit {
                return Err(ServeError::RequestTooLarge { limit });
            }

            // Never hold more than one byte past the limit
            let remaining = limit + 1 - self.buffer.len();
            self.buffer.reserve(READ_CHUNK.min(remaining));
            let n = (&mut self.stream)
                .take(remaining as u64)
                .read_buf(&mut self.buffer)
                .await?;

            if n == 0 {
                return Ok(None);
            }
        }
    }

    fn respond(response: &Response) -> ConnectionState {
        tracing::info!(status = response.status.as_u16(), "Responding");
        ConnectionState::Responding(ResponseWriter::new(response))
    }

    /// Turns a client-visible error into its fixed response, or hands back
    /// errors that have none.
    fn respond_with_error(err: ServeError) -> Result<ConnectionState, ServeError> {
        match err.response() {
            Some(response) => {
                tracing::warn!(error = %err, "Request rejected");
                Ok(Self::respond(&response))
            }
            None => Err(err),
        }
    }
}

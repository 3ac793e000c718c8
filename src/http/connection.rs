use anyhow::Context;
use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::app::App;
use crate::http::parser::{DecodeError, RequestHead, find_headers_end, parse_request_head};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::{ResponseWriter, render};
use crate::resources::ResourceError;
use crate::router::RouteError;

const READ_CHUNK: usize = 4096;

/// Serves exactly one request on a client stream, then closes it.
pub struct Connection<S> {
    stream: S,
    app: App,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, app: App) -> Self {
        Self {
            stream,
            app,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => ConnectionState::Processing(req),
                    Ok(None) => {
                        debug!("Client closed connection before sending a request");
                        ConnectionState::Closed
                    }
                    Err(ReadError::Decode(DecodeError::EmptyRequest)) => {
                        debug!("Empty request line, closing");
                        ConnectionState::Closed
                    }
                    Err(ReadError::Decode(e)) => {
                        warn!(error = %e, "Malformed request, closing without response");
                        ConnectionState::Closed
                    }
                    Err(ReadError::Timeout) => {
                        warn!("Timed out waiting for request data, closing");
                        ConnectionState::Closed
                    }
                    Err(ReadError::Io(e)) => {
                        return Err(e).context("Failed to read request");
                    }
                },

                ConnectionState::Processing(mut req) => match self.handle_request(&mut req).await {
                    Some(response) => ConnectionState::Writing(ResponseWriter::new(&response)),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Writing(mut writer) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("Failed to write response")?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Reads until one full request is buffered.
    ///
    /// `Ok(None)` means the peer closed the stream before sending anything.
    /// Closing part way through a request, including before the declared
    /// `Content-Length` arrived, is [`DecodeError::UnexpectedEof`].
    ///
    /// The head is decoded once; after that only the body length is checked
    /// as bytes arrive.
    pub async fn read_request(&mut self) -> Result<Option<Request>, ReadError> {
        let mut head: Option<RequestHead> = None;

        loop {
            if head.is_none() && !self.buffer.is_empty() {
                head = self.try_read_head()?;
            }

            if let Some(parsed) = &head {
                let needed = parsed.request_len();
                if self.buffer.len() >= needed {
                    let (request, consumed) = head
                        .take()
                        .ok_or(DecodeError::Incomplete)?
                        .into_request(&self.buffer)?;
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }
                self.buffer.reserve(needed - self.buffer.len());
            }

            let read = self.stream.read_buf(&mut self.buffer);
            let n = match self.app.read_timeout {
                Some(limit) => tokio::time::timeout(limit, read)
                    .await
                    .map_err(|_| ReadError::Timeout)??,
                None => read.await?,
            };

            if n == 0 {
                return if self.buffer.is_empty() {
                    Ok(None)
                } else {
                    Err(DecodeError::UnexpectedEof.into())
                };
            }
        }
    }

    /// Decodes the head once it is buffered, enforcing the size limits.
    fn try_read_head(&self) -> Result<Option<RequestHead>, DecodeError> {
        let head_len = find_headers_end(&self.buffer)
            .map_or(self.buffer.len(), |(head_end, _)| head_end);
        if head_len > self.app.max_header_bytes {
            return Err(DecodeError::HeadersTooLarge);
        }

        match parse_request_head(&self.buffer) {
            Ok(head) if head.content_length > self.app.max_body_bytes => {
                warn!(
                    content_length = head.content_length,
                    limit = self.app.max_body_bytes,
                    "Declared body exceeds limit"
                );
                Err(DecodeError::BodyTooLarge)
            }
            Ok(head) => Ok(Some(head)),
            Err(DecodeError::Incomplete) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Routes and renders a request.
    ///
    /// Returns `None` when the request should be dropped without an answer.
    async fn handle_request(&self, req: &mut Request) -> Option<Response> {
        let method = req.method();
        let path = req.path().to_string();

        let entity = match self.app.router.handle(req).await {
            Ok(entity) => entity,
            Err(RouteError::MethodNotAllowed { .. }) => {
                warn!(%method, %path, "Method not allowed");
                return Some(Response::method_not_allowed());
            }
            Err(RouteError::MalformedBody(e)) => {
                warn!(%method, %path, error = %e, "Malformed form body, closing without response");
                return None;
            }
        };

        let mut response = match render(&entity, &*self.app.resources).await {
            Ok(response) => response,
            Err(e @ ResourceError::NotFound(_)) => {
                error!(%method, %path, error = %e, "Resource missing");
                Response::not_found()
            }
            Err(e) => {
                error!(%method, %path, error = %e, "Failed to read resource");
                Response::internal_error()
            }
        };

        if method == Method::HEAD {
            response.strip_body();
        }

        info!(
            %method,
            %path,
            status = response.status.as_u16(),
            new_session = entity.session_id().is_some(),
            "Request served"
        );

        Some(response)
    }
}

/// Why no request could be read from the stream.
#[derive(Debug)]
pub enum ReadError {
    Decode(DecodeError),
    Timeout,
    Io(std::io::Error),
}

impl From<DecodeError> for ReadError {
    fn from(e: DecodeError) -> Self {
        ReadError::Decode(e)
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Decode(e) => write!(f, "{e}"),
            ReadError::Timeout => write!(f, "read timed out"),
            ReadError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for ReadError {}

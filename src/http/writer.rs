use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::SESSION_COOKIE;
use crate::http::mime;
use crate::http::response::{Response, ResponseBuilder, ResponseEntity, ResponseMode};
use crate::resources::{ResourceError, ResourceResolver};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Turns a route outcome into a full response.
///
/// Render mode reads the resource through `resources`; a missing resource is
/// returned as an error rather than an empty body. Redirects carry no body.
pub async fn render<R: ResourceResolver>(
    entity: &ResponseEntity,
    resources: &R,
) -> Result<Response, ResourceError> {
    let (content_type, location, body) = match entity.mode() {
        ResponseMode::Render(path) => (mime::content_type(path), None, resources.read(path).await?),
        ResponseMode::Redirect(location) => {
            (mime::content_type(location), Some(location), Vec::new())
        }
    };

    let mut builder = ResponseBuilder::new(entity.status())
        .header("Content-Type", content_type)
        .header("Content-Length", body.len().to_string());

    if let Some(location) = location {
        builder = builder.header("Location", location.as_str());
    }

    if let Some(id) = entity.session_id() {
        builder = builder.header("Set-Cookie", format!("{SESSION_COOKIE}={id}"));
    }

    Ok(builder.body(body).build())
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

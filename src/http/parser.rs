use std::fmt;

use tracing::debug;

use crate::http::headers::Headers;
use crate::http::request::{Request, RequestLine};

/// Reasons a byte stream could not be turned into a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// More bytes are needed before a full request is available.
    Incomplete,
    /// The first line was blank; the client sent nothing worth answering.
    EmptyRequest,
    InvalidRequestLine,
    InvalidMethod(String),
    InvalidHeader(String),
    InvalidContentLength,
    /// Several `Content-Length` headers disagree on the body size.
    ConflictingContentLength,
    InvalidEncoding,
    InvalidBody,
    MalformedField(String),
    HeadersTooLarge,
    BodyTooLarge,
    /// The peer closed the stream in the middle of a request.
    UnexpectedEof,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Incomplete => write!(f, "incomplete request"),
            DecodeError::EmptyRequest => write!(f, "empty request line"),
            DecodeError::InvalidRequestLine => write!(f, "malformed request line"),
            DecodeError::InvalidMethod(m) => write!(f, "unsupported method {m:?}"),
            DecodeError::InvalidHeader(line) => write!(f, "header line without ':' {line:?}"),
            DecodeError::InvalidContentLength => write!(f, "invalid Content-Length"),
            DecodeError::ConflictingContentLength => write!(f, "conflicting Content-Length headers"),
            DecodeError::InvalidEncoding => write!(f, "request head is not valid UTF-8"),
            DecodeError::InvalidBody => write!(f, "request body is not valid UTF-8"),
            DecodeError::MalformedField(field) => write!(f, "form field without '=' {field:?}"),
            DecodeError::HeadersTooLarge => write!(f, "request head too large"),
            DecodeError::BodyTooLarge => write!(f, "request body too large"),
            DecodeError::UnexpectedEof => write!(f, "connection closed mid-request"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A decoded request head whose body may still be arriving.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub line: RequestLine,
    pub headers: Headers,
    /// Declared body length, 0 without `Content-Length`.
    pub content_length: usize,
    /// Offset of the first body byte in the buffer the head was read from.
    pub body_start: usize,
}

impl RequestHead {
    /// Total bytes the request occupies once its body has arrived.
    pub fn request_len(&self) -> usize {
        self.body_start + self.content_length
    }

    /// Builds the request from a buffer holding at least
    /// [`RequestHead::request_len`] bytes.
    pub fn into_request(self, buf: &[u8]) -> Result<(Request, usize), DecodeError> {
        let consumed = self.request_len();
        let body = buf
            .get(self.body_start..consumed)
            .ok_or(DecodeError::Incomplete)?
            .to_vec();

        debug!(
            method = %self.line.method,
            target = %self.line.target,
            headers = self.headers.len(),
            content_length = self.content_length,
            "Decoded request"
        );

        let request = Request {
            line: self.line,
            headers: self.headers,
            body,
            session: None,
        };

        Ok((request, consumed))
    }
}

/// Decodes the request line and headers at the start of `buf`.
///
/// Returns [`DecodeError::Incomplete`] until the blank line closing the head
/// has arrived. The body is not inspected.
pub fn parse_request_head(buf: &[u8]) -> Result<RequestHead, DecodeError> {
    if buf.starts_with(b"\r\n") || buf.starts_with(b"\n") {
        return Err(DecodeError::EmptyRequest);
    }

    // Look for header/body separator
    let (head_end, body_start) = find_headers_end(buf).ok_or(DecodeError::Incomplete)?;

    let head = std::str::from_utf8(&buf[..head_end]).map_err(|_| DecodeError::InvalidEncoding)?;
    let mut lines = head.lines();

    // Request line
    let first = lines.next().ok_or(DecodeError::InvalidRequestLine)?;
    let line = RequestLine::parse(first)?;

    // Headers
    let mut headers = Headers::new();
    let mut content_length: Option<usize> = None;
    for raw in lines {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| DecodeError::InvalidHeader(raw.to_string()))?;

        if name.eq_ignore_ascii_case("Content-Length") {
            let len = value
                .trim()
                .parse::<usize>()
                .map_err(|_| DecodeError::InvalidContentLength)?;
            if content_length.is_some_and(|seen| seen != len) {
                return Err(DecodeError::ConflictingContentLength);
            }
            content_length = Some(len);
        }

        headers.insert(name, value.trim_start());
    }

    Ok(RequestHead {
        line,
        headers,
        content_length: content_length.unwrap_or(0),
        body_start,
    })
}

/// Decodes one request from the start of `buf`.
///
/// Returns the request and the number of bytes it occupied, or
/// [`DecodeError::Incomplete`] if the head or the declared body has not fully
/// arrived yet.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), DecodeError> {
    let head = parse_request_head(buf)?;
    if buf.len() < head.request_len() {
        return Err(DecodeError::Incomplete);
    }
    head.into_request(buf)
}

/// Finds the blank line closing the request head.
///
/// Returns the end of the head (last header line terminator included) and the
/// offset where the body begins. Accepts CRLF and bare LF line endings.
pub fn find_headers_end(buf: &[u8]) -> Option<(usize, usize)> {
    buf.iter().enumerate().find_map(|(i, &b)| {
        if b != b'\n' {
            return None;
        }
        let rest = &buf[i + 1..];
        if rest.starts_with(b"\r\n") {
            Some((i + 1, i + 3))
        } else if rest.starts_with(b"\n") {
            Some((i + 1, i + 2))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path(), "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn headers_end_accepts_bare_lf() {
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\n\nbody"), Some((15, 16)));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r\n"), Some((16, 18)));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r"), None);
    }
}

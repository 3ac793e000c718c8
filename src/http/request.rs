use std::fmt;
use std::sync::Arc;

use crate::http::form::RequestBody;
use crate::http::headers::{Headers, HttpCookie};
use crate::http::parser::DecodeError;
use crate::session::Session;

/// HTTP request methods.
///
/// Represents the HTTP method/verb of a request. Only GET and POST carry
/// behaviour on the form routes; the others are parsed so static lookups
/// and error reporting can see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnstile::http::request::Method;
    /// assert_eq!(Method::from_str("POST"), Some(Method::POST));
    /// assert_eq!(Method::from_str("post"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request: `METHOD target VERSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Raw request target, query string included.
    pub target: String,
    pub version: String,
}

impl RequestLine {
    /// Parses a request line made of exactly three whitespace-separated tokens.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnstile::http::request::{Method, RequestLine};
    /// let line = RequestLine::parse("GET /a?x=1 HTTP/1.1").unwrap();
    /// assert_eq!(line.method, Method::GET);
    /// assert_eq!(line.path(), "/a");
    /// assert_eq!(line.query(), Some("x=1"));
    /// ```
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let mut parts = line.split_whitespace();

        let method_str = parts.next().ok_or(DecodeError::InvalidRequestLine)?;
        let target = parts.next().ok_or(DecodeError::InvalidRequestLine)?;
        let version = parts.next().ok_or(DecodeError::InvalidRequestLine)?;

        if parts.next().is_some() {
            return Err(DecodeError::InvalidRequestLine);
        }

        let method = Method::from_str(method_str)
            .ok_or_else(|| DecodeError::InvalidMethod(method_str.to_string()))?;

        Ok(Self {
            method,
            target: target.to_string(),
            version: version.to_string(),
        })
    }

    /// The target with everything from the first `?` removed.
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}

/// Represents a parsed HTTP request from a client.
///
/// The body is kept as raw bytes; [`Request::form`] turns it into form fields
/// for the routes that need them. The session is attached by the router once
/// the session cookie has been looked up.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub session: Option<Arc<Session>>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Sets a form body and the matching `Content-Length` header.
    pub fn form(self, body: &str) -> Self {
        let len = body.len();
        self.header("Content-Length", len.to_string())
            .body(body.as_bytes().to_vec())
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            line: RequestLine {
                method: self.method.ok_or("method missing")?,
                target: self.target.ok_or("target missing")?,
                version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            },
            headers: self.headers,
            body: self.body,
            session: None,
        })
    }
}

impl Request {
    pub fn method(&self) -> Method {
        self.line.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.line.path()
    }

    pub fn is_get(&self) -> bool {
        self.line.method == Method::GET
    }

    pub fn is_post(&self) -> bool {
        self.line.method == Method::POST
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn cookies(&self) -> HttpCookie {
        self.headers.parse_cookie()
    }

    /// The `JSESSIONID` cookie value, if the client sent one.
    pub fn session_id(&self) -> Option<String> {
        self.cookies().session_id().map(str::to_string)
    }

    /// Decodes the body as form fields.
    ///
    /// Without a `Content-Length` header the form is empty.
    pub fn form(&self) -> Result<RequestBody, DecodeError> {
        if !self.headers.contains("Content-Length") {
            return Ok(RequestBody::empty());
        }

        let text = std::str::from_utf8(&self.body).map_err(|_| DecodeError::InvalidBody)?;
        RequestBody::parse(text)
    }
}

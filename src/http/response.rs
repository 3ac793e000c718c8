/// HTTP status codes supported by the server.
///
/// Common HTTP status codes used in responses:
/// - `Ok` (200): Request successful
/// - `Found` (302): Redirect to the `Location` header
/// - `Unauthorized` (401): Login failed
/// - `NotFound` (404): Resource not found
/// - `MethodNotAllowed` (405): HTTP method not supported on the route
/// - `Conflict` (409): Account already registered
/// - `InternalServerError` (500): Server error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
    /// 401 Unauthorized
    Unauthorized,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 409 Conflict
    Conflict,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnstile::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::Conflict => 409,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::Conflict => "Conflict",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// What the body of a [`ResponseEntity`] is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    /// Serve the bytes of the named static resource.
    Render(String),
    /// Send the client to another path.
    Redirect(String),
}

/// The outcome of a route, before it is rendered to bytes.
///
/// Built once per code path and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntity {
    status: StatusCode,
    mode: ResponseMode,
    session_id: Option<String>,
}

impl ResponseEntity {
    pub fn render(status: StatusCode, path: impl Into<String>) -> Self {
        Self {
            status,
            mode: ResponseMode::Render(path.into()),
            session_id: None,
        }
    }

    /// A `302 Found` redirect.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::Found,
            mode: ResponseMode::Redirect(location.into()),
            session_id: None,
        }
    }

    /// Attaches a freshly created session id, emitted as `Set-Cookie`.
    pub fn with_session(self, id: impl Into<String>) -> Self {
        Self {
            session_id: Some(id.into()),
            ..self
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn mode(&self) -> &ResponseMode {
        &self.mode
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The resource path for render mode, `None` for redirects.
    pub fn render_target(&self) -> Option<&str> {
        match &self.mode {
            ResponseMode::Render(path) => Some(path),
            ResponseMode::Redirect(_) => None,
        }
    }

    /// The `Location` for redirect mode, `None` for renders.
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.mode {
            ResponseMode::Redirect(location) => Some(location),
            ResponseMode::Render(_) => None,
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep insertion order so the serialized bytes are deterministic.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in emission order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/css;charset=utf-8")
///     .body(b"body {}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Sets `Content-Length` to the body size; any earlier value is replaced
    /// so the header always matches the bytes sent.
    pub fn build(self) -> Response {
        let len = self.body.len();
        let mut response = Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        };

        match response.headers.iter_mut().find(|(k, _)| k == "Content-Length") {
            Some(entry) => entry.1 = len.to_string(),
            None => response
                .headers
                .push(("Content-Length".to_string(), len.to_string())),
        }

        response
    }
}

impl Response {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::plain(StatusCode::NotFound, "404 Not Found")
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self::plain(StatusCode::MethodNotAllowed, "405 Method Not Allowed")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::plain(StatusCode::InternalServerError, "500 Internal Server Error")
    }

    /// Drops the body for a `HEAD` answer. `Content-Length` still describes
    /// the body a `GET` would have carried.
    pub fn strip_body(&mut self) {
        self.body.clear();
    }

    fn plain(status: StatusCode, body: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain;charset=utf-8")
            .body(body.as_bytes().to_vec())
            .build()
    }
}

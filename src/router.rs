//! Request routing
//!
//! Every request resolves to one [`Route`] from its method and path (query
//! string ignored). Handlers return an immutable [`ResponseEntity`]; failed
//! logins and duplicate registrations are ordinary responses, not errors.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::http::form::RequestBody;
use crate::http::parser::DecodeError;
use crate::http::request::{Method, Request};
use crate::http::response::{ResponseEntity, StatusCode};
use crate::session::{Session, SessionStore};
use crate::user::{PasswordVerifier, PlainTextVerifier, User, UserRepository};

pub const INDEX_PAGE: &str = "/index.html";
pub const LOGIN_PAGE: &str = "/login.html";
pub const REGISTER_PAGE: &str = "/register.html";
pub const UNAUTHORIZED_PAGE: &str = "/401.html";
pub const CONFLICT_PAGE: &str = "/409.html";

/// Session attribute holding the logged-in [`User`].
pub const USER_ATTRIBUTE: &str = "user";

const ACCOUNT: &str = "account";
const PASSWORD: &str = "password";
const EMAIL: &str = "email";

/// Failures that stop a route from producing a response.
#[derive(Debug)]
pub enum RouteError {
    /// The path is known but does not accept this method.
    MethodNotAllowed { method: Method, path: String },
    /// The route needs form fields and the body could not be decoded.
    MalformedBody(DecodeError),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::MethodNotAllowed { method, path } => {
                write!(f, "{method} not allowed on {path}")
            }
            RouteError::MalformedBody(e) => write!(f, "malformed body: {e}"),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::MethodNotAllowed { .. } => None,
            RouteError::MalformedBody(e) => Some(e),
        }
    }
}

impl From<DecodeError> for RouteError {
    fn from(e: DecodeError) -> Self {
        RouteError::MalformedBody(e)
    }
}

/// The fixed set of routes the server answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /login` (also `HEAD`)
    LoginPage,
    /// `POST /login`
    Login,
    /// `GET /register` (also `HEAD`)
    RegisterPage,
    /// `POST /register`
    Register,
    /// Any other path, served as a static resource.
    Static(String),
}

impl Route {
    /// Resolves a route from the method and the query-free path.
    ///
    /// # Example
    ///
    /// ```
    /// # use turnstile::http::request::Method;
    /// # use turnstile::router::Route;
    /// assert_eq!(Route::resolve(Method::POST, "/login").unwrap(), Route::Login);
    /// assert_eq!(
    ///     Route::resolve(Method::GET, "/css/styles.css").unwrap(),
    ///     Route::Static("/css/styles.css".to_string())
    /// );
    /// assert!(Route::resolve(Method::DELETE, "/login").is_err());
    /// ```
    pub fn resolve(method: Method, path: &str) -> Result<Self, RouteError> {
        match (path, method) {
            ("/login", Method::GET | Method::HEAD) => Ok(Route::LoginPage),
            ("/login", Method::POST) => Ok(Route::Login),
            ("/register", Method::GET | Method::HEAD) => Ok(Route::RegisterPage),
            ("/register", Method::POST) => Ok(Route::Register),
            ("/login" | "/register", method) => Err(RouteError::MethodNotAllowed {
                method,
                path: path.to_string(),
            }),
            (path, _) => Ok(Route::Static(path.to_string())),
        }
    }
}

/// Dispatches requests to the login, registration and static handlers.
#[derive(Clone)]
pub struct Router {
    sessions: SessionStore,
    users: Arc<dyn UserRepository>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl Router {
    pub fn new(sessions: SessionStore, users: Arc<dyn UserRepository>) -> Self {
        Self {
            sessions,
            users,
            verifier: Arc::new(PlainTextVerifier),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn PasswordVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.users
    }

    /// Attaches the session named by the request's cookie, then runs the
    /// matching handler.
    pub async fn handle(&self, request: &mut Request) -> Result<ResponseEntity, RouteError> {
        if let Some(id) = request.session_id() {
            request.session = self.sessions.find(&id).await;
        }

        let route = Route::resolve(request.method(), request.path())?;
        debug!(?route, has_session = request.session.is_some(), "Resolved route");

        match route {
            Route::LoginPage => Ok(self.login_page(request)),
            Route::Login => self.login(&request.form()?).await,
            Route::RegisterPage => Ok(ResponseEntity::render(StatusCode::Ok, REGISTER_PAGE)),
            Route::Register => Ok(self.register(&request.form()?)),
            Route::Static(path) => Ok(ResponseEntity::render(StatusCode::Ok, path)),
        }
    }

    /// Any stored session counts as logged in, whatever its attributes.
    fn login_page(&self, request: &Request) -> ResponseEntity {
        match &request.session {
            Some(_) => ResponseEntity::redirect(INDEX_PAGE),
            None => ResponseEntity::render(StatusCode::Ok, LOGIN_PAGE),
        }
    }

    async fn login(&self, form: &RequestBody) -> Result<ResponseEntity, RouteError> {
        let account = form.get(ACCOUNT);
        let password = form.get(PASSWORD);

        let user = self
            .users
            .find_by_account(account)
            .filter(|user| self.verifier.verify(user, password));

        let Some(user) = user else {
            info!(account, "Login rejected");
            return Ok(ResponseEntity::render(
                StatusCode::Unauthorized,
                UNAUTHORIZED_PAGE,
            ));
        };

        let mut session = Session::new();
        session.set_attribute(USER_ATTRIBUTE, user);
        let session = self.sessions.add(session).await;

        info!(account, session_id = session.id(), "Login succeeded");
        Ok(ResponseEntity::redirect(INDEX_PAGE).with_session(session.id()))
    }

    fn register(&self, form: &RequestBody) -> ResponseEntity {
        let account = form.get(ACCOUNT);

        if self.users.find_by_account(account).is_some() {
            info!(account, "Registration rejected, account exists");
            return ResponseEntity::render(StatusCode::Conflict, CONFLICT_PAGE);
        }

        let user = User::new(account, form.get(PASSWORD), form.get(EMAIL));
        self.users.save(user);

        info!(account, "Registered new user");
        ResponseEntity::redirect(INDEX_PAGE)
    }
}

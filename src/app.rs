use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::resources::StaticFiles;
use crate::router::Router;
use crate::session::SessionStore;
use crate::user::{InMemoryUserRepository, User};

/// Everything a connection needs to serve a request.
///
/// Built once at startup and cloned into every connection task; the session
/// store and user repository behind it are shared.
#[derive(Clone)]
pub struct App {
    pub router: Router,
    pub resources: Arc<StaticFiles>,
    pub read_timeout: Option<Duration>,
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl App {
    pub fn new(router: Router, resources: StaticFiles) -> Self {
        Self {
            router,
            resources: Arc::new(resources),
            read_timeout: None,
            max_header_bytes: 64 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let users = InMemoryUserRepository::with_users(cfg.users.iter().cloned().map(User::from));
        let router = Router::new(SessionStore::new(), Arc::new(users));

        Self {
            read_timeout: cfg.read_timeout(),
            max_header_bytes: cfg.server.max_header_bytes,
            max_body_bytes: cfg.server.max_body_bytes,
            ..Self::new(router, StaticFiles::new(cfg.static_files.root.clone()))
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

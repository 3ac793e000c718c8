//! Static resource lookup
//!
//! Rendered responses name a resource path (`/login.html`, `/css/styles.css`);
//! a [`ResourceResolver`] turns that path into bytes.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Failure to produce the bytes of a resource.
#[derive(Debug)]
pub enum ResourceError {
    /// No resource exists under the requested path.
    NotFound(String),
    Io(io::Error),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(path) => write!(f, "resource not found: {path}"),
            ResourceError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::NotFound(_) => None,
            ResourceError::Io(e) => Some(e),
        }
    }
}

/// Resolves a resource path to its raw bytes.
pub trait ResourceResolver: Send + Sync {
    fn read(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, ResourceError>> + Send;
}

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto a file under the root.
    ///
    /// Returns `None` for paths that would leave the root. A trailing `/`
    /// selects that directory's `index.html`.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        let mut resolved = self.root.clone();

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if path.ends_with('/') {
            resolved.push("index.html");
        }

        Some(resolved)
    }
}

impl ResourceResolver for StaticFiles {
    async fn read(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))?;

        match tokio::fs::read(&file).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::IsADirectory) => {
                Err(ResourceError::NotFound(path.to_string()))
            }
            Err(e) => Err(ResourceError::Io(e)),
        }
    }
}

//! Mapping request paths onto the webroot
//!
//! A path ending in "/" names a directory and resolves to a plain-text
//! listing of its entries. Anything else must name a regular file, which is
//! returned in full along with a media type guessed from its extension.
//! Nothing outside the webroot is ever touched: lexical `..` escapes are
//! refused before the filesystem is consulted, and symlinks are followed
//! only as far as their canonical target stays under the root.

use crate::error::ServeError;
use crate::http::mime::{media_type_for, TEXT_PLAIN};
use crate::webroot::listing::list_directory;
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// A resolved resource: the bytes to send and their media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub content: Vec<u8>,
    pub media_type: String,
}

/// The directory everything is served from.
///
/// Created once at startup and shared read-only between connections.
#[derive(Debug, Clone)]
pub struct Webroot {
    /// Canonical absolute path of the root directory
    root: PathBuf,
}

impl Webroot {
    /// Opens the webroot at `root`, which must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root)
            .with_context(|| format!("Webroot {} is not accessible", root.display()))?;

        if !canonical.is_dir() {
            anyhow::bail!("Webroot {} is not a directory", canonical.display());
        }

        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a request path into the resource it names.
    ///
    /// Fails with `NotFound` when nothing servable exists there and with
    /// `TraversalRejected` when the path would leave the webroot.
    pub async fn resolve(&self, path: &str) -> Result<Resource, ServeError> {
        let local = self.local_path(path)?;
        tracing::debug!(path, local = %local.display(), "Resolving request path");

        let canonical = tokio::fs::canonicalize(&local)
            .await
            .map_err(|e| filesystem_error(path, e))?;

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                path,
                target = %canonical.display(),
                "Symlink points outside the webroot"
            );
            return Err(ServeError::TraversalRejected(path.to_string()));
        }

        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|e| filesystem_error(path, e))?;

        if path.ends_with('/') {
            if !metadata.is_dir() {
                return Err(ServeError::NotFound(path.to_string()));
            }

            let names = list_directory(&canonical)
                .await
                .map_err(|e| filesystem_error(path, e))?;

            return Ok(Resource {
                content: names.join("\n").into_bytes(),
                media_type: TEXT_PLAIN.to_string(),
            });
        }

        if !metadata.is_file() {
            return Err(ServeError::NotFound(path.to_string()));
        }

        let content = tokio::fs::read(&canonical)
            .await
            .map_err(|e| filesystem_error(path, e))?;

        // The requested name decides the media type, not a symlink's target.
        Ok(Resource {
            content,
            media_type: media_type_for(&local),
        })
    }

    /// Joins `path` onto the root without touching the filesystem.
    ///
    /// Leading and trailing slashes are dropped and `.` segments ignored.
    /// A `..` that would climb above the root, or any root or prefix
    /// component, is a traversal attempt.
    fn local_path(&self, path: &str) -> Result<PathBuf, ServeError> {
        let relative = path.trim_start_matches('/').trim_end_matches('/');

        let mut local = self.root.clone();
        let mut depth = 0usize;

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => {
                    local.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if depth == 0 {
                        tracing::warn!(path, "Rejected path traversal attempt");
                        return Err(ServeError::TraversalRejected(path.to_string()));
                    }
                    local.pop();
                    depth -= 1;
                }
                Component::RootDir | Component::Prefix(_) => {
                    tracing::warn!(path, "Rejected absolute path");
                    return Err(ServeError::TraversalRejected(path.to_string()));
                }
            }
        }

        Ok(local)
    }
}

/// Every filesystem failure surfaces to the client as a plain 404.
fn filesystem_error(path: &str, err: std::io::Error) -> ServeError {
    if err.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(path, error = %err, "Filesystem error while resolving path");
    }
    ServeError::NotFound(path.to_string())
}

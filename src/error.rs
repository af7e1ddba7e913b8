//! Error kinds produced while serving a single connection.

use crate::http::response::Response;

/// Everything that can go wrong between accepting a connection and closing it.
///
/// Client-visible kinds map to one of the fixed responses through
/// [`ServeError::response`]. `Timeout` and `Transport` have no response:
/// the connection is simply closed.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("unsupported method {0:?}")]
    UnsupportedMethod(String),

    #[error("malformed request line {0:?}")]
    MalformedRequest(String),

    #[error("no resource at {0:?}")]
    NotFound(String),

    #[error("path {0:?} escapes the webroot")]
    TraversalRejected(String),

    #[error("request head exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error("timed out waiting for the request head")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),
}

impl ServeError {
    /// The fixed response the client receives for this error, if any.
    ///
    /// `NotFound` and `TraversalRejected` produce the same 404 so the client
    /// cannot tell them apart.
    pub fn response(&self) -> Option<Response> {
        match self {
            ServeError::UnsupportedMethod(_) => Some(Response::method_not_allowed()),
            ServeError::MalformedRequest(_) | ServeError::RequestTooLarge { .. } => {
                Some(Response::bad_request())
            }
            ServeError::NotFound(_) | ServeError::TraversalRejected(_) => {
                Some(Response::not_found())
            }
            ServeError::Timeout | ServeError::Transport(_) => None,
        }
    }
}

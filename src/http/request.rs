/// The only method this server answers; anything else gets 405.
pub const GET: &str = "GET";

/// A request that passed the request-line checks and will be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request target exactly as sent, e.g. "/images/"
    pub path: String,
}

impl Request {
    /// True when the path asks for a directory listing (ends in "/").
    pub fn wants_listing(&self) -> bool {
        self.path.ends_with('/')
    }
}

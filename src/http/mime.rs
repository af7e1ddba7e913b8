//! Media type detection based on file extensions.

use std::path::Path;

/// Media type used for directory listings.
pub const TEXT_PLAIN: &str = "text/plain";

/// Fallback for unknown or missing extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guesses the media type of `path` from its extension.
///
/// Never fails: anything the table does not know is served as
/// `application/octet-stream`.
///
/// # Example
///
/// ```
/// # use shrubbery::http::mime::media_type_for;
/// assert_eq!(media_type_for("index.html".as_ref()), "text/html");
/// assert_eq!(media_type_for("README".as_ref()), "application/octet-stream");
/// ```
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

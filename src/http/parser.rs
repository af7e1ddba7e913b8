use crate::error::ServeError;
use crate::http::request::{Request, GET};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Parses a buffered request head.
///
/// Returns `Ok(None)` while the header terminator has not arrived yet, and
/// the parsed request together with the number of bytes it spans otherwise.
pub fn parse_http_request(buf: &[u8]) -> Result<Option<(Request, usize)>, ServeError> {
    let Some(headers_end) = find_headers_end(buf) else {
        return Ok(None);
    };

    // Keep the CRLF that ends the last line so the request line is always terminated.
    let head_bytes = &buf[..headers_end + 2];
    let head = std::str::from_utf8(head_bytes).map_err(|_| {
        ServeError::MalformedRequest(String::from_utf8_lossy(head_bytes).into_owned())
    })?;

    let request = parse_request(head)?;
    Ok(Some((request, headers_end + HEADER_TERMINATOR.len())))
}

/// Parses the request line at the start of `text`.
///
/// `text` must hold at least one CRLF-terminated line. Only the first line
/// is looked at: it has to be exactly `METHOD SP PATH SP VERSION`. The path
/// is returned untouched, `..` segments and trailing slashes included.
pub fn parse_request(text: &str) -> Result<Request, ServeError> {
    let (request_line, _) = text
        .split_once("\r\n")
        .ok_or_else(|| ServeError::MalformedRequest(text.to_string()))?;

    let parts: Vec<&str> = request_line.split(' ').collect();
    let [method_str, path, version] = parts.as_slice() else {
        return Err(ServeError::MalformedRequest(request_line.to_string()));
    };

    if method_str.is_empty() || version.is_empty() || !path.starts_with('/') {
        return Err(ServeError::MalformedRequest(request_line.to_string()));
    }

    // Methods are case-sensitive on the wire
    if *method_str != GET {
        return Err(ServeError::UnsupportedMethod(method_str.to_string()));
    }

    Ok(Request {
        path: path.to_string(),
    })
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap().unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn incomplete_head_is_not_an_error() {
        assert!(parse_http_request(b"GET / HTTP/1.1\r\n").unwrap().is_none());
    }
}

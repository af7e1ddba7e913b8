use shrubbery::error::ServeError;
use shrubbery::http::parser::{find_headers_end, parse_http_request, parse_request};

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap().unwrap();

    assert_eq!(parsed.path, "/");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_returns_path_unchanged() {
    let paths = ["/index.html", "/images/", "/../../etc/passwd", "/a//b/./c/"];

    for path in paths {
        let text = format!("GET {} HTTP/1.1\r\n\r\n", path);
        let parsed = parse_request(&text).unwrap();
        assert_eq!(parsed.path, path);
    }
}

#[test]
fn test_parse_ignores_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nBrokenHeader\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap().unwrap();

    assert_eq!(parsed.path, "/path");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert!(parse_http_request(req).unwrap().is_none());
}

#[test]
fn test_parse_consumed_excludes_trailing_bytes() {
    let req = b"GET / HTTP/1.1\r\n\r\nextra";
    let (_, consumed) = parse_http_request(req).unwrap().unwrap();

    assert_eq!(consumed, req.len() - "extra".len());
}

#[test]
fn test_parse_non_get_methods_are_unsupported() {
    for method in ["POST", "HEAD", "PUT", "DELETE", "OPTIONS", "PATCH", "BREW", "get"] {
        let req = format!("{} /index.html HTTP/1.1\r\n\r\n", method);
        let result = parse_http_request(req.as_bytes());

        match result {
            Err(ServeError::UnsupportedMethod(m)) => assert_eq!(m, method),
            other => panic!("expected UnsupportedMethod for {}, got {:?}", method, other),
        }
    }
}

#[test]
fn test_parse_malformed_request_lines() {
    let lines = [
        "GET /\r\n\r\n",
        "GET / HTTP/1.1 extra\r\n\r\n",
        "GET  / HTTP/1.1\r\n\r\n",
        "\r\n\r\n",
        "GET index.html HTTP/1.1\r\n\r\n",
        "GET / \r\n\r\n",
    ];

    for line in lines {
        let result = parse_http_request(line.as_bytes());
        assert!(
            matches!(result, Err(ServeError::MalformedRequest(_))),
            "{:?} should be malformed, got {:?}",
            line,
            result
        );
    }
}

#[test]
fn test_parse_malformed_takes_precedence_over_method() {
    let result = parse_request("POST /\r\n");

    assert!(matches!(result, Err(ServeError::MalformedRequest(_))));
}

#[test]
fn test_parse_request_without_line_terminator() {
    let result = parse_request("GET / HTTP/1.1");

    assert!(matches!(result, Err(ServeError::MalformedRequest(_))));
}

#[test]
fn test_parse_non_utf8_request_line() {
    let req = b"GET /\xff\xfe HTTP/1.1\r\n\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ServeError::MalformedRequest(_))
    ));
}

#[test]
fn test_find_headers_end() {
    assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r\n"), Some(14));
    assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n"), None);
    assert_eq!(find_headers_end(b""), None);
}

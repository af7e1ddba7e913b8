use shrubbery::http::request::Request;

fn get(path: &str) -> Request {
    Request {
        path: path.to_string(),
    }
}

#[test]
fn test_request_wants_listing_for_trailing_slash() {
    assert!(get("/").wants_listing());
    assert!(get("/images/").wants_listing());
}

#[test]
fn test_request_file_paths_do_not_want_listing() {
    assert!(!get("/index.html").wants_listing());
    assert!(!get("/images").wants_listing());
}


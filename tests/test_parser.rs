use turnstile::http::parser::{DecodeError, parse_http_request, parse_request_head};
use turnstile::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method(), Method::GET);
    assert_eq!(parsed.path(), "/");
    assert_eq!(parsed.line.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_form_body() {
    let req = b"POST /login HTTP/1.1\r\nHost: localhost\r\nContent-Length: 30\r\n\r\naccount=gugu&password=password";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method(), Method::POST);
    assert_eq!(parsed.path(), "/login");
    assert_eq!(parsed.body, b"account=gugu&password=password".to_vec());
    assert_eq!(consumed, req.len());

    let form = parsed.form().unwrap();
    assert_eq!(form.get("account"), "gugu");
    assert_eq!(form.get("password"), "password");
}

#[test]
fn test_parse_path_strips_query_string() {
    let req = b"GET /a?x=1 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.line.target, "/a?x=1");
    assert_eq!(parsed.path(), "/a");
    assert_eq!(parsed.line.query(), Some("x=1"));
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert_eq!(parsed.headers.len(), 3);
}

#[test]
fn test_parse_header_value_is_left_trimmed_only() {
    let req = b"GET / HTTP/1.1\r\nX-Padded:    value  \r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("X-Padded"), Some("value  "));
}

#[test]
fn test_parse_header_value_may_contain_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("localhost:8080"));
}

#[test]
fn test_parse_repeated_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Trace: one\r\nX-Trace: two\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("X-Trace"), Some("two"));
    assert_eq!(parsed.headers.len(), 1);
}

#[test]
fn test_parse_accepts_bare_line_feeds() {
    let req = b"POST /register HTTP/1.1\nContent-Length: 4\n\nab=c";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path(), "/register");
    assert_eq!(parsed.body, b"ab=c".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(DecodeError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(DecodeError::Incomplete)));
}

#[test]
fn test_parse_consumes_only_declared_body() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: 3\r\n\r\na=bEXTRA";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"a=b".to_vec());
    assert_eq!(consumed, req.len() - "EXTRA".len());
}

#[test]
fn test_parse_empty_first_line() {
    assert!(matches!(
        parse_http_request(b"\r\n"),
        Err(DecodeError::EmptyRequest)
    ));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"BREW / HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert_eq!(result.unwrap_err(), DecodeError::InvalidMethod("BREW".to_string()));
}

#[test]
fn test_parse_request_line_needs_three_tokens() {
    assert!(matches!(
        parse_http_request(b"GET /\r\n\r\n"),
        Err(DecodeError::InvalidRequestLine)
    ));
    assert!(matches!(
        parse_http_request(b"GET / HTTP/1.1 extra\r\n\r\n"),
        Err(DecodeError::InvalidRequestLine)
    ));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(DecodeError::InvalidHeader(_))));
}

#[test]
fn test_parse_invalid_content_length() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(DecodeError::InvalidContentLength)));
}

#[test]
fn test_parse_conflicting_content_length_is_rejected() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 50\r\n\r\nhello";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(DecodeError::ConflictingContentLength)));
}

#[test]
fn test_parse_repeated_identical_content_length_is_accepted() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: 3\r\ncontent-length: 3\r\n\r\na=b";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"a=b".to_vec());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_head_reports_declared_length_before_body_arrives() {
    let req = b"POST /login HTTP/1.1\r\nContent-Length: 10000000000\r\n\r\nacc";
    let head = parse_request_head(req).unwrap();

    assert_eq!(head.content_length, 10_000_000_000);
    assert_eq!(head.body_start, req.len() - 3);
    assert!(matches!(parse_http_request(req), Err(DecodeError::Incomplete)));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method(), expected_method);
        assert_eq!(parsed.method().as_str(), method_str);
    }
}

#[test]
fn test_parse_request_without_content_length_has_empty_body() {
    let req = b"POST /login HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.body.is_empty());
    assert!(parsed.form().unwrap().is_empty());
}

#[test]
fn test_parse_header_case_preservation() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    let names: Vec<&str> = parsed.headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Content-Type"]);
    assert_eq!(parsed.header("content-type"), Some("application/json"));
}

use {
    com::{ComError, bytes_response, framing},
    http::{Method, StatusCode},
    tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader},
};

async fn parse(raw: &[u8]) -> Result<com::Request, ComError> {
    let (mut writer, reader) = tokio::io::duplex(64 * 1024);
    writer.write_all(raw).await.expect("write failed");
    drop(writer);
    framing::read_request(&mut BufReader::new(reader)).await
}

#[tokio::test]
async fn test_read_request_with_body() {
    let request = parse(
        b"POST /friends?userId=a HTTP/1.1\r\nHost: x\r\nContent-Type: application/json\r\nContent-Length: 13\r\n\r\n{\"chatId\":42}",
    )
    .await
    .expect("read failed");

    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.uri().path(), "/friends");
    assert_eq!(request.uri().query(), Some("userId=a"));
    assert_eq!(request.headers()["content-type"], "application/json");
    assert_eq!(request.body(), b"{\"chatId\":42}");
}

#[tokio::test]
async fn test_read_request_without_body_accepts_bare_newlines() {
    let request = parse(b"GET /health HTTP/1.0\nAccept: */*\n\n")
        .await
        .expect("read failed");
    assert_eq!(request.method(), Method::GET);
    assert!(request.body().is_empty());
}

#[tokio::test]
async fn test_eof_returns_connection_closed() {
    assert!(matches!(parse(b"").await, Err(ComError::ConnectionClosed)));
    assert!(matches!(
        parse(b"GET / HTTP/1.1\r\nHost").await,
        Err(ComError::ConnectionClosed)
    ));
    assert!(matches!(
        parse(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc").await,
        Err(ComError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn test_malformed_requests_are_rejected() {
    assert!(matches!(
        parse(b"GARBAGE\r\n\r\n").await,
        Err(ComError::BadRequest(_))
    ));
    assert!(matches!(
        parse(b"GET / SPDY/3\r\n\r\n").await,
        Err(ComError::BadRequest(_))
    ));
    assert!(matches!(
        parse(b"GET / HTTP/1.1\r\nno-colon-here\r\n\r\n").await,
        Err(ComError::BadRequest(_))
    ));
    assert!(matches!(
        parse(b"POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n").await,
        Err(ComError::BadRequest(_))
    ));
    assert!(matches!(
        parse(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n").await,
        Err(ComError::BadRequest(_))
    ));
}

#[tokio::test]
async fn test_oversized_requests_are_rejected() {
    let raw = format!(
        "POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
        framing::MAX_BODY_SIZE + 1
    );
    assert!(matches!(
        parse(raw.as_bytes()).await,
        Err(ComError::MessageTooLarge(_))
    ));

    let mut raw = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
    raw.extend(std::iter::repeat_n(b'a', framing::MAX_HEAD_SIZE));
    raw.extend_from_slice(b"\r\n\r\n");
    assert!(matches!(
        parse(&raw).await,
        Err(ComError::MessageTooLarge(_))
    ));
}

#[tokio::test]
async fn test_write_response() {
    let (mut writer, mut reader) = tokio::io::duplex(1024);
    let response = bytes_response(StatusCode::CREATED, "application/json", b"{}".to_vec());

    framing::write_response(&mut writer, &response)
        .await
        .expect("write failed");
    drop(writer);

    let mut raw = String::new();
    reader.read_to_string(&mut raw).await.expect("read failed");
    assert!(raw.starts_with("HTTP/1.1 201 Created\r\n"));
    assert!(raw.contains("content-type: application/json\r\n"));
    assert!(raw.contains("Content-Length: 2\r\n"));
    assert!(raw.contains("Connection: close\r\n"));
    assert!(raw.ends_with("\r\n\r\n{}"));
}

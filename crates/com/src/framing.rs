use {
    crate::{ComError, Request, Response},
    tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt},
};

/// Upper bound for the request line plus all header lines.
pub const MAX_HEAD_SIZE: usize = 16 * 1024;

/// Upper bound for a request body.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Read one CRLF-terminated line, counting it against the head budget.
///
/// Returns `Ok(None)` on EOF before any byte was read.
async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    head_len: &mut usize,
) -> Result<Option<String>, ComError> {
    let limit = MAX_HEAD_SIZE.saturating_sub(*head_len) + 1;
    let mut line = Vec::new();
    let n = (&mut *reader)
        .take(limit as u64)
        .read_until(b'\n', &mut line)
        .await?;
    if n == 0 {
        return Ok(None);
    }
    *head_len += n;
    if *head_len > MAX_HEAD_SIZE {
        return Err(ComError::MessageTooLarge(*head_len));
    }
    if line.last() != Some(&b'\n') {
        return Err(ComError::ConnectionClosed);
    }
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line)
        .map(Some)
        .map_err(|_| ComError::BadRequest("header is not valid utf-8".to_string()))
}

/// Read a single HTTP/1.x request.
///
/// Bodies are delimited by `Content-Length` only; chunked transfer encoding is rejected.
///
/// Returns `ComError::ConnectionClosed` if the peer hangs up before a full request arrived,
/// and `ComError::MessageTooLarge` if the head or body exceeds its limit.
pub async fn read_request<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Request, ComError> {
    let mut head_len = 0;
    let request_line = read_line(reader, &mut head_len)
        .await?
        .ok_or(ComError::ConnectionClosed)?;

    let mut parts = request_line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => (method, target, version),
        _ => {
            return Err(ComError::BadRequest(format!(
                "malformed request line {:?}",
                request_line
            )));
        }
    };
    if !version.starts_with("HTTP/1.") {
        return Err(ComError::BadRequest(format!("unsupported version {}", version)));
    }
    let method = http::Method::from_bytes(method.as_bytes())
        .map_err(|_| ComError::BadRequest(format!("invalid method {}", method)))?;

    let mut builder = http::Request::builder().method(method).uri(target);
    let mut content_length = 0usize;
    loop {
        let line = read_line(reader, &mut head_len)
            .await?
            .ok_or(ComError::ConnectionClosed)?;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ComError::BadRequest(format!("malformed header {:?}", line)))?;
        let (name, value) = (name.trim(), value.trim());
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value
                .parse()
                .map_err(|_| ComError::BadRequest(format!("invalid content-length {:?}", value)))?;
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            return Err(ComError::BadRequest(
                "transfer-encoding is not supported".to_string(),
            ));
        }
        builder = builder.header(name, value);
    }

    if content_length > MAX_BODY_SIZE {
        return Err(ComError::MessageTooLarge(content_length));
    }
    let mut body = vec![0u8; content_length];
    match reader.read_exact(&mut body).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ComError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(builder.body(body)?)
}

/// Write `response` and mark the connection for closing.
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
) -> Result<(), ComError> {
    let status = response.status();
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    for (name, value) in response.headers() {
        if name == http::header::CONTENT_LENGTH || name == http::header::CONNECTION {
            continue;
        }
        head.push_str(name.as_str());
        head.push_str(": ");
        head.push_str(&String::from_utf8_lossy(value.as_bytes()));
        head.push_str("\r\n");
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body().len()
    ));

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(response.body()).await?;
    writer.flush().await?;
    Ok(())
}

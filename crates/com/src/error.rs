use std::fmt;

#[derive(Debug)]
pub enum ComError {
    Io(std::io::Error),
    BadRequest(String),
    ConnectionClosed,
    MessageTooLarge(usize),
    Json(serde_json::Error),
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComError::Io(err) => write!(f, "io error: {err}"),
            ComError::BadRequest(reason) => write!(f, "bad request: {reason}"),
            ComError::ConnectionClosed => write!(f, "connection closed"),
            ComError::MessageTooLarge(len) => write!(f, "message too large: {len} bytes"),
            ComError::Json(err) => write!(f, "invalid json: {err}"),
        }
    }
}

impl std::error::Error for ComError {}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        ComError::Io(err)
    }
}

impl From<serde_json::Error> for ComError {
    fn from(err: serde_json::Error) -> Self {
        ComError::Json(err)
    }
}

impl From<http::Error> for ComError {
    fn from(err: http::Error) -> Self {
        ComError::BadRequest(err.to_string())
    }
}

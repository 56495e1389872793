use std::fmt;

#[derive(Debug)]
pub enum GuardianError {
    Io(std::io::Error),
    Json(serde_json::Error),
    AlreadyExists(i64),
    NotFound(i64),
}

impl fmt::Display for GuardianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardianError::Io(err) => write!(f, "io error: {err}"),
            GuardianError::Json(err) => write!(f, "malformed guardian file: {err}"),
            GuardianError::AlreadyExists(chat_id) => write!(f, "guardian {chat_id} already exists"),
            GuardianError::NotFound(chat_id) => write!(f, "guardian {chat_id} not found"),
        }
    }
}

impl std::error::Error for GuardianError {}

impl From<std::io::Error> for GuardianError {
    fn from(err: std::io::Error) -> Self {
        GuardianError::Io(err)
    }
}

impl From<serde_json::Error> for GuardianError {
    fn from(err: serde_json::Error) -> Self {
        GuardianError::Json(err)
    }
}

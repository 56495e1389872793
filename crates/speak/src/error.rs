use std::fmt;

#[derive(Debug)]
pub enum SpeakError {
    Http(reqwest::Error),
    Api { status: u16, message: String },
    MissingKey(&'static str),
    EmptyResponse,
    EmptyText,
}

impl fmt::Display for SpeakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakError::Http(err) => write!(f, "http error: {err}"),
            SpeakError::Api { status, message } => write!(f, "api error {status}: {message}"),
            SpeakError::MissingKey(key) => write!(f, "{key} is not configured"),
            SpeakError::EmptyResponse => write!(f, "api returned no content"),
            SpeakError::EmptyText => write!(f, "nothing to say"),
        }
    }
}

impl std::error::Error for SpeakError {}

impl From<reqwest::Error> for SpeakError {
    fn from(err: reqwest::Error) -> Self {
        SpeakError::Http(err)
    }
}

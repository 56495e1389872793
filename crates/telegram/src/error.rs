use std::fmt;

#[derive(Debug)]
pub enum TelegramError {
    Http(reqwest::Error),
    Api { code: Option<i64>, description: String },
    /// Another client is polling the same bot (HTTP 409).
    Conflict,
}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelegramError::Http(err) => write!(f, "http error: {err}"),
            TelegramError::Api {
                code: Some(code),
                description,
            } => write!(f, "telegram api error {code}: {description}"),
            TelegramError::Api {
                code: None,
                description,
            } => write!(f, "telegram api error: {description}"),
            TelegramError::Conflict => write!(f, "another getUpdates consumer is active"),
        }
    }
}

impl std::error::Error for TelegramError {}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err)
    }
}

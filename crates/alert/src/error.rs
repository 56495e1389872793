use std::fmt;

/// Failure to deliver an alert to one guardian.
#[derive(Debug)]
pub enum NotifyError {
    /// No messaging gateway is configured.
    Unavailable,
    Delivery(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Unavailable => write!(f, "messaging gateway unavailable"),
            NotifyError::Delivery(err) => write!(f, "delivery failed: {err}"),
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotifyError::Unavailable => None,
            NotifyError::Delivery(err) => Some(err.as_ref()),
        }
    }
}

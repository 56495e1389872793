use std::time::Duration;

/// Timing of an alert session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertConfig {
    primary_timeout: Duration,
    collection_window: Duration,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(15),
            collection_window: Duration::from_secs(3),
        }
    }
}

impl AlertConfig {
    /// How long guardians have to react before the fallback insult plays.
    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    /// How long after the latest reply further replies are still collected.
    pub fn with_collection_window(mut self, window: Duration) -> Self {
        self.collection_window = window;
        self
    }

    pub fn primary_timeout(&self) -> Duration {
        self.primary_timeout
    }

    pub fn collection_window(&self) -> Duration {
        self.collection_window
    }
}

use {
    crate::{Bot, TelegramError, Update},
    base::log,
    std::{sync::Arc, time::Duration},
};

const DEFAULT_POLL_TIMEOUT_SECS: u64 = 1;
const DEFAULT_CONFLICT_BACKOFF: Duration = Duration::from_secs(3);

/// Offset cursor over `getUpdates`.
///
/// Each successful batch moves the offset past its last update, which also
/// acknowledges those updates to Telegram.
pub struct Poller {
    bot: Arc<Bot>,
    offset: i64,
    timeout_secs: u64,
    conflict_backoff: Duration,
}

impl Poller {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self {
            bot,
            offset: 0,
            timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            conflict_backoff: DEFAULT_CONFLICT_BACKOFF,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_conflict_backoff(mut self, backoff: Duration) -> Self {
        self.conflict_backoff = backoff;
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Fetch the next batch of updates, in order.
    pub async fn poll(&mut self) -> Result<Vec<Update>, TelegramError> {
        let updates = self.bot.get_updates(self.offset, self.timeout_secs).await?;
        if let Some(last) = updates.iter().map(|update| update.update_id).max() {
            self.offset = self.offset.max(last + 1);
        }
        Ok(updates)
    }

    /// Like [`Poller::poll`], but errors are logged and yield an empty batch.
    /// A conflict with another consumer also backs off before returning.
    pub async fn next_batch(&mut self) -> Vec<Update> {
        match self.poll().await {
            Ok(updates) => updates,
            Err(TelegramError::Conflict) => {
                log::warn!(
                    "another bot instance is polling, backing off {:?}",
                    self.conflict_backoff
                );
                tokio::time::sleep(self.conflict_backoff).await;
                Vec::new()
            }
            Err(error) => {
                log::error!("polling failed: {}", error);
                Vec::new()
            }
        }
    }
}

use {
    crate::GuardianError,
    serde::{Deserialize, Serialize},
};

/// User id used when a request does not name one.
pub const DEFAULT_USER_ID: &str = "default";

/// A chat that gets told when its user slouches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub chat_id: i64,
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Guardian {
    pub fn new(chat_id: i64, name: impl Into<String>) -> Self {
        Self {
            chat_id,
            name: name.into(),
            enabled: true,
        }
    }
}

/// Per-user guardian lists.
///
/// Implementations need not be transactional; two writers for the same user may race.
pub trait GuardianStore: Send + Sync {
    /// All guardians of `user_id` in insertion order. Unknown users have none.
    fn list(&self, user_id: &str) -> Result<Vec<Guardian>, GuardianError>;

    /// Append a guardian. Fails with `AlreadyExists` if the chat is already registered.
    fn add(&self, user_id: &str, guardian: Guardian) -> Result<Guardian, GuardianError>;

    /// Remove and return a guardian.
    fn remove(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError>;

    /// Flip `enabled` and return the updated guardian.
    fn toggle(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError>;

    fn enabled(&self, user_id: &str) -> Result<Vec<Guardian>, GuardianError> {
        Ok(self
            .list(user_id)?
            .into_iter()
            .filter(|guardian| guardian.enabled)
            .collect())
    }
}

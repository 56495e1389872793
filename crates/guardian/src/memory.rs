use {
    crate::{Guardian, GuardianError, GuardianStore},
    std::{
        collections::HashMap,
        sync::{Mutex, MutexGuard},
    },
};

/// Volatile store, keyed by user id.
#[derive(Default)]
pub struct MemoryGuardianStore {
    users: Mutex<HashMap<String, Vec<Guardian>>>,
}

impl MemoryGuardianStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> MutexGuard<'_, HashMap<String, Vec<Guardian>>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GuardianStore for MemoryGuardianStore {
    fn list(&self, user_id: &str) -> Result<Vec<Guardian>, GuardianError> {
        Ok(self.users().get(user_id).cloned().unwrap_or_default())
    }

    fn add(&self, user_id: &str, guardian: Guardian) -> Result<Guardian, GuardianError> {
        let mut users = self.users();
        let guardians = users.entry(user_id.to_string()).or_default();
        if guardians.iter().any(|g| g.chat_id == guardian.chat_id) {
            return Err(GuardianError::AlreadyExists(guardian.chat_id));
        }
        guardians.push(guardian.clone());
        Ok(guardian)
    }

    fn remove(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError> {
        let mut users = self.users();
        let guardians = users
            .get_mut(user_id)
            .ok_or(GuardianError::NotFound(chat_id))?;
        let index = guardians
            .iter()
            .position(|g| g.chat_id == chat_id)
            .ok_or(GuardianError::NotFound(chat_id))?;
        Ok(guardians.remove(index))
    }

    fn toggle(&self, user_id: &str, chat_id: i64) -> Result<Guardian, GuardianError> {
        let mut users = self.users();
        let guardian = users
            .get_mut(user_id)
            .and_then(|guardians| guardians.iter_mut().find(|g| g.chat_id == chat_id))
            .ok_or(GuardianError::NotFound(chat_id))?;
        guardian.enabled = !guardian.enabled;
        Ok(guardian.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_are_isolated() {
        let store = MemoryGuardianStore::new();
        store.add("alice", Guardian::new(1, "Mum")).unwrap();
        assert_eq!(store.list("alice").unwrap().len(), 1);
        assert!(store.list("bob").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_and_missing() {
        let store = MemoryGuardianStore::new();
        store.add("u", Guardian::new(1, "Mum")).unwrap();
        assert!(matches!(
            store.add("u", Guardian::new(1, "Mum again")),
            Err(GuardianError::AlreadyExists(1))
        ));
        assert!(matches!(store.remove("u", 2), Err(GuardianError::NotFound(2))));
        assert!(matches!(store.toggle("x", 1), Err(GuardianError::NotFound(1))));
    }

    #[test]
    fn test_toggle_filters_enabled() {
        let store = MemoryGuardianStore::new();
        store.add("u", Guardian::new(1, "Mum")).unwrap();
        store.add("u", Guardian::new(2, "Dad")).unwrap();
        assert!(!store.toggle("u", 1).unwrap().enabled);
        let enabled = store.enabled("u").unwrap();
        assert_eq!(enabled, vec![Guardian::new(2, "Dad")]);
        assert_eq!(store.remove("u", 1).unwrap().chat_id, 1);
    }
}

use {
    crate::Message,
    serde::Serialize,
    std::sync::Mutex,
};

/// A chat that has messaged the bot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub chat_id: i64,
    #[serde(rename = "firstName")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// In-memory list of contacts, oldest first. Lost on restart.
#[derive(Default)]
pub struct ContactBook {
    contacts: Mutex<Vec<Contact>>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh a contact. Returns true when the chat is new.
    pub fn record(&self, contact: Contact) -> bool {
        let mut contacts = self.contacts.lock().unwrap_or_else(|e| e.into_inner());
        match contacts.iter_mut().find(|c| c.chat_id == contact.chat_id) {
            Some(existing) => {
                *existing = contact;
                false
            }
            None => {
                contacts.push(contact);
                true
            }
        }
    }

    pub fn record_message(&self, message: &Message) -> bool {
        let username = message
            .from
            .as_ref()
            .and_then(|user| user.username.clone())
            .or_else(|| message.chat.username.clone());
        self.record(Contact {
            chat_id: message.chat.id,
            name: message.sender_name(),
            username,
        })
    }

    pub fn list(&self) -> Vec<Contact> {
        self.contacts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(chat_id: i64, name: &str) -> Contact {
        Contact {
            chat_id,
            name: name.to_string(),
            username: None,
        }
    }

    #[test]
    fn test_record_keeps_first_seen_order() {
        let book = ContactBook::new();
        assert!(book.record(contact(2, "Bob")));
        assert!(book.record(contact(1, "Alice")));
        let ids: Vec<i64> = book.list().iter().map(|c| c.chat_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_record_refreshes_existing() {
        let book = ContactBook::new();
        book.record(contact(1, "Alice"));
        assert!(!book.record(contact(1, "Alice B")));
        assert_eq!(book.list(), vec![contact(1, "Alice B")]);
    }

    #[test]
    fn test_contact_serializes_for_the_web_ui() {
        let json = serde_json::to_string(&contact(7, "Carol")).unwrap();
        assert_eq!(json, r#"{"chatId":7,"firstName":"Carol"}"#);
    }
}

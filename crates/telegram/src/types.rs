use serde::{Deserialize, Serialize};

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

impl Message {
    /// Trimmed text, `None` for non-text or blank messages.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn sender_name(&self) -> String {
        match &self.from {
            Some(user) => user.display_name(),
            None => self.chat.display_name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
}

impl Chat {
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// A press on an inline keyboard button.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl CallbackQuery {
    /// Chat the button was pressed in; private chats share the user's id.
    pub fn chat_id(&self) -> i64 {
        self.message
            .as_ref()
            .map(|message| message.chat.id)
            .unwrap_or(self.from.id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// Lay `buttons` out in rows of `per_row`.
    pub fn grid(buttons: Vec<InlineKeyboardButton>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let mut inline_keyboard = Vec::new();
        let mut row = Vec::new();
        for button in buttons {
            row.push(button);
            if row.len() == per_row {
                inline_keyboard.push(std::mem::take(&mut row));
            }
        }
        if !row.is_empty() {
            inline_keyboard.push(row);
        }
        Self { inline_keyboard }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookInfo {
    #[serde(default)]
    pub url: String,
}

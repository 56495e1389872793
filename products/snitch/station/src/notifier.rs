use {
    alert::{Alert, Notifier, NotifyError},
    futures_util::future::BoxFuture,
    guardian::Guardian,
    std::sync::Arc,
    telegram::{Bot, InlineKeyboardButton, InlineKeyboardMarkup},
};

const BUTTONS_PER_ROW: usize = 2;

/// Inline keyboard offering the alert's options.
pub fn alert_keyboard(alert: &Alert) -> InlineKeyboardMarkup {
    let buttons = alert
        .options
        .iter()
        .map(|option| InlineKeyboardButton::new(option.label.clone(), option.action.payload()))
        .collect();
    InlineKeyboardMarkup::grid(buttons, BUTTONS_PER_ROW)
}

/// Sends alerts as Telegram messages with an inline keyboard.
pub struct TelegramNotifier {
    bot: Arc<Bot>,
}

impl TelegramNotifier {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self { bot }
    }
}

impl Notifier for TelegramNotifier {
    fn notify<'a>(
        &'a self,
        guardian: &'a Guardian,
        alert: &'a Alert,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async move {
            let keyboard = alert_keyboard(alert);
            self.bot
                .send_message(guardian.chat_id, &alert.text, Some(&keyboard))
                .await
                .map(|_| ())
                .map_err(|error| NotifyError::Delivery(Box::new(error)))
        })
    }
}

/// Stand-in when no bot token is configured; every delivery fails.
pub struct UnavailableNotifier;

impl Notifier for UnavailableNotifier {
    fn notify<'a>(
        &'a self,
        _guardian: &'a Guardian,
        _alert: &'a Alert,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async { Err(NotifyError::Unavailable) })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alert::AlertAction, std::time::Duration};

    #[test]
    fn test_keyboard_rows() {
        let alert = Alert::new("Sam", Duration::from_secs(15));
        let keyboard = alert_keyboard(&alert);
        // eight voices plus the roast button
        assert_eq!(keyboard.inline_keyboard.len(), 5);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        let last = &keyboard.inline_keyboard[4];
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].callback_data, AlertAction::Roast.payload());
    }
}

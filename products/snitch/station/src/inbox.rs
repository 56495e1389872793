use {
    alert::{AlertAction, AlertManager, ReplyOutcome},
    base::log,
    speak::Voice,
    std::{sync::Arc, time::Duration},
    telegram::{Bot, CallbackQuery, ContactBook, Message, Poller, Update},
    tokio::time::MissedTickBehavior,
};

/// Routes everything the bot receives: greetings, guardian replies and button presses.
#[derive(Clone)]
pub struct Inbox {
    bot: Arc<Bot>,
    alerts: AlertManager,
    contacts: Arc<ContactBook>,
}

fn is_start_command(text: &str) -> bool {
    text == "/start" || text.starts_with("/start ") || text.starts_with("/start@")
}

pub fn greeting(name: &str, chat_id: i64) -> String {
    format!(
        "Hi {}! I'm the posture snitch. Your chat id is {}. Ask your friend to add you as a guardian \
         and I'll tell you whenever they slouch.",
        name, chat_id
    )
}

impl Inbox {
    pub fn new(bot: Arc<Bot>, alerts: AlertManager, contacts: Arc<ContactBook>) -> Self {
        Self {
            bot,
            alerts,
            contacts,
        }
    }

    /// Poll the bot every `interval` forever, handling each batch in order.
    pub async fn run(self, mut poller: Poller, interval: Duration) {
        self.bot.prepare_polling().await;
        log::info!("polling for bot updates every {:?}", interval);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            for update in poller.next_batch().await {
                self.handle_update(update).await;
            }
        }
    }

    pub async fn handle_update(&self, update: Update) {
        if let Some(message) = update.message {
            self.handle_message(message).await;
        }
        if let Some(query) = update.callback_query {
            self.handle_callback(query).await;
        }
    }

    async fn handle_message(&self, message: Message) {
        let chat_id = message.chat.id;
        if self.contacts.record_message(&message) {
            log::info!("new contact {} ({})", message.sender_name(), chat_id);
        }
        let Some(text) = message.text() else {
            log::debug!("ignoring non-text message from {}", chat_id);
            return;
        };

        if is_start_command(text) {
            let reply = greeting(&message.sender_name(), chat_id);
            if let Err(error) = self.bot.send_message(chat_id, &reply, None).await {
                log::warn!("failed to greet {}: {}", chat_id, error);
            }
            return;
        }
        if text.starts_with('/') {
            log::debug!("ignoring command {:?} from {}", text, chat_id);
            return;
        }

        match self.alerts.handle_reply(chat_id, text) {
            ReplyOutcome::Recorded { .. } | ReplyOutcome::Relayed => {}
            outcome => log::info!("message from {} not used: {:?}", chat_id, outcome),
        }
    }

    async fn handle_callback(&self, query: CallbackQuery) {
        let chat_id = query.chat_id();
        let action = query.data.as_deref().and_then(AlertAction::parse);
        let toast = match &action {
            Some(AlertAction::Voice(voice_id)) => {
                if self.alerts.choose_voice(chat_id, voice_id) {
                    let name = Voice::by_id(voice_id).map(|voice| voice.name).unwrap_or("that voice");
                    format!("{} will read your reply", name)
                } else {
                    "There is no alert waiting for you".to_string()
                }
            }
            Some(AlertAction::Roast) => "Writing a roast...".to_string(),
            None => "Unknown button".to_string(),
        };
        if let Err(error) = self.bot.answer_callback_query(&query.id, Some(&toast)).await {
            log::warn!("failed to answer button press from {}: {}", chat_id, error);
        }

        if action == Some(AlertAction::Roast) {
            // generation can take a while; keep polling meanwhile
            let alerts = self.alerts.clone();
            tokio::spawn(async move {
                let outcome = alerts.handle_roast(chat_id).await;
                log::info!("roast requested by {}: {:?}", chat_id, outcome);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("/start hello"));
        assert!(is_start_command("/start@snitch_bot"));
        assert!(!is_start_command("/started"));
        assert!(!is_start_command("start"));
    }

    #[test]
    fn test_greeting_names_chat() {
        let text = greeting("Alice", -1001);
        assert!(text.starts_with("Hi Alice!"));
        assert!(text.contains("-1001"));
    }
}

use {speak::Voice, std::time::Duration};

const VOICE_PREFIX: &str = "voice:";
const ROAST: &str = "roast";

/// What a guardian can do with an alert besides typing a reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlertAction {
    /// Pick the voice that speaks this guardian's response.
    Voice(String),
    /// Have a roast generated instead of typing one.
    Roast,
}

impl AlertAction {
    /// Parse the payload of a pressed button.
    pub fn parse(data: &str) -> Option<Self> {
        let data = data.trim();
        if data == ROAST {
            return Some(AlertAction::Roast);
        }
        data.strip_prefix(VOICE_PREFIX)
            .filter(|id| !id.is_empty())
            .map(|id| AlertAction::Voice(id.to_string()))
    }

    /// Payload to attach to a button; `parse` reverses it.
    pub fn payload(&self) -> String {
        match self {
            AlertAction::Voice(id) => format!("{}{}", VOICE_PREFIX, id),
            AlertAction::Roast => ROAST.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertOption {
    pub label: String,
    pub action: AlertAction,
}

/// The message sent to every guardian when a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub text: String,
    pub options: Vec<AlertOption>,
}

impl Alert {
    /// Alert about `user_name`, offering every catalog voice and a roast button.
    pub fn new(user_name: &str, reply_window: Duration) -> Self {
        let text = format!(
            "{} is slouching right now! Reply within {} seconds and your message gets read out loud. \
             Pick a voice first if you like, or let me roast them for you.",
            user_name,
            reply_window.as_secs()
        );
        let mut options: Vec<AlertOption> = speak::VOICES
            .iter()
            .map(|voice: &Voice| AlertOption {
                label: voice.name.to_string(),
                action: AlertAction::Voice(voice.id.to_string()),
            })
            .collect();
        options.push(AlertOption {
            label: "Roast them".to_string(),
            action: AlertAction::Roast,
        });
        Self { text, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payloads() {
        assert_eq!(AlertAction::parse("roast"), Some(AlertAction::Roast));
        assert_eq!(
            AlertAction::parse("voice:K8nDX2f6wjv6bCh5UeZi"),
            Some(AlertAction::Voice("K8nDX2f6wjv6bCh5UeZi".to_string()))
        );
        assert_eq!(AlertAction::parse("voice:"), None);
        assert_eq!(AlertAction::parse("dance"), None);
    }

    #[test]
    fn test_payload_parses_back() {
        for option in Alert::new("Sam", Duration::from_secs(15)).options {
            assert_eq!(AlertAction::parse(&option.action.payload()), Some(option.action));
        }
    }

    #[test]
    fn test_alert_offers_every_voice_and_roast() {
        let alert = Alert::new("Sam", Duration::from_secs(15));
        assert!(alert.text.starts_with("Sam is slouching"));
        assert!(alert.text.contains("15 seconds"));
        assert_eq!(alert.options.len(), speak::VOICES.len() + 1);
        assert_eq!(alert.options.last().unwrap().action, AlertAction::Roast);
    }
}

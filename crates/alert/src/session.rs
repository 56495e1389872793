use {
    crate::ReplyOutcome,
    guardian::Guardian,
    std::collections::HashMap,
    tokio::task::JoinHandle,
};

/// What one guardian said, and which voice should say it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GuardianResponse {
    pub chat_id: i64,
    pub name: String,
    pub text: String,
    pub voice_id: Option<String>,
}

/// State of one alert, from fan-out until it resolves.
pub(crate) struct Session {
    pub token: u64,
    pub guardians: Vec<Guardian>,
    pub responses: Vec<GuardianResponse>,
    pub default_voice: Option<String>,
    pub voice_choices: HashMap<i64, String>,
    pub insult_cancelled: bool,
    pub primary_timer: Option<JoinHandle<()>>,
    pub collection_timer: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(token: u64, guardians: Vec<Guardian>, default_voice: Option<String>) -> Self {
        Self {
            token,
            guardians,
            responses: Vec::new(),
            default_voice,
            voice_choices: HashMap::new(),
            insult_cancelled: false,
            primary_timer: None,
            collection_timer: None,
        }
    }

    pub fn guardian(&self, chat_id: i64) -> Option<&Guardian> {
        self.guardians.iter().find(|g| g.chat_id == chat_id)
    }

    pub fn has_responded(&self, chat_id: i64) -> bool {
        self.responses.iter().any(|r| r.chat_id == chat_id)
    }

    /// Check that `chat_id` may still respond in this session.
    pub fn admit(&self, chat_id: i64) -> Result<&Guardian, ReplyOutcome> {
        let guardian = self.guardian(chat_id).ok_or(ReplyOutcome::NotAGuardian)?;
        if self.has_responded(chat_id) {
            return Err(ReplyOutcome::AlreadyResponded);
        }
        Ok(guardian)
    }

    /// Voice for `chat_id`: its own choice, else the session default.
    pub fn voice_for(&self, chat_id: i64) -> Option<String> {
        self.voice_choices
            .get(&chat_id)
            .cloned()
            .or_else(|| self.default_voice.clone())
    }

    /// Stop the fallback path for good.
    pub fn cancel_insult(&mut self) {
        self.insult_cancelled = true;
        if let Some(timer) = self.primary_timer.take() {
            timer.abort();
        }
    }

    /// Record a response from an admitted guardian. Returns the number of responses so far.
    pub fn record(&mut self, chat_id: i64, text: String, voice_id: Option<String>) -> Result<usize, ReplyOutcome> {
        let name = self.admit(chat_id)?.name.clone();
        self.responses.push(GuardianResponse {
            chat_id,
            name,
            text,
            voice_id,
        });
        self.cancel_insult();
        Ok(self.responses.len())
    }

    /// Replace the collection timer, aborting the previous one.
    pub fn rearm_collection(&mut self, timer: JoinHandle<()>) {
        if let Some(previous) = self.collection_timer.replace(timer) {
            previous.abort();
        }
    }

    pub fn cancel_timers(&mut self) {
        for timer in [self.primary_timer.take(), self.collection_timer.take()]
            .into_iter()
            .flatten()
        {
            timer.abort();
        }
    }

    /// Collated lines, one per response, in the order the responses arrived.
    pub fn collate(&self) -> Vec<(String, Option<String>)> {
        self.responses
            .iter()
            .map(|response| {
                (
                    format!("{} says {}", response.name, response.text),
                    response
                        .voice_id
                        .clone()
                        .or_else(|| self.default_voice.clone()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            1,
            vec![Guardian::new(10, "Mum"), Guardian::new(20, "Dad")],
            Some("default-voice".to_string()),
        )
    }

    #[test]
    fn test_record_is_unique_per_guardian() {
        let mut session = session();
        assert_eq!(session.record(10, "sit up".to_string(), None), Ok(1));
        assert_eq!(
            session.record(10, "again".to_string(), None),
            Err(ReplyOutcome::AlreadyResponded)
        );
        assert_eq!(
            session.record(30, "stranger".to_string(), None),
            Err(ReplyOutcome::NotAGuardian)
        );
        assert_eq!(session.responses.len(), 1);
        assert!(session.insult_cancelled);
    }

    #[test]
    fn test_voice_choice_overrides_default() {
        let mut session = session();
        session.voice_choices.insert(20, "dad-voice".to_string());
        assert_eq!(session.voice_for(20).as_deref(), Some("dad-voice"));
        assert_eq!(session.voice_for(10).as_deref(), Some("default-voice"));
    }

    #[test]
    fn test_collate_formats_lines() {
        let mut session = session();
        session.record(20, "back straight".to_string(), Some("v2".to_string())).unwrap();
        session.record(10, "sit up".to_string(), None).unwrap();
        assert_eq!(
            session.collate(),
            vec![
                ("Dad says back straight".to_string(), Some("v2".to_string())),
                ("Mum says sit up".to_string(), Some("default-voice".to_string())),
            ]
        );
    }
}

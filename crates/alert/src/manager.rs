use {
    crate::{
        Alert, AlertConfig, AudioEvent, InsultSource, Notifier, PlaybackQueue, session::Session,
    },
    base::{Generation, log},
    futures_util::future::join_all,
    guardian::{DEFAULT_USER_ID, GuardianStore},
    serde::{Deserialize, Serialize},
    speak::{Insult, Voice},
    std::sync::{Arc, Mutex, MutexGuard},
    tokio::task::JoinHandle,
};

const DEFAULT_USER_NAME: &str = "Your friend";

/// A confirmed slouch, as reported by a monitor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl TriggerRequest {
    fn user_id(&self) -> &str {
        non_empty(self.user_id.as_deref()).unwrap_or(DEFAULT_USER_ID)
    }

    fn user_name(&self) -> &str {
        non_empty(self.user_name.as_deref()).unwrap_or(DEFAULT_USER_NAME)
    }

    fn voice_id(&self) -> Option<&str> {
        non_empty(self.voice_id.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TriggerOutcome {
    /// Nobody to tell; the fallback insult was queued right away.
    Insulted { insult: Insult },
    /// A session was started and the alert fanned out.
    Notified {
        token: u64,
        guardians: usize,
        delivered: usize,
    },
}

/// What became of a guardian's reply or roast request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Stored as the guardian's response; `responses` counts all responses so far.
    Recorded { responses: usize },
    /// No session was running, so the text was queued for playback as is.
    Relayed,
    NoSession,
    NotAGuardian,
    AlreadyResponded,
    Empty,
    /// The session ended while the roast was being written.
    Superseded,
}

struct Inner {
    store: Arc<dyn GuardianStore>,
    notifier: Arc<dyn Notifier>,
    insults: Arc<dyn InsultSource>,
    playback: Arc<PlaybackQueue>,
    config: AlertConfig,
    generation: Generation,
    session: Mutex<Option<Session>>,
}

/// Owner of the single active alert session.
///
/// Cheap to clone; clones share the session. The session lock is never held across an await.
#[derive(Clone)]
pub struct AlertManager {
    inner: Arc<Inner>,
}

impl AlertManager {
    pub fn new(
        store: Arc<dyn GuardianStore>,
        notifier: Arc<dyn Notifier>,
        insults: Arc<dyn InsultSource>,
        playback: Arc<PlaybackQueue>,
        config: AlertConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                notifier,
                insults,
                playback,
                config,
                generation: Generation::new(),
                session: Mutex::new(None),
            }),
        }
    }

    pub fn playback(&self) -> &Arc<PlaybackQueue> {
        &self.inner.playback
    }

    pub fn config(&self) -> &AlertConfig {
        &self.inner.config
    }

    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    pub fn has_active_session(&self) -> bool {
        self.session().is_some()
    }

    /// Token of the running session, if any.
    pub fn active_token(&self) -> Option<u64> {
        self.session().as_ref().map(|session| session.token)
    }

    /// Start a session for a confirmed slouch.
    ///
    /// Without enabled guardians no session is created and the fallback insult is queued
    /// immediately. Otherwise the new session replaces any running one, the primary timer
    /// is armed and the alert goes out to every guardian concurrently.
    pub async fn trigger(&self, request: TriggerRequest) -> TriggerOutcome {
        let user_id = request.user_id();
        let guardians = match self.inner.store.enabled(user_id) {
            Ok(guardians) => guardians,
            Err(error) => {
                log::error!("failed to load guardians of {}: {}", user_id, error);
                Vec::new()
            }
        };

        if guardians.is_empty() {
            log::info!("{} has no enabled guardians, insulting right away", user_id);
            let insult = self.inner.insults.insult(request.voice_id()).await;
            self.inner.playback.push(AudioEvent::insult(&insult));
            return TriggerOutcome::Insulted { insult };
        }

        let token = self.inner.generation.advance();
        {
            let mut session = Session::new(
                token,
                guardians.clone(),
                request.voice_id().map(str::to_string),
            );
            session.primary_timer = Some(self.arm_primary(token));
            let mut slot = self.session();
            if let Some(mut previous) = slot.replace(session) {
                log::info!("session {} superseded by {}", previous.token, token);
                previous.cancel_timers();
            }
        }
        log::info!(
            "session {} started for {}, alerting {} guardians",
            token,
            user_id,
            guardians.len()
        );

        let alert = Alert::new(request.user_name(), self.inner.config.primary_timeout());
        let deliveries = guardians.iter().map(|guardian| {
            let alert = &alert;
            async move { (guardian, self.inner.notifier.notify(guardian, alert).await) }
        });
        let mut delivered = 0;
        for (guardian, result) in join_all(deliveries).await {
            match result {
                Ok(()) => delivered += 1,
                Err(error) => log::warn!(
                    "failed to alert {} ({}): {}",
                    guardian.name,
                    guardian.chat_id,
                    error
                ),
            }
        }

        TriggerOutcome::Notified {
            token,
            guardians: guardians.len(),
            delivered,
        }
    }

    /// Take a text message from `chat_id`.
    ///
    /// While a session runs, only guardians of its snapshot without a response yet are
    /// heard. With no session running the text is queued for playback directly.
    pub fn handle_reply(&self, chat_id: i64, text: &str) -> ReplyOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ReplyOutcome::Empty;
        }

        let mut slot = self.session();
        if slot.is_none() {
            drop(slot);
            log::info!("reply from {} outside a session, relaying it", chat_id);
            self.inner.playback.push(AudioEvent::reply(text, None));
            return ReplyOutcome::Relayed;
        }
        let Some(session) = slot.as_mut() else {
            return ReplyOutcome::NoSession;
        };

        let token = session.token;
        let voice_id = session.voice_choices.get(&chat_id).cloned();
        match session.record(chat_id, text.to_string(), voice_id) {
            Ok(responses) => {
                log::info!("session {}: response {} from {}", token, responses, chat_id);
                session.rearm_collection(self.arm_collection(token));
                ReplyOutcome::Recorded { responses }
            }
            Err(outcome) => {
                log::debug!("session {}: reply from {} ignored ({:?})", token, chat_id, outcome);
                outcome
            }
        }
    }

    /// Let a guardian pick the voice of their response. Unknown voices are refused.
    pub fn choose_voice(&self, chat_id: i64, voice_id: &str) -> bool {
        let Some(voice) = Voice::by_id(voice_id) else {
            log::warn!("{} picked unknown voice {}", chat_id, voice_id);
            return false;
        };
        let mut slot = self.session();
        match slot.as_mut() {
            Some(session) if session.guardian(chat_id).is_some() => {
                log::info!("session {}: {} picked {}", session.token, chat_id, voice);
                session.voice_choices.insert(chat_id, voice.id.to_string());
                true
            }
            _ => false,
        }
    }

    /// Record a generated roast as `chat_id`'s response.
    ///
    /// The fallback path is shut off before generation starts; the roast is only recorded
    /// if the same session is still running when it arrives.
    pub async fn handle_roast(&self, chat_id: i64) -> ReplyOutcome {
        let (token, voice_id) = {
            let mut slot = self.session();
            let Some(session) = slot.as_mut() else {
                return ReplyOutcome::NoSession;
            };
            if let Err(outcome) = session.admit(chat_id) {
                return outcome;
            }
            session.cancel_insult();
            (session.token, session.voice_for(chat_id))
        };

        let insult = self.inner.insults.insult(voice_id.as_deref()).await;

        let mut slot = self.session();
        let Some(session) = slot.as_mut().filter(|session| session.token == token) else {
            log::info!("session {} ended before the roast for {} arrived", token, chat_id);
            return ReplyOutcome::Superseded;
        };
        match session.record(chat_id, insult.text, Some(insult.voice_id)) {
            Ok(responses) => {
                log::info!("session {}: roast {} from {}", token, responses, chat_id);
                session.rearm_collection(self.arm_collection(token));
                ReplyOutcome::Recorded { responses }
            }
            Err(outcome) => outcome,
        }
    }

    /// Primary timer callback. Resolves with the fallback insult when nobody reacted.
    ///
    /// Returns true when this call resolved the session.
    pub async fn primary_elapsed(&self, token: u64) -> bool {
        let default_voice = {
            let mut slot = self.session();
            match slot.as_ref() {
                Some(session) if session.token == token => {
                    if session.insult_cancelled || !session.responses.is_empty() {
                        log::debug!("session {}: primary timeout after responses, ignoring", token);
                        return false;
                    }
                }
                _ => return false,
            }
            match slot.take() {
                Some(session) => session.default_voice,
                None => return false,
            }
        };

        log::info!("session {}: nobody answered, insulting", token);
        let insult = self.inner.insults.insult(default_voice.as_deref()).await;
        self.inner.playback.push(AudioEvent::insult(&insult));
        true
    }

    /// Collection timer callback. Queues every response and ends the session.
    ///
    /// Returns true when this call resolved the session.
    pub fn collection_elapsed(&self, token: u64) -> bool {
        let session = {
            let mut slot = self.session();
            if slot.as_ref().map(|session| session.token) != Some(token) {
                return false;
            }
            match slot.take() {
                Some(session) => session,
                None => return false,
            }
        };

        let lines = session.collate();
        log::info!("session {}: collated {} responses", token, lines.len());
        for (text, voice_id) in lines {
            self.inner.playback.push(AudioEvent::reply(text, voice_id));
        }
        true
    }

    fn arm_primary(&self, token: u64) -> JoinHandle<()> {
        let manager = self.clone();
        let delay = self.inner.config.primary_timeout();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            manager.primary_elapsed(token).await;
        })
    }

    fn arm_collection(&self, token: u64) -> JoinHandle<()> {
        let manager = self.clone();
        let delay = self.inner.config.collection_window();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            manager.collection_elapsed(token);
        })
    }
}

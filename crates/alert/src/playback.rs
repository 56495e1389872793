use {
    base::log,
    serde::{Deserialize, Serialize},
    speak::Insult,
    std::{collections::VecDeque, sync::Mutex},
};

/// Events beyond this are dropped oldest first, so an absent monitor cannot grow the queue forever.
const MAX_QUEUED: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioKind {
    Reply,
    Insult,
}

/// One line waiting to be spoken by the monitor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioEvent {
    pub kind: AudioKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl AudioEvent {
    pub fn reply(text: impl Into<String>, voice_id: Option<String>) -> Self {
        Self {
            kind: AudioKind::Reply,
            text: text.into(),
            voice_id,
        }
    }

    pub fn insult(insult: &Insult) -> Self {
        Self {
            kind: AudioKind::Insult,
            text: insult.text.clone(),
            voice_id: Some(insult.voice_id.clone()),
        }
    }
}

/// Drain-on-read queue of audio events.
#[derive(Default)]
pub struct PlaybackQueue {
    events: Mutex<VecDeque<AudioEvent>>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: AudioEvent) {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        if events.len() == MAX_QUEUED {
            if let Some(dropped) = events.pop_front() {
                log::warn!("playback queue full, dropping {:?}", dropped.text);
            }
        }
        log::info!("queued {:?} for playback", event.text);
        events.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<AudioEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let queue = PlaybackQueue::new();
        queue.push(AudioEvent::reply("Mum says sit up", None));
        queue.push(AudioEvent::reply("Dad says now", Some("v".to_string())));
        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "Mum says sit up");
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_oldest_events_are_dropped_when_full() {
        let queue = PlaybackQueue::new();
        for i in 0..MAX_QUEUED + 2 {
            queue.push(AudioEvent::reply(i.to_string(), None));
        }
        let events = queue.drain();
        assert_eq!(events.len(), MAX_QUEUED);
        assert_eq!(events[0].text, "2");
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&AudioEvent::reply("hi", None)).unwrap();
        assert_eq!(json, r#"{"kind":"reply","text":"hi"}"#);
        let json = serde_json::to_string(&AudioEvent::reply("hi", Some("abc".to_string()))).unwrap();
        assert_eq!(json, r#"{"kind":"reply","text":"hi","voiceId":"abc"}"#);
    }
}

use {crate::PostureState, base::log};

const DEFAULT_DURATION_MS: u64 = 2000;
const DEFAULT_COOLDOWN_MS: u64 = 30000;

/// Debouncer configuration.
#[derive(Clone, Debug)]
pub struct DebouncerConfig {
    duration_ms: u64,
    cooldown_ms: Option<u64>,
}

impl Default for DebouncerConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            cooldown_ms: Some(DEFAULT_COOLDOWN_MS),
        }
    }
}

impl DebouncerConfig {
    /// Set how long slouching has to last before it counts.
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the minimum spacing between triggers, `None` disables the cooldown.
    pub fn with_cooldown_ms(mut self, cooldown_ms: Option<u64>) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn cooldown_ms(&self) -> Option<u64> {
        self.cooldown_ms
    }
}

/// A confirmed slouch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlouchEvent {
    /// When the episode started.
    pub started_ms: u64,
    /// When the trigger fired.
    pub fired_ms: u64,
}

impl SlouchEvent {
    pub fn duration_ms(&self) -> u64 {
        self.fired_ms - self.started_ms
    }
}

/// Turns the per-frame state stream into at most one trigger per slouch episode.
///
/// Timestamps are milliseconds on any monotonic clock; the debouncer never reads a clock itself.
#[derive(Default)]
pub struct TriggerDebouncer {
    config: DebouncerConfig,
    episode_start: Option<u64>,
    fired: bool,
    last_trigger: Option<u64>,
}

impl TriggerDebouncer {
    pub fn new(config: DebouncerConfig) -> Self {
        Self {
            config,
            episode_start: None,
            fired: false,
            last_trigger: None,
        }
    }

    pub fn is_accumulating(&self) -> bool {
        self.episode_start.is_some() && !self.fired
    }

    pub fn last_trigger_ms(&self) -> Option<u64> {
        self.last_trigger
    }

    /// Feed one classification. Returns the event when this frame confirms the slouch.
    pub fn process(&mut self, state: PostureState, now_ms: u64) -> Option<SlouchEvent> {
        match state {
            PostureState::Slouching => {
                let Some(started_ms) = self.episode_start else {
                    self.episode_start = Some(now_ms);
                    return None;
                };
                if self.fired || now_ms.saturating_sub(started_ms) <= self.config.duration_ms {
                    return None;
                }
                if !self.cooled_down(now_ms) {
                    return None;
                }
                self.fired = true;
                self.last_trigger = Some(now_ms);
                log::info!(
                    "slouch confirmed after {} ms",
                    now_ms.saturating_sub(started_ms)
                );
                Some(SlouchEvent {
                    started_ms,
                    fired_ms: now_ms,
                })
            }
            PostureState::Upright => {
                self.episode_start = None;
                self.fired = false;
                None
            }
            PostureState::Unknown => None,
        }
    }

    fn cooled_down(&self, now_ms: u64) -> bool {
        match (self.config.cooldown_ms, self.last_trigger) {
            (Some(cooldown_ms), Some(last_ms)) => now_ms.saturating_sub(last_ms) > cooldown_ms,
            _ => true,
        }
    }
}

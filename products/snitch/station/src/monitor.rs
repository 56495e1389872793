use {
    base::log,
    posture::{
        DebouncerConfig, LandmarkFrame, PostureScorer, PostureState, ScorerConfig, SlouchEvent,
        TriggerDebouncer,
    },
    serde::Deserialize,
};

/// One line of pose source input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MonitorInput {
    Frame {
        #[serde(default, rename = "timestampMs")]
        timestamp_ms: Option<u64>,
        #[serde(default)]
        landmarks: Option<LandmarkFrame>,
    },
    /// Calibrate on the next frame that allows it.
    Calibrate,
}

impl MonitorInput {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Scorer and debouncer driven by the pose source.
pub struct PostureMonitor {
    scorer: PostureScorer,
    debouncer: TriggerDebouncer,
    calibrate_pending: bool,
    last_state: PostureState,
}

impl PostureMonitor {
    pub fn new(scorer: ScorerConfig, debouncer: DebouncerConfig) -> Self {
        Self {
            scorer: PostureScorer::new(scorer),
            debouncer: TriggerDebouncer::new(debouncer),
            calibrate_pending: false,
            last_state: PostureState::Unknown,
        }
    }

    pub fn baseline(&self) -> Option<f32> {
        self.scorer.baseline()
    }

    pub fn state(&self) -> PostureState {
        self.last_state
    }

    pub fn is_calibrate_pending(&self) -> bool {
        self.calibrate_pending
    }

    /// Feed one input. `now_ms` stands in for frames that carry no timestamp.
    ///
    /// A pending calibration consumes frames until one succeeds; those frames are not scored.
    pub fn handle(&mut self, input: MonitorInput, now_ms: u64) -> Option<SlouchEvent> {
        let (timestamp_ms, landmarks) = match input {
            MonitorInput::Calibrate => {
                log::info!("calibration requested");
                self.calibrate_pending = true;
                return None;
            }
            MonitorInput::Frame {
                timestamp_ms,
                landmarks,
            } => (timestamp_ms.unwrap_or(now_ms), landmarks),
        };

        if self.calibrate_pending {
            if self.scorer.calibrate(landmarks.as_ref()).is_some() {
                self.calibrate_pending = false;
            }
            return None;
        }

        let state = self.scorer.classify(landmarks.as_ref());
        if state != self.last_state {
            log::debug!("posture {} -> {}", self.last_state, state);
            self.last_state = state;
        }
        self.debouncer.process(state, timestamp_ms)
    }
}

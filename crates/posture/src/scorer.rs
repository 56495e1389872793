use {
    crate::{LandmarkFrame, LandmarkIndex},
    base::log,
    serde::{Deserialize, Serialize},
    std::fmt,
};

const DEFAULT_TOLERANCE: f32 = 0.15;

/// Per-frame posture classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureState {
    Unknown,
    Upright,
    Slouching,
}

impl fmt::Display for PostureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostureState::Unknown => write!(f, "unknown"),
            PostureState::Upright => write!(f, "upright"),
            PostureState::Slouching => write!(f, "slouching"),
        }
    }
}

/// Scorer configuration.
#[derive(Clone, Debug)]
pub struct ScorerConfig {
    tolerance: f32,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ScorerConfig {
    /// Set the fraction the ratio may drop below the baseline before counting as slouching.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }
}

struct Geometry {
    neck_length: f32,
    shoulder_width: f32,
}

impl Geometry {
    fn measure(frame: &LandmarkFrame) -> Option<Self> {
        if !frame.is_complete() {
            return None;
        }
        let nose = frame.get(LandmarkIndex::Nose)?.position();
        let left = frame.get(LandmarkIndex::LeftShoulder)?.position();
        let right = frame.get(LandmarkIndex::RightShoulder)?.position();
        Some(Self {
            neck_length: (left.midpoint(right).y - nose.y).abs(),
            shoulder_width: left.distance_to(right),
        })
    }

    fn ratio(&self) -> f32 {
        if self.shoulder_width == 0.0 {
            return 0.0;
        }
        self.neck_length / self.shoulder_width
    }
}

/// Neck length over shoulder width for `frame`.
///
/// Moving toward or away from the camera scales both terms equally, so the ratio only drops when
/// the head sinks relative to the shoulders. Returns `None` for frames that do not reach the
/// shoulders and `0.0` when both shoulders coincide.
pub fn posture_ratio(frame: &LandmarkFrame) -> Option<f32> {
    Geometry::measure(frame).map(|geometry| geometry.ratio())
}

/// Classifies frames against a calibrated upright baseline.
pub struct PostureScorer {
    config: ScorerConfig,
    baseline: Option<f32>,
}

impl Default for PostureScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

impl PostureScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            baseline: None,
        }
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    /// Capture the current frame as the upright reference.
    ///
    /// Returns the stored baseline. Absent or incomplete frames, frames whose shoulders
    /// coincide and frames giving a zero ratio leave the previous baseline untouched.
    pub fn calibrate(&mut self, frame: Option<&LandmarkFrame>) -> Option<f32> {
        let Some(frame) = frame else {
            log::warn!("calibration skipped: no landmarks in frame");
            return None;
        };
        let Some(geometry) = Geometry::measure(frame) else {
            log::warn!(
                "calibration skipped: frame has {} landmarks",
                frame.landmarks.len()
            );
            return None;
        };
        if geometry.shoulder_width == 0.0 {
            log::warn!("calibration skipped: shoulder width is zero");
            return None;
        }
        let ratio = geometry.ratio();
        if ratio == 0.0 {
            log::warn!("calibration skipped: nose level with the shoulders");
            return None;
        }
        self.baseline = Some(ratio);
        log::info!("calibrated, baseline ratio {:.3}", ratio);
        Some(ratio)
    }

    pub fn classify(&self, frame: Option<&LandmarkFrame>) -> PostureState {
        let (Some(baseline), Some(frame)) = (self.baseline, frame) else {
            return PostureState::Unknown;
        };
        let Some(ratio) = posture_ratio(frame) else {
            log::debug!("incomplete frame with {} landmarks", frame.landmarks.len());
            return PostureState::Unknown;
        };
        if ratio < baseline * (1.0 - self.config.tolerance) {
            PostureState::Slouching
        } else {
            PostureState::Upright
        }
    }
}

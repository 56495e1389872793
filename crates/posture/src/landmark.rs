use {
    base::Vec2,
    serde::{Deserialize, Serialize},
};

/// A frame must reach at least the right shoulder to be scored.
pub const REQUIRED_LANDMARK_COUNT: usize = 13;

/// A single body keypoint in normalized image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    /// Visibility score in [0.0, 1.0] as reported by the pose model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn position(&self) -> Vec2<f32> {
        Vec2::new(self.x, self.y)
    }
}

/// Indices the scorer reads, in the 33-point BlazePose topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
}

impl From<LandmarkIndex> for usize {
    fn from(index: LandmarkIndex) -> usize {
        index as usize
    }
}

/// All landmarks the pose model produced for one video frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a frame that only carries the three points the scorer reads; everything else sits at the origin.
    pub fn from_upper_body(nose: Vec2<f32>, left_shoulder: Vec2<f32>, right_shoulder: Vec2<f32>) -> Self {
        let mut landmarks = vec![Landmark::new(0.0, 0.0); REQUIRED_LANDMARK_COUNT];
        landmarks[usize::from(LandmarkIndex::Nose)] = Landmark::new(nose.x, nose.y);
        landmarks[usize::from(LandmarkIndex::LeftShoulder)] =
            Landmark::new(left_shoulder.x, left_shoulder.y);
        landmarks[usize::from(LandmarkIndex::RightShoulder)] =
            Landmark::new(right_shoulder.x, right_shoulder.y);
        Self { landmarks }
    }

    pub fn get(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.landmarks.get(usize::from(index))
    }

    /// Whether the frame reaches every landmark the scorer needs.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= REQUIRED_LANDMARK_COUNT
    }
}

pub mod landmark;
pub use landmark::{Landmark, LandmarkFrame, LandmarkIndex, REQUIRED_LANDMARK_COUNT};

pub mod scorer;
pub use scorer::{PostureScorer, PostureState, ScorerConfig, posture_ratio};

pub mod debouncer;
pub use debouncer::{DebouncerConfig, SlouchEvent, TriggerDebouncer};

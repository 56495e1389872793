//! Alert sessions: tell a user's guardians they are slouching, collect what
//! the guardians say back, and queue the result for playback.

pub mod config;
pub use config::AlertConfig;

pub mod error;
pub use error::NotifyError;

pub mod message;
pub use message::{Alert, AlertAction, AlertOption};

pub mod collaborators;
pub use collaborators::{InsultSource, Notifier};

pub mod playback;
pub use playback::{AudioEvent, AudioKind, PlaybackQueue};

mod session;

pub mod manager;
pub use manager::{AlertManager, ReplyOutcome, TriggerOutcome, TriggerRequest};

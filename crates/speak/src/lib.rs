pub mod error;
pub use error::SpeakError;

pub mod voice;
pub use voice::{FALLBACK_VOICE_ID, VOICES, Voice, VoiceInfo};

pub mod insult;
pub use insult::{FALLBACK_INSULT, Insult, InsultGenerator};

pub mod tts;
pub use tts::Synthesizer;

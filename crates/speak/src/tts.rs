use {
    crate::{FALLBACK_VOICE_ID, SpeakError, Voice},
    base::log,
    serde::Serialize,
    std::time::Duration,
};

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// Turns text into MPEG audio with the ElevenLabs API.
pub struct Synthesizer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl Synthesizer {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SpeakError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Synthesize `text` in `voice_id` (fallback voice when absent or unknown).
    ///
    /// If a specific voice fails, the request is retried once with the fallback voice.
    pub async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>, SpeakError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeakError::EmptyText);
        }
        let voice = voice_id.and_then(Voice::by_id).unwrap_or_else(Voice::fallback);

        match self.request(text, voice.id).await {
            Ok(audio) => Ok(audio),
            Err(error) if voice.id != FALLBACK_VOICE_ID => {
                log::warn!(
                    "synthesis with {} failed ({}), retrying with fallback voice",
                    voice,
                    error
                );
                self.request(text, FALLBACK_VOICE_ID).await
            }
            Err(error) => Err(error),
        }
    }

    async fn request(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeakError> {
        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);
        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&SynthesizeRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeakError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeakError::EmptyResponse);
        }
        log::debug!("synthesized {} bytes with voice {}", audio.len(), voice_id);
        Ok(audio.to_vec())
    }
}

use {
    crate::{SpeakError, Voice},
    base::log,
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

/// Said whenever no generated insult is available.
pub const FALLBACK_INSULT: &str = "Hey! Your posture looks like a question mark. Sit up straight!";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// A line to be spoken, with the voice that should speak it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insult {
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
}

impl Insult {
    pub fn new(text: impl Into<String>, voice: &Voice) -> Self {
        Self {
            text: text.into(),
            voice_id: voice.id.to_string(),
            voice_name: voice.name.to_string(),
        }
    }

    /// The hardcoded line, spoken by `voice`.
    pub fn fallback(voice: &Voice) -> Self {
        Self::new(FALLBACK_INSULT, voice)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Writes insults in a voice's style with the Gemini text API.
pub struct InsultGenerator {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl InsultGenerator {
    /// Without an API key every request degrades to [`FALLBACK_INSULT`].
    pub fn new(api_key: Option<String>) -> Result<Self, SpeakError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the generator at another API root (e.g. a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate an insult in the voice `voice_id` (random voice when absent or unknown).
    pub async fn generate(&self, voice_id: Option<&str>) -> Result<Insult, SpeakError> {
        let voice = Voice::resolve(voice_id);
        let text = self.complete(&voice.full_prompt()).await?;
        log::info!("generated insult in {}: {}", voice, text);
        Ok(Insult::new(text, voice))
    }

    /// Like [`InsultGenerator::generate`], but failures yield the fallback line.
    pub async fn generate_or_fallback(&self, voice_id: Option<&str>) -> Insult {
        let voice = Voice::resolve(voice_id);
        match self.complete(&voice.full_prompt()).await {
            Ok(text) => Insult::new(text, voice),
            Err(error) => {
                log::warn!("insult generation failed ({}), using fallback line", error);
                Insult::fallback(voice)
            }
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, SpeakError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SpeakError::MissingKey("GEMINI_API_KEY"))?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|error| error.error)
                .and_then(|error| error.message)
                .unwrap_or(body);
            return Err(SpeakError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or(SpeakError::EmptyResponse)
    }
}

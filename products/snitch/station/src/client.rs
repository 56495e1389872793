use {
    alert::{AudioEvent, TriggerRequest},
    serde::{Deserialize, Serialize},
    std::{fmt, time::Duration},
};

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Status(u16),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(err) => write!(f, "http error: {err}"),
            ClientError::Status(status) => write!(f, "server answered {status}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

#[derive(Deserialize)]
struct AudioEvents {
    events: Vec<AudioEvent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_id: Option<&'a str>,
}

/// Talks to the snitch server on behalf of a monitor.
pub struct SnitchClient {
    http: reqwest::Client,
    server_url: String,
}

impl SnitchClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            server_url: server_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path)
    }

    fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status(response.status().as_u16()))
        }
    }

    /// Report a confirmed slouch.
    pub async fn trigger(&self, request: &TriggerRequest) -> Result<serde_json::Value, ClientError> {
        let response = self.http.post(self.url("trigger")).json(request).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Take everything queued for playback.
    pub async fn audio_events(&self) -> Result<Vec<AudioEvent>, ClientError> {
        let response = self.http.get(self.url("audio-events")).send().await?;
        let events: AudioEvents = Self::check(response)?.json().await?;
        Ok(events.events)
    }

    /// Fetch MPEG audio for `text`.
    pub async fn speak(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .post(self.url("speak"))
            .json(&SpeakRequest { text, voice_id })
            .send()
            .await?;
        Ok(Self::check(response)?.bytes().await?.to_vec())
    }
}

/// Short human summary of a trigger response.
pub fn describe_outcome(outcome: &serde_json::Value) -> String {
    match outcome.get("outcome").and_then(|o| o.as_str()) {
        Some("insulted") => "nobody to tell, insulted directly".to_string(),
        Some("notified") => format!(
            "alerted {} of {} guardians",
            outcome.get("delivered").and_then(|d| d.as_u64()).unwrap_or(0),
            outcome.get("guardians").and_then(|g| g.as_u64()).unwrap_or(0),
        ),
        _ => format!("unexpected answer {}", outcome),
    }
}


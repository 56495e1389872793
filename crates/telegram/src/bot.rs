use {
    crate::{ApiResponse, InlineKeyboardMarkup, Message, TelegramError, Update, WebhookInfo},
    base::log,
    serde::{Serialize, de::DeserializeOwned},
    std::time::Duration,
};

const DEFAULT_API_ROOT: &str = "https://api.telegram.org";

// plain calls; getUpdates adds its long-poll timeout on top
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 2],
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct DeleteWebhook {
    drop_pending_updates: bool,
}

#[derive(Serialize)]
struct NoParams {}

/// Bot API client.
pub struct Bot {
    http: reqwest::Client,
    api_url: String,
}

impl Bot {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        Self::with_api_root(token, DEFAULT_API_ROOT)
    }

    /// Talk to a Bot API server at `api_root` instead of api.telegram.org.
    pub fn with_api_root(token: &str, api_root: &str) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_url: format!("{}/bot{}", api_root.trim_end_matches('/'), token),
        })
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, TelegramError> {
        let response = self
            .http
            .post(format!("{}/{}", self.api_url, method))
            .timeout(timeout)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let envelope: ApiResponse<T> = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if status == reqwest::StatusCode::CONFLICT => {
                return Err(TelegramError::Conflict);
            }
            Err(error) => return Err(error.into()),
        };
        if envelope.error_code == Some(409) {
            return Err(TelegramError::Conflict);
        }
        match (envelope.ok, envelope.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TelegramError::Api {
                code: envelope.error_code,
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("{} failed with {}", method, status)),
            }),
        }
    }

    fn short_timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    /// Fetch updates with `update_id >= offset`, waiting up to `timeout_secs` for the first one.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message", "callback_query"],
        };
        self.call(
            "getUpdates",
            &request,
            Duration::from_secs(timeout_secs + REQUEST_TIMEOUT_SECS),
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let message: Message = self
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id,
                    text,
                    reply_markup,
                },
                Self::short_timeout(),
            )
            .await?;
        log::debug!("sent message {} to {}", message.message_id, chat_id);
        Ok(message)
    }

    /// Acknowledge a button press, optionally showing `text` as a toast.
    pub async fn answer_callback_query(&self, id: &str, text: Option<&str>) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: id,
                    text,
                },
                Self::short_timeout(),
            )
            .await?;
        Ok(())
    }

    pub async fn webhook_info(&self) -> Result<WebhookInfo, TelegramError> {
        self.call("getWebhookInfo", &NoParams {}, Self::short_timeout())
            .await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "deleteWebhook",
                &DeleteWebhook {
                    drop_pending_updates,
                },
                Self::short_timeout(),
            )
            .await?;
        Ok(())
    }

    /// Remove a registered webhook so that `getUpdates` is allowed. Failures are logged, not returned.
    pub async fn prepare_polling(&self) {
        match self.webhook_info().await {
            Ok(info) if info.url.is_empty() => log::info!("no webhook registered, ready for polling"),
            Ok(info) => {
                log::info!("found active webhook {}, deleting it", info.url);
                match self.delete_webhook(true).await {
                    Ok(()) => log::info!("webhook deleted"),
                    Err(error) => log::warn!("failed to delete webhook: {}", error),
                }
            }
            Err(error) => log::warn!("failed to query webhook: {}", error),
        }
    }
}

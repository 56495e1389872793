use {
    alert::{AlertManager, TriggerRequest},
    base::log,
    com::{
        Handler, Request, Response, bytes_response, error_response, json_response, parse_json,
        path_segments, query_param,
    },
    futures_util::future::BoxFuture,
    guardian::{DEFAULT_USER_ID, Guardian, GuardianError, GuardianStore},
    http::{Method, StatusCode},
    serde::Deserialize,
    serde_json::json,
    speak::{SpeakError, Synthesizer, Voice},
    std::sync::Arc,
    telegram::ContactBook,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddFriend {
    user_id: Option<String>,
    chat_id: i64,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeakRequest {
    text: String,
    voice_id: Option<String>,
}

/// The server's HTTP API.
pub struct Routes {
    store: Arc<dyn GuardianStore>,
    alerts: AlertManager,
    contacts: Arc<ContactBook>,
    synthesizer: Option<Arc<Synthesizer>>,
}

fn user_id(request: &Request) -> String {
    query_param(request.uri(), "userId")
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

fn guardian_error(error: GuardianError) -> Response {
    let status = match error {
        GuardianError::AlreadyExists(_) => StatusCode::CONFLICT,
        GuardianError::NotFound(_) => StatusCode::NOT_FOUND,
        GuardianError::Io(_) | GuardianError::Json(_) => {
            log::error!("guardian store failed: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, &error.to_string())
}

fn parse_chat_id(segment: &str) -> Result<i64, Response> {
    segment
        .parse()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, &format!("invalid chat id {:?}", segment)))
}

impl Routes {
    pub fn new(
        store: Arc<dyn GuardianStore>,
        alerts: AlertManager,
        contacts: Arc<ContactBook>,
        synthesizer: Option<Arc<Synthesizer>>,
    ) -> Self {
        Self {
            store,
            alerts,
            contacts,
            synthesizer,
        }
    }

    async fn route(&self, request: Request) -> Response {
        let segments = path_segments(request.uri());
        match (request.method(), segments.as_slice()) {
            (&Method::GET, ["health"]) => json_response(
                StatusCode::OK,
                &json!({ "status": "ok", "activeSession": self.alerts.has_active_session() }),
            ),
            (&Method::POST, ["trigger"]) => self.trigger(&request).await,
            (&Method::GET, ["friends"]) => self.list_friends(&request),
            (&Method::POST, ["friends"]) => self.add_friend(&request),
            (&Method::DELETE, ["friends", chat_id]) => self.remove_friend(&request, chat_id),
            (&Method::PATCH, ["friends", chat_id, "toggle"]) => self.toggle_friend(&request, chat_id),
            (&Method::GET, ["contacts"]) => {
                json_response(StatusCode::OK, &json!({ "contacts": self.contacts.list() }))
            }
            (&Method::GET, ["audio-events"]) => json_response(
                StatusCode::OK,
                &json!({ "events": self.alerts.playback().drain() }),
            ),
            (&Method::GET, ["voices"]) => {
                json_response(StatusCode::OK, &json!({ "voices": Voice::all() }))
            }
            (&Method::POST, ["speak"]) => self.speak(&request).await,
            _ => error_response(
                StatusCode::NOT_FOUND,
                &format!("no route for {} {}", request.method(), request.uri().path()),
            ),
        }
    }

    async fn trigger(&self, request: &Request) -> Response {
        // an empty body is a trigger for the default user
        let trigger = if request.body().iter().all(u8::is_ascii_whitespace) {
            TriggerRequest::default()
        } else {
            match parse_json::<TriggerRequest>(request) {
                Ok(trigger) => trigger,
                Err(error) => return error_response(StatusCode::BAD_REQUEST, &error.to_string()),
            }
        };
        let outcome = self.alerts.trigger(trigger).await;
        json_response(StatusCode::OK, &outcome)
    }

    fn list_friends(&self, request: &Request) -> Response {
        match self.store.list(&user_id(request)) {
            Ok(friends) => json_response(StatusCode::OK, &json!({ "friends": friends })),
            Err(error) => guardian_error(error),
        }
    }

    fn add_friend(&self, request: &Request) -> Response {
        let body = match parse_json::<AddFriend>(request) {
            Ok(body) => body,
            Err(error) => return error_response(StatusCode::BAD_REQUEST, &error.to_string()),
        };
        let name = body.name.trim();
        if name.is_empty() {
            return error_response(StatusCode::BAD_REQUEST, "name must not be empty");
        }
        let user_id = body
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_USER_ID);
        match self.store.add(user_id, Guardian::new(body.chat_id, name)) {
            Ok(friend) => {
                log::info!("{} added guardian {} ({})", user_id, friend.name, friend.chat_id);
                json_response(StatusCode::CREATED, &json!({ "success": true, "friend": friend }))
            }
            Err(error) => guardian_error(error),
        }
    }

    fn remove_friend(&self, request: &Request, chat_id: &str) -> Response {
        let chat_id = match parse_chat_id(chat_id) {
            Ok(chat_id) => chat_id,
            Err(response) => return response,
        };
        match self.store.remove(&user_id(request), chat_id) {
            Ok(friend) => json_response(StatusCode::OK, &json!({ "success": true, "friend": friend })),
            Err(error) => guardian_error(error),
        }
    }

    fn toggle_friend(&self, request: &Request, chat_id: &str) -> Response {
        let chat_id = match parse_chat_id(chat_id) {
            Ok(chat_id) => chat_id,
            Err(response) => return response,
        };
        match self.store.toggle(&user_id(request), chat_id) {
            Ok(friend) => json_response(StatusCode::OK, &json!({ "success": true, "friend": friend })),
            Err(error) => guardian_error(error),
        }
    }

    async fn speak(&self, request: &Request) -> Response {
        let Some(synthesizer) = &self.synthesizer else {
            return error_response(StatusCode::SERVICE_UNAVAILABLE, "speech synthesis is not configured");
        };
        let body = match parse_json::<SpeakRequest>(request) {
            Ok(body) => body,
            Err(error) => return error_response(StatusCode::BAD_REQUEST, &error.to_string()),
        };
        match synthesizer.synthesize(&body.text, body.voice_id.as_deref()).await {
            Ok(audio) => bytes_response(StatusCode::OK, "audio/mpeg", audio),
            Err(SpeakError::EmptyText) => error_response(StatusCode::BAD_REQUEST, "text must not be empty"),
            Err(error) => {
                log::warn!("synthesis failed: {}", error);
                error_response(StatusCode::BAD_GATEWAY, &error.to_string())
            }
        }
    }
}

impl Handler for Routes {
    fn handle(&self, request: Request) -> BoxFuture<'_, Response> {
        Box::pin(self.route(request))
    }
}

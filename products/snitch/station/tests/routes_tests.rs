use {
    alert::{Alert, AlertConfig, AlertManager, InsultSource, Notifier, NotifyError, PlaybackQueue},
    com::HttpServer,
    futures_util::future::BoxFuture,
    guardian::{Guardian, GuardianStore, MemoryGuardianStore},
    reqwest::{Method, StatusCode},
    serde_json::{Value, json},
    snitch::Routes,
    speak::{Insult, Voice},
    std::sync::{Arc, Mutex},
    telegram::{Contact, ContactBook},
};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<i64>>,
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(&'a self, guardian: &'a Guardian, _alert: &'a Alert) -> BoxFuture<'a, Result<(), NotifyError>> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(guardian.chat_id);
            Ok(())
        })
    }
}

struct CannedInsults;

impl InsultSource for CannedInsults {
    fn insult<'a>(&'a self, voice_id: Option<&'a str>) -> BoxFuture<'a, Insult> {
        Box::pin(async move { Insult::new("sit up, shrimp", Voice::resolve(voice_id)) })
    }
}

struct TestServer {
    server: HttpServer,
    http: reqwest::Client,
    store: Arc<MemoryGuardianStore>,
    contacts: Arc<ContactBook>,
    notifier: Arc<RecordingNotifier>,
}

impl TestServer {
    async fn start() -> Self {
        let store = Arc::new(MemoryGuardianStore::new());
        let contacts = Arc::new(ContactBook::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let alerts = AlertManager::new(
            store.clone(),
            notifier.clone(),
            Arc::new(CannedInsults),
            Arc::new(PlaybackQueue::new()),
            AlertConfig::default(),
        );
        let routes = Arc::new(Routes::new(store.clone(), alerts, contacts.clone(), None));
        let server = HttpServer::bind("127.0.0.1:0", routes).await.unwrap();
        Self {
            server,
            http: reqwest::Client::new(),
            store,
            contacts,
            notifier,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.server.local_addr(), path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.unwrap();
        let status = response.status();
        let text = response.text().await.unwrap();
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_friend_lifecycle() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(
            Method::POST,
            "/friends",
            Some(json!({ "userId": "sam", "chatId": 100, "name": " Alice " })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["friend"], json!({ "chatId": 100, "name": "Alice", "enabled": true }));

    let (status, body) = server
        .send(
            Method::POST,
            "/friends",
            Some(json!({ "userId": "sam", "chatId": 100, "name": "Alice again" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("100"));

    let (status, body) = server.send(Method::GET, "/friends?userId=sam", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["friends"].as_array().unwrap().len(), 1);

    let (_, body) = server.send(Method::GET, "/friends", None).await;
    assert_eq!(body, json!({ "friends": [] }));

    let (status, body) = server
        .send(Method::PATCH, "/friends/100/toggle?userId=sam", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["friend"]["enabled"], json!(false));
    assert!(server.store.enabled("sam").unwrap().is_empty());

    let (status, _) = server.send(Method::DELETE, "/friends/100?userId=sam", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.send(Method::DELETE, "/friends/100?userId=sam", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.send(Method::DELETE, "/friends/alice?userId=sam", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trigger_without_guardians_insults_immediately() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(Method::POST, "/trigger", Some(json!({ "userId": "sam", "userName": "Sam" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!("insulted"));
    assert_eq!(body["insult"]["text"], json!("sit up, shrimp"));

    let (_, body) = server.send(Method::GET, "/audio-events", None).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["kind"], json!("insult"));
    assert_eq!(events[0]["text"], json!("sit up, shrimp"));

    let (_, body) = server.send(Method::GET, "/audio-events", None).await;
    assert_eq!(body, json!({ "events": [] }));
}

#[tokio::test]
async fn test_empty_trigger_uses_default_user() {
    let server = TestServer::start().await;
    server
        .store
        .add("default", Guardian::new(7, "Grandma"))
        .unwrap();

    let (status, body) = server.send(Method::POST, "/trigger", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], json!("notified"));
    assert_eq!(body["guardians"], json!(1));
    assert_eq!(body["delivered"], json!(1));
    assert_eq!(*server.notifier.sent.lock().unwrap(), vec![7]);

    let (_, body) = server.send(Method::GET, "/health", None).await;
    assert_eq!(body["activeSession"], json!(true));
}

#[tokio::test]
async fn test_contacts_and_voices() {
    let server = TestServer::start().await;
    server.contacts.record(Contact {
        chat_id: 42,
        name: "Bob".to_string(),
        username: None,
    });

    let (_, body) = server.send(Method::GET, "/contacts", None).await;
    assert_eq!(body, json!({ "contacts": [{ "chatId": 42, "firstName": "Bob" }] }));

    let (_, body) = server.send(Method::GET, "/voices", None).await;
    let voices = body["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 8);
    assert!(voices.iter().all(|voice| voice["id"].is_string()));
}

#[tokio::test]
async fn test_request_errors() {
    let server = TestServer::start().await;

    let (status, body) = server.send(Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let response = server
        .http
        .post(server.url("/friends"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = server
        .send(Method::POST, "/friends", Some(json!({ "chatId": 5, "name": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .send(Method::POST, "/speak", Some(json!({ "text": "hello" })))
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_preflight_is_open() {
    let server = TestServer::start().await;

    let response = server
        .http
        .request(Method::OPTIONS, server.url("/trigger"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

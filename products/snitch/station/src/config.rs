use {
    alert::AlertConfig,
    base::Secrets,
    posture::{DebouncerConfig, ScorerConfig},
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_DIR: &str = "data/friends";
pub const DEFAULT_SECRETS_PATH: &str = "config/secrets.env";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_PLAYBACK_DIR: &str = "data/playback";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Read an environment variable, treating blank values as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Server settings.
#[derive(Clone, Debug)]
pub struct SnitchConfig {
    addr: String,
    data_dir: PathBuf,
    secrets_path: PathBuf,
    log_dir: Option<PathBuf>,
    bot_poll_interval: Duration,
    alert: AlertConfig,
}

impl Default for SnitchConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            log_dir: None,
            bot_poll_interval: DEFAULT_POLL_INTERVAL,
            alert: AlertConfig::default(),
        }
    }
}

impl SnitchConfig {
    /// Defaults overridden by `SNITCH_ADDR`, `SNITCH_DATA_DIR`, `SNITCH_SECRETS` and `SNITCH_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(addr) = lookup("SNITCH_ADDR") {
            config = config.with_addr(addr);
        }
        if let Some(dir) = lookup("SNITCH_DATA_DIR") {
            config = config.with_data_dir(dir);
        }
        if let Some(path) = lookup("SNITCH_SECRETS") {
            config = config.with_secrets_path(path);
        }
        if let Some(dir) = lookup("SNITCH_LOG_DIR") {
            config = config.with_log_dir(dir);
        }
        config
    }

    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_path = path.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn with_bot_poll_interval(mut self, interval: Duration) -> Self {
        self.bot_poll_interval = interval;
        self
    }

    pub fn with_alert(mut self, alert: AlertConfig) -> Self {
        self.alert = alert;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn secrets_path(&self) -> &Path {
        &self.secrets_path
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn bot_poll_interval(&self) -> Duration {
        self.bot_poll_interval
    }

    pub fn alert(&self) -> &AlertConfig {
        &self.alert
    }
}

/// Gateway credentials. A missing one disables only its gateway.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

impl Credentials {
    pub fn from_secrets(secrets: &Secrets) -> Self {
        Self {
            bot_token: secrets.get("BOT_TOKEN"),
            gemini_api_key: secrets.get("GEMINI_API_KEY"),
            elevenlabs_api_key: secrets.get("ELEVENLABS_API_KEY"),
        }
    }
}

/// Monitor settings.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    server_url: String,
    user_id: Option<String>,
    user_name: Option<String>,
    voice_id: Option<String>,
    playback_dir: PathBuf,
    log_dir: Option<PathBuf>,
    audio_poll_interval: Duration,
    scorer: ScorerConfig,
    debouncer: DebouncerConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            user_id: None,
            user_name: None,
            voice_id: None,
            playback_dir: PathBuf::from(DEFAULT_PLAYBACK_DIR),
            log_dir: None,
            audio_poll_interval: DEFAULT_POLL_INTERVAL,
            scorer: ScorerConfig::default(),
            debouncer: DebouncerConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Defaults overridden by `SNITCH_SERVER_URL`, `SNITCH_USER_ID`, `SNITCH_USER_NAME`,
    /// `SNITCH_VOICE_ID`, `SNITCH_PLAYBACK_DIR` and `SNITCH_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("SNITCH_SERVER_URL") {
            config = config.with_server_url(url);
        }
        config.user_id = lookup("SNITCH_USER_ID");
        config.user_name = lookup("SNITCH_USER_NAME");
        config.voice_id = lookup("SNITCH_VOICE_ID");
        if let Some(dir) = lookup("SNITCH_PLAYBACK_DIR") {
            config = config.with_playback_dir(dir);
        }
        if let Some(dir) = lookup("SNITCH_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user(mut self, user_id: Option<String>, user_name: Option<String>) -> Self {
        self.user_id = user_id;
        self.user_name = user_name;
        self
    }

    pub fn with_voice_id(mut self, voice_id: Option<String>) -> Self {
        self.voice_id = voice_id;
        self
    }

    pub fn with_playback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.playback_dir = dir.into();
        self
    }

    pub fn with_audio_poll_interval(mut self, interval: Duration) -> Self {
        self.audio_poll_interval = interval;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_debouncer(mut self, debouncer: DebouncerConfig) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id.as_deref()
    }

    pub fn playback_dir(&self) -> &Path {
        &self.playback_dir
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    pub fn audio_poll_interval(&self) -> Duration {
        self.audio_poll_interval
    }

    pub fn scorer(&self) -> &ScorerConfig {
        &self.scorer
    }

    pub fn debouncer(&self) -> &DebouncerConfig {
        &self.debouncer
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_server_defaults() {
        let config = SnitchConfig::from_lookup(lookup(&[]));
        assert_eq!(config.addr(), DEFAULT_ADDR);
        assert_eq!(config.data_dir(), Path::new(DEFAULT_DATA_DIR));
        assert_eq!(config.log_dir(), None);
        assert_eq!(config.bot_poll_interval(), Duration::from_secs(2));
        assert_eq!(config.alert().primary_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_server_overrides() {
        let config = SnitchConfig::from_lookup(lookup(&[
            ("SNITCH_ADDR", "127.0.0.1:8080"),
            ("SNITCH_SECRETS", "/etc/snitch.env"),
            ("SNITCH_LOG_DIR", "logs"),
        ]));
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.secrets_path(), Path::new("/etc/snitch.env"));
        assert_eq!(config.log_dir(), Some(Path::new("logs")));
    }

    #[test]
    fn test_monitor_overrides() {
        let config = MonitorConfig::from_lookup(lookup(&[
            ("SNITCH_SERVER_URL", "http://desk:3000/"),
            ("SNITCH_USER_ID", "sam"),
            ("SNITCH_VOICE_ID", "yqZhXcy5spYR7Hhv17QY"),
        ]));
        assert_eq!(config.server_url(), "http://desk:3000");
        assert_eq!(config.user_id(), Some("sam"));
        assert_eq!(config.user_name(), None);
        assert_eq!(config.voice_id(), Some("yqZhXcy5spYR7Hhv17QY"));
        assert_eq!(config.debouncer().duration_ms(), 2000);
    }
}

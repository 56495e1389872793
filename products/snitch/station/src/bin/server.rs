use {
    alert::{AlertManager, InsultSource, Notifier, PlaybackQueue},
    base::{Secrets, log, log_fatal},
    com::HttpServer,
    guardian::{FileGuardianStore, GuardianStore},
    snitch::{Credentials, Inbox, Routes, SnitchConfig, TelegramNotifier, UnavailableNotifier},
    speak::{InsultGenerator, Synthesizer},
    std::sync::Arc,
    telegram::{Bot, ContactBook, Poller},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SnitchConfig::from_env();
    match config.log_dir() {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }

    let secrets = Secrets::load_or_default(config.secrets_path());
    let credentials = Credentials::from_secrets(&secrets);

    let store: Arc<dyn GuardianStore> = Arc::new(FileGuardianStore::open(config.data_dir())?);
    let playback = Arc::new(PlaybackQueue::new());
    let contacts = Arc::new(ContactBook::new());

    if credentials.gemini_api_key.is_none() {
        log::error!("GEMINI_API_KEY missing, every insult will be the fallback line");
    }
    let insults: Arc<dyn InsultSource> =
        Arc::new(InsultGenerator::new(credentials.gemini_api_key.clone())?);

    let synthesizer = match &credentials.elevenlabs_api_key {
        Some(key) => Some(Arc::new(Synthesizer::new(key.clone())?)),
        None => {
            log::error!("ELEVENLABS_API_KEY missing, speech synthesis disabled");
            None
        }
    };

    let bot = match &credentials.bot_token {
        Some(token) => match Bot::new(token) {
            Ok(bot) => Some(Arc::new(bot)),
            Err(error) => {
                log::error!("failed to create bot: {}", error);
                None
            }
        },
        None => {
            log::error!("BOT_TOKEN missing, guardians cannot be alerted");
            None
        }
    };

    let notifier: Arc<dyn Notifier> = match &bot {
        Some(bot) => Arc::new(TelegramNotifier::new(bot.clone())),
        None => Arc::new(UnavailableNotifier),
    };
    let alerts = AlertManager::new(
        store.clone(),
        notifier,
        insults,
        playback,
        config.alert().clone(),
    );

    if let Some(bot) = &bot {
        let inbox = Inbox::new(bot.clone(), alerts.clone(), contacts.clone());
        let poller = Poller::new(bot.clone());
        tokio::spawn(inbox.run(poller, config.bot_poll_interval()));
    }

    let routes = Arc::new(Routes::new(store, alerts, contacts, synthesizer));
    let server = match HttpServer::bind(config.addr(), routes).await {
        Ok(server) => server,
        Err(error) => log_fatal!("unable to bind {}: {}", config.addr(), error),
    };
    log::info!("snitch listening on {}", server.local_addr());

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    Ok(())
}

use {
    alert::{AudioEvent, AudioKind, TriggerRequest},
    base::log,
    snitch::{MonitorConfig, MonitorInput, PostureMonitor, SnitchClient, describe_outcome},
    std::{
        path::{Path, PathBuf},
        sync::Arc,
        time::{Instant, SystemTime, UNIX_EPOCH},
    },
    tokio::{
        io::{AsyncBufReadExt, BufReader},
        time::MissedTickBehavior,
    },
};

fn playback_path(dir: &Path, event: &AudioEvent, sequence: u64) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let kind = match event.kind {
        AudioKind::Reply => "reply",
        AudioKind::Insult => "insult",
    };
    dir.join(format!("{}-{:03}-{}.mp3", millis, sequence, kind))
}

async fn play_audio_events(client: Arc<SnitchClient>, config: MonitorConfig) {
    if let Err(error) = tokio::fs::create_dir_all(config.playback_dir()).await {
        log::error!(
            "cannot create playback directory {}: {}",
            config.playback_dir().display(),
            error
        );
        return;
    }

    let mut interval = tokio::time::interval(config.audio_poll_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut sequence = 0u64;
    loop {
        interval.tick().await;
        let events = match client.audio_events().await {
            Ok(events) => events,
            Err(error) => {
                log::debug!("audio poll failed: {}", error);
                continue;
            }
        };
        for event in events {
            log::info!("{:?}: {}", event.kind, event.text);
            let audio = match client.speak(&event.text, event.voice_id.as_deref()).await {
                Ok(audio) => audio,
                Err(error) => {
                    log::warn!("no audio for {:?}: {}", event.text, error);
                    continue;
                }
            };
            sequence += 1;
            let path = playback_path(config.playback_dir(), &event, sequence);
            match tokio::fs::write(&path, audio).await {
                Ok(()) => log::info!("saved {}", path.display()),
                Err(error) => log::warn!("failed to write {}: {}", path.display(), error),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = MonitorConfig::from_env();
    match config.log_dir() {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stdout_logger(),
    }

    let client = Arc::new(SnitchClient::new(config.server_url())?);
    tokio::spawn(play_audio_events(client.clone(), config.clone()));

    let request = TriggerRequest {
        user_id: config.user_id().map(str::to_string),
        user_name: config.user_name().map(str::to_string),
        voice_id: config.voice_id().map(str::to_string),
    };
    let mut monitor = PostureMonitor::new(config.scorer().clone(), config.debouncer().clone());
    let started = Instant::now();

    log::info!("reading pose frames from stdin, reporting to {}", config.server_url());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let input = match MonitorInput::parse_line(line) {
            Ok(input) => input,
            Err(error) => {
                log::warn!("skipping malformed input: {}", error);
                continue;
            }
        };
        let now_ms = started.elapsed().as_millis() as u64;
        if let Some(event) = monitor.handle(input, now_ms) {
            log::info!("slouching for {} ms, snitching", event.duration_ms());
            let client = client.clone();
            let request = request.clone();
            tokio::spawn(async move {
                match client.trigger(&request).await {
                    Ok(outcome) => log::info!("{}", describe_outcome(&outcome)),
                    Err(error) => log::error!("trigger failed: {}", error),
                }
            });
        }
    }

    log::info!("pose source closed");
    Ok(())
}

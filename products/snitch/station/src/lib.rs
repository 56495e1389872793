pub mod config;
pub use config::{Credentials, MonitorConfig, SnitchConfig};

pub mod notifier;
pub use notifier::{TelegramNotifier, UnavailableNotifier, alert_keyboard};

pub mod inbox;
pub use inbox::Inbox;

pub mod routes;
pub use routes::Routes;

pub mod client;
pub use client::{ClientError, SnitchClient, describe_outcome};

pub mod monitor;
pub use monitor::{MonitorInput, PostureMonitor};

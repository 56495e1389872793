//! Telegram Bot API client for talking to guardians.

pub mod error;
pub use error::TelegramError;

pub mod types;
pub use types::*;

pub mod bot;
pub use bot::Bot;

pub mod poller;
pub use poller::Poller;

pub mod contacts;
pub use contacts::{Contact, ContactBook};

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::DiscordClient;
pub use config::{BotConfig, Credentials};
pub use core::{bot::TarotBot, catalogue::Catalogue, drawer::SpreadDrawer};
pub use utils::error::{Result, TarotError};

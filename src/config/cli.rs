use crate::config::BotConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tarot-bot")]
#[command(about = "A Discord bot that draws tarot readings")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Channel id to watch (repeatable, replaces the configured list)
    #[arg(long = "channel")]
    pub channels: Vec<String>,

    /// Seed the card draws for reproducible readings
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the command prefix
    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Connect and answer commands (default)
    Run,
    /// Validate the configuration and print a summary
    Check,
    /// Render a command locally without connecting
    Preview {
        /// Command name, e.g. "celtic"
        name: String,
    },
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn load(&self) -> Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_file(path)?,
            None => BotConfig::default(),
        };

        if !self.channels.is_empty() {
            config.discord.channel_ids = self.channels.clone();
        }
        if let Some(seed) = self.seed {
            config.bot.seed = Some(seed);
        }
        if let Some(prefix) = &self.prefix {
            config.bot.prefix = prefix.clone();
        }

        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "tarot-bot",
            "--channel",
            "111",
            "--channel",
            "222",
            "--seed",
            "9",
            "--prefix",
            "?",
        ]);

        let config = cli.load().unwrap();
        assert_eq!(config.channel_ids(), ["111".to_string(), "222".to_string()]);
        assert_eq!(config.seed(), Some(9));
        assert_eq!(config.prefix(), "?");
        assert!(matches!(cli.command(), Command::Run));
    }

    #[test]
    fn test_preview_subcommand() {
        let cli = CliConfig::parse_from(["tarot-bot", "-v", "preview", "celtic"]);
        assert!(cli.verbose);
        match cli.command() {
            Command::Preview { name } => assert_eq!(name, "celtic"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

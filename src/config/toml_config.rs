use crate::adapters::discord::DEFAULT_API_BASE;
use crate::config::credentials::Credentials;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TOKEN_ENV: &str = "DISCORD_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub bot: BotSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default)]
    pub channel_ids: Vec<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_poll_interval() -> u64 {
    2
}

fn default_request_timeout() -> u64 {
    10
}

fn default_prefix() -> String {
    "!".to_string()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_env: default_token_env(),
            channel_ids: Vec::new(),
            poll_interval_secs: default_poll_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            seed: None,
        }
    }
}

impl BotConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TarotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TarotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHANNEL_ID})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TarotError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("discord.api_base", &self.discord.api_base)?;
        validation::validate_non_empty_string("discord.token_env", &self.discord.token_env)?;
        validation::validate_snowflakes("discord.channel_ids", &self.discord.channel_ids)?;
        validation::validate_range(
            "discord.poll_interval_secs",
            self.discord.poll_interval_secs,
            1,
            300,
        )?;
        validation::validate_range(
            "discord.request_timeout_secs",
            self.discord.request_timeout_secs,
            1,
            120,
        )?;
        validation::validate_non_empty_string("bot.prefix", &self.bot.prefix)?;

        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(TarotError::InvalidConfigValueError {
                field: "bot.prefix".to_string(),
                value: self.bot.prefix.clone(),
                reason: "Prefix cannot contain whitespace".to_string(),
            });
        }

        Ok(())
    }

    /// Reads the bot token from the environment variable named by `discord.token_env`.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_env(&self.discord.token_env)
    }

    /// 啟動前檢查：先確認 token，再驗證其餘設定
    pub fn prepare(&self) -> Result<Credentials> {
        self.prepare_with(|name| std::env::var(name).ok())
    }

    pub fn prepare_with<F>(&self, lookup: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&self.discord.token_env, lookup)?;
        self.validate_config()?;
        Ok(credentials)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.discord.request_timeout_secs)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }
}

impl ConfigProvider for BotConfig {
    fn prefix(&self) -> &str {
        &self.bot.prefix
    }

    fn channel_ids(&self) -> &[String] {
        &self.discord.channel_ids
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.discord.poll_interval_secs)
    }

    fn seed(&self) -> Option<u64> {
        self.bot.seed
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[discord]
channel_ids = ["1187329846290120775"]
poll_interval_secs = 5

[bot]
prefix = "?"
seed = 42

[logging]
format = "json"
"#;

        let config = BotConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.discord.api_base, DEFAULT_API_BASE);
        assert_eq!(config.discord.token_env, "DISCORD_TOKEN");
        assert_eq!(config.prefix(), "?");
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = BotConfig::from_toml_str("").unwrap();

        assert_eq!(config.prefix(), "!");
        assert_eq!(config.discord.request_timeout_secs, 10);
        assert_eq!(config.log_format(), LogFormat::Compact);
        // 沒有頻道無法輪詢
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TAROT_TEST_CHANNEL", "998877665544332211");

        let toml_content = r#"
[discord]
channel_ids = ["${TAROT_TEST_CHANNEL}"]
"#;

        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.channel_ids(), ["998877665544332211".to_string()]);

        std::env::remove_var("TAROT_TEST_CHANNEL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[discord]
api_base = "not a url"
channel_ids = ["1"]
"#;
        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[discord]
channel_ids = ["1"]
poll_interval_secs = 0
"#;
        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[discord]
channel_ids = ["1"]

[bot]
prefix = "tarot "
"#;
        let config = BotConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = BotConfig::from_toml_str("[discord\nchannel_ids = 3").unwrap_err();
        assert!(matches!(err, TarotError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[discord]
channel_ids = ["123", "456"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BotConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.channel_ids().len(), 2);
    }

    #[test]
    fn test_prepare_reports_missing_token_before_other_problems() {
        // 預設設定沒有頻道，但缺 token 應優先回報
        let config = BotConfig::default();

        let err = config.prepare_with(|_| None).unwrap_err();
        match &err {
            TarotError::MissingConfiguration { field } => assert_eq!(field, "DISCORD_TOKEN"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.severity(), crate::utils::error::ErrorSeverity::Critical);
    }

    #[test]
    fn test_prepare_validates_after_token() {
        let config = BotConfig::default();
        let err = config
            .prepare_with(|_| Some("secret".to_string()))
            .unwrap_err();
        assert!(matches!(err, TarotError::InvalidConfigValueError { .. }));

        let mut config = BotConfig::default();
        config.discord.channel_ids = vec!["123".to_string()];
        let credentials = config
            .prepare_with(|name| (name == "DISCORD_TOKEN").then(|| "secret".to_string()))
            .unwrap();
        assert_eq!(credentials.token(), "secret");
    }
}

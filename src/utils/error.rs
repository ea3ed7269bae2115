use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("Invalid draw request: {message}")]
    InvalidRequest { message: String },

    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    #[error("Chat API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unrecognized command: {name}")]
    UnrecognizedCommand { name: String },

    #[error("Missing configuration: {field}")]
    MissingConfiguration { field: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Transport,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TarotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TarotError::InvalidRequest { .. } | TarotError::UnrecognizedCommand { .. } => {
                ErrorCategory::Request
            }
            TarotError::TransportFailure(_) | TarotError::ApiError { .. } => {
                ErrorCategory::Transport
            }
            TarotError::MissingConfiguration { .. }
            | TarotError::ConfigValidationError { .. }
            | TarotError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TarotError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TarotError::UnrecognizedCommand { .. } => ErrorSeverity::Low,
            TarotError::TransportFailure(_) | TarotError::ApiError { .. } => ErrorSeverity::Medium,
            TarotError::InvalidRequest { .. }
            | TarotError::ConfigValidationError { .. }
            | TarotError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            TarotError::MissingConfiguration { .. } | TarotError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TarotError::InvalidRequest { message } => {
                format!("The reading could not be drawn: {}", message)
            }
            TarotError::TransportFailure(_) => {
                "Could not reach the chat platform. Check your network connection.".to_string()
            }
            TarotError::ApiError { status, .. } => {
                format!("The chat platform rejected the request (HTTP {})", status)
            }
            TarotError::UnrecognizedCommand { name } => format!("Unknown command '{}'", name),
            TarotError::MissingConfiguration { field } => {
                format!("Required setting '{}' was not found", field)
            }
            TarotError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            TarotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            TarotError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TarotError::InvalidRequest { .. } => "Request between 1 and 78 cards",
            TarotError::TransportFailure(_) => "Retry once the network is available",
            TarotError::ApiError { status: 401, .. } | TarotError::ApiError { status: 403, .. } => {
                "Check the bot token and the channel permissions"
            }
            TarotError::ApiError { status: 429, .. } => "Increase discord.poll_interval_secs",
            TarotError::ApiError { .. } => "Retry later; the chat platform may be degraded",
            TarotError::UnrecognizedCommand { .. } => "Use the help command to list commands",
            TarotError::MissingConfiguration { .. } => {
                "Export the bot token, e.g. DISCORD_TOKEN=..., before starting the bot"
            }
            TarotError::ConfigValidationError { .. }
            | TarotError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run the check command again"
            }
            TarotError::IoError(_) => "Make sure the configuration file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, TarotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_is_critical() {
        let err = TarotError::MissingConfiguration {
            field: "DISCORD_TOKEN".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_api_error_suggestions() {
        let unauthorized = TarotError::ApiError {
            status: 401,
            message: "401: Unauthorized".to_string(),
        };
        assert_eq!(unauthorized.category(), ErrorCategory::Transport);
        assert!(unauthorized.recovery_suggestion().contains("token"));

        let limited = TarotError::ApiError {
            status: 429,
            message: "You are being rate limited.".to_string(),
        };
        assert!(limited.recovery_suggestion().contains("poll_interval"));
    }

    #[test]
    fn test_invalid_request_display() {
        let err = TarotError::InvalidRequest {
            message: "count 0 outside 1..=78".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid draw request: count 0 outside 1..=78"
        );
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_the_system_category() {
        let err: TarotError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "tarot.toml").into();

        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("tarot.toml"));
    }
}

use crate::utils::error::{Result, TarotError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TarotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TarotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TarotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| TarotError::MissingConfiguration {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TarotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TarotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Discord 的 ID 是十進位的 snowflake 字串
pub fn validate_snowflakes(field_name: &str, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(TarotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one channel id is required".to_string(),
        });
    }

    for id in ids {
        if id.parse::<u64>().is_err() {
            return Err(TarotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: id.clone(),
                reason: "Channel ids must be numeric snowflakes".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("discord.api_base", "https://discord.com/api/v10").is_ok());
        assert!(validate_url("discord.api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("discord.api_base", "").is_err());
        assert!(validate_url("discord.api_base", "invalid-url").is_err());
        assert!(validate_url("discord.api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("discord.poll_interval_secs", 2, 1, 300).is_ok());
        assert!(validate_range("discord.poll_interval_secs", 0, 1, 300).is_err());
        assert!(validate_range("discord.poll_interval_secs", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_snowflakes() {
        let ids = vec!["1187329846290120775".to_string()];
        assert!(validate_snowflakes("discord.channel_ids", &ids).is_ok());
        assert!(validate_snowflakes("discord.channel_ids", &[]).is_err());

        let invalid = vec!["general".to_string()];
        assert!(validate_snowflakes("discord.channel_ids", &invalid).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let token: Option<String> = None;
        let err = validate_required_field("DISCORD_TOKEN", &token).unwrap_err();
        assert!(matches!(err, TarotError::MissingConfiguration { .. }));

        let token = Some("abc".to_string());
        assert_eq!(validate_required_field("DISCORD_TOKEN", &token).unwrap(), "abc");
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("bot.prefix", "!").is_ok());
        assert!(validate_non_empty_string("bot.prefix", "  ").is_err());
    }
}

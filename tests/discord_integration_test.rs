use anyhow::Result;
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tarot_bot::config::BotConfig;
use tarot_bot::core::ConfigProvider;
use tarot_bot::{Catalogue, DiscordClient, TarotBot};
use tokio_test::assert_ok;

const CHANNEL: &str = "1187329846290120775";

fn bot_config(server: &MockServer, seed: u64) -> Result<BotConfig> {
    let toml_content = format!(
        r#"
[discord]
api_base = "{}"
channel_ids = ["{}"]
poll_interval_secs = 1

[bot]
seed = {}
"#,
        server.base_url(),
        CHANNEL,
        seed
    );
    Ok(BotConfig::from_toml_str(&toml_content)?)
}

fn mock_identity(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/users/@me");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "1", "username": "TarotBot", "bot": true}));
    });
}

fn mock_latest(server: &MockServer, latest_id: &str) {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/channels/{}/messages", CHANNEL))
            .query_param("limit", "1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": latest_id, "channel_id": CHANNEL, "content": "old news",
                 "author": {"id": "7", "username": "someone"}}
            ]));
    });
}

/// 完整流程：啟動 -> 輪詢 -> 回覆三張牌
#[tokio::test]
async fn test_three_card_command_end_to_end() -> Result<()> {
    let server = MockServer::start();
    mock_identity(&server);
    mock_latest(&server, "500");

    let poll_mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/channels/{}/messages", CHANNEL))
            .query_param("after", "500");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "501", "channel_id": CHANNEL, "content": "!threecards",
                 "author": {"id": "8", "username": "querent"}}
            ]));
    });

    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/channels/{}/messages", CHANNEL))
            .body_contains("Three Card Spread")
            .body_contains("Past: ")
            .body_contains("Present: ")
            .body_contains("Future: ");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "502"}));
    });

    let config = bot_config(&server, 3)?;
    let client = DiscordClient::new(&config.discord.api_base, "token", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    assert_ok!(bot.start().await);
    let handled = bot.poll_once().await;

    poll_mock.assert();
    send_mock.assert();
    assert_eq!(handled, 1);
    Ok(())
}

#[tokio::test]
async fn test_help_command_is_static() -> Result<()> {
    let server = MockServer::start();
    mock_identity(&server);
    mock_latest(&server, "10");

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/channels/{}/messages", CHANNEL))
            .query_param("after", "10");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "12", "channel_id": CHANNEL, "content": "!help_tarot",
                 "author": {"id": "8", "username": "a"}},
                {"id": "11", "channel_id": CHANNEL, "content": "!help_tarot",
                 "author": {"id": "9", "username": "b"}}
            ]));
    });

    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/channels/{}/messages", CHANNEL))
            .body_contains("Tarot Bot Commands")
            .body_contains("!celtic")
            .body_contains("Understanding Reversed Cards");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "13"}));
    });

    let config = bot_config(&server, 1)?;
    let client = DiscordClient::new(&config.discord.api_base, "token", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    bot.start().await?;
    assert_eq!(bot.poll_once().await, 2);

    send_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_failed_send_posts_fallback_notice() -> Result<()> {
    let server = MockServer::start();
    mock_identity(&server);
    mock_latest(&server, "20");

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/channels/{}/messages", CHANNEL))
            .query_param("after", "20");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "21", "channel_id": CHANNEL, "content": "!card",
                 "author": {"id": "8", "username": "querent"}}
            ]));
    });

    let embed_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/channels/{}/messages", CHANNEL))
            .body_contains("Single Card Draw");
        then.status(500).body("upstream exploded");
    });

    let notice_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/channels/{}/messages", CHANNEL))
            .body_contains("Something went wrong");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "22"}));
    });

    let config = bot_config(&server, 5)?;
    let client = DiscordClient::new(&config.discord.api_base, "token", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    bot.start().await?;
    assert_eq!(bot.poll_once().await, 1);

    embed_mock.assert();
    notice_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_poll_failure_is_not_fatal() -> Result<()> {
    let server = MockServer::start();
    mock_identity(&server);
    mock_latest(&server, "30");

    let poll_mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/channels/{}/messages", CHANNEL))
            .query_param("after", "30");
        then.status(403)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "Missing Access", "code": 50001}));
    });

    let config = bot_config(&server, 5)?;
    let client = DiscordClient::new(&config.discord.api_base, "token", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    bot.start().await?;
    assert_eq!(bot.poll_once().await, 0);
    assert_eq!(bot.poll_once().await, 0);

    poll_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_start_fails_with_bad_token() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/@me");
        then.status(401)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "401: Unauthorized", "code": 0}));
    });

    let config = bot_config(&server, 5)?;
    assert_eq!(config.poll_interval(), Duration::from_secs(1));
    let client = DiscordClient::new(&config.discord.api_base, "bad", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    let err = bot.start().await.unwrap_err();
    assert!(err.recovery_suggestion().contains("token"));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_channel_is_skipped_not_fatal() -> Result<()> {
    let server = MockServer::start();
    mock_identity(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/channels/111/messages")
            .query_param("limit", "1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "700", "channel_id": "111", "content": "hello",
                 "author": {"id": "7", "username": "someone"}}
            ]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/channels/111/messages")
            .query_param("after", "700");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "701", "channel_id": "111", "content": "!card",
                 "author": {"id": "8", "username": "querent"}}
            ]));
    });
    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/channels/111/messages");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "702"}));
    });

    let blocked_prime = server.mock(|when, then| {
        when.method(GET)
            .path("/channels/222/messages")
            .query_param("limit", "1");
        then.status(403)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "Missing Access", "code": 50001}));
    });
    let blocked_fetch = server.mock(|when, then| {
        when.method(GET)
            .path("/channels/222/messages")
            .query_param("limit", "50");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let toml_content = format!(
        r#"
[discord]
api_base = "{}"
channel_ids = ["111", "222"]

[bot]
seed = 9
"#,
        server.base_url()
    );
    let config = BotConfig::from_toml_str(&toml_content)?;
    let client = DiscordClient::new(&config.discord.api_base, "token", config.request_timeout())?;
    let mut bot = TarotBot::new(client, config, Arc::new(Catalogue::build()));

    assert_ok!(bot.start().await);
    assert!(bot.is_primed("111"));
    assert!(!bot.is_primed("222"));

    assert_eq!(bot.poll_once().await, 1);

    send_mock.assert();
    blocked_prime.assert_hits(2);
    // 未就緒的頻道不會被輪詢，避免重播歷史訊息
    blocked_fetch.assert_hits(0);
    Ok(())
}

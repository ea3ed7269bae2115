use crate::domain::model::{IncomingMessage, OutgoingMessage};
use crate::domain::ports::Messenger;
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// 每次輪詢最多取回的訊息數（Discord 上限 100）
const FETCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    username: String,
    #[serde(default)]
    bot: bool,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: String,
    channel_id: String,
    #[serde(default)]
    content: String,
    author: WireUser,
}

#[derive(Debug, Deserialize)]
struct RateLimitBody {
    retry_after: f64,
}

/// REST client for the Discord HTTP API.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    client: Client,
    api_base: String,
    token: String,
}

impl DiscordClient {
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                "DiscordBot (https://github.com/tarot-bot, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// 非 2xx 回應轉成 ApiError；429 額外記錄 retry_after
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.as_u16() == 429 {
            if let Ok(limit) = serde_json::from_str::<RateLimitBody>(&body) {
                tracing::warn!("⏳ Rate limited by Discord, retry after {:.2}s", limit.retry_after);
            }
        }

        Err(TarotError::ApiError {
            status: status.as_u16(),
            message: body,
        })
    }

    fn to_incoming(wire: WireMessage) -> Option<IncomingMessage> {
        match wire.id.parse::<u64>() {
            Ok(id) => Some(IncomingMessage {
                id,
                channel_id: wire.channel_id,
                author_name: wire.author.username,
                author_is_bot: wire.author.bot,
                content: wire.content,
            }),
            Err(_) => {
                tracing::warn!("⚠️ Skipping message with malformed id '{}'", wire.id);
                None
            }
        }
    }
}

#[async_trait]
impl Messenger for DiscordClient {
    async fn identity(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url("/users/@me"))
            .header("Authorization", self.auth())
            .send()
            .await?;
        let user: WireUser = Self::check(response).await?.json().await?;

        tracing::debug!("Authenticated as {} ({})", user.username, user.id);
        Ok(user.username)
    }

    async fn latest_message_id(&self, channel_id: &str) -> Result<Option<u64>> {
        let response = self
            .client
            .get(self.url(&format!("/channels/{}/messages", channel_id)))
            .header("Authorization", self.auth())
            .query(&[("limit", "1")])
            .send()
            .await?;
        let messages: Vec<WireMessage> = Self::check(response).await?.json().await?;

        Ok(messages.into_iter().filter_map(Self::to_incoming).map(|m| m.id).max())
    }

    async fn fetch_messages(
        &self,
        channel_id: &str,
        after: Option<u64>,
    ) -> Result<Vec<IncomingMessage>> {
        let mut query = vec![("limit", FETCH_LIMIT.to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        tracing::debug!("📡 Polling channel {} after {:?}", channel_id, after);
        let response = self
            .client
            .get(self.url(&format!("/channels/{}/messages", channel_id)))
            .header("Authorization", self.auth())
            .query(&query)
            .send()
            .await?;
        let wire: Vec<WireMessage> = Self::check(response).await?.json().await?;

        // Discord 回傳新到舊，這裡改成舊到新
        let mut messages: Vec<IncomingMessage> =
            wire.into_iter().filter_map(Self::to_incoming).collect();
        messages.sort_by_key(|m| m.id);
        Ok(messages)
    }

    async fn send(&self, channel_id: &str, message: &OutgoingMessage) -> Result<()> {
        let response = self
            .client
            .post(self.url(&format!("/channels/{}/messages", channel_id)))
            .header("Authorization", self.auth())
            .json(message)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

use crate::domain::model::{IncomingMessage, OutgoingMessage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 聊天平台的收發介面
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Display name of the connected bot account.
    async fn identity(&self) -> Result<String>;

    /// Id of the newest message in the channel, used as the initial poll cursor.
    async fn latest_message_id(&self, channel_id: &str) -> Result<Option<u64>>;

    /// Messages posted after `after`, oldest first.
    async fn fetch_messages(
        &self,
        channel_id: &str,
        after: Option<u64>,
    ) -> Result<Vec<IncomingMessage>>;

    async fn send(&self, channel_id: &str, message: &OutgoingMessage) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn prefix(&self) -> &str;
    fn channel_ids(&self) -> &[String];
    fn poll_interval(&self) -> Duration;
    fn seed(&self) -> Option<u64>;
}

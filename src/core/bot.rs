use crate::core::catalogue::Catalogue;
use crate::core::commands::{self, CommandTable, Parsed};
use crate::core::presentation;
use crate::domain::model::{CommandContext, IncomingMessage, OutgoingMessage};
use crate::domain::ports::{ConfigProvider, Messenger};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;

/// 輪詢頻道、分派指令、送出回覆的主迴圈
pub struct TarotBot<M: Messenger, C: ConfigProvider> {
    messenger: M,
    config: C,
    catalogue: Arc<Catalogue>,
    table: CommandTable,
    rng: StdRng,
    cursors: HashMap<String, Option<u64>>,
}

impl<M: Messenger, C: ConfigProvider> TarotBot<M, C> {
    pub fn new(messenger: M, config: C, catalogue: Arc<Catalogue>) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            messenger,
            config,
            catalogue,
            table: CommandTable::new(),
            rng,
            cursors: HashMap::new(),
        }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Logs the bot identity and moves every channel cursor past its history.
    /// Only the identity check is fatal; a channel that cannot be primed is
    /// logged and primed again on the next poll.
    pub async fn start(&mut self) -> Result<()> {
        let name = self.messenger.identity().await?;
        tracing::info!("🤖 {} has connected to Discord!", name);
        tracing::info!(
            "📺 Watching {} channel(s) with prefix '{}'",
            self.config.channel_ids().len(),
            self.config.prefix()
        );

        let channels = self.config.channel_ids().to_vec();
        for channel_id in channels {
            self.prime(&channel_id).await;
        }

        Ok(())
    }

    /// Whether `channel_id` has a cursor and is being polled.
    pub fn is_primed(&self, channel_id: &str) -> bool {
        self.cursors.contains_key(channel_id)
    }

    /// 設定頻道游標；失敗時頻道維持未就緒，不會以 after=None 重播歷史
    async fn prime(&mut self, channel_id: &str) -> bool {
        match self.messenger.latest_message_id(channel_id).await {
            Ok(latest) => {
                tracing::debug!("Channel {} starts after message {:?}", channel_id, latest);
                self.cursors.insert(channel_id.to_string(), latest);
                true
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Could not prime channel {}: {} ({})",
                    channel_id,
                    e,
                    e.recovery_suggestion()
                );
                false
            }
        }
    }

    /// One pass over all channels. Returns how many commands were answered.
    /// Poll failures are logged and the channel is retried on the next pass.
    pub async fn poll_once(&mut self) -> usize {
        let mut handled = 0;
        let channels = self.config.channel_ids().to_vec();

        for channel_id in channels {
            if !self.is_primed(&channel_id) && !self.prime(&channel_id).await {
                continue;
            }

            let after = self.cursors.get(&channel_id).copied().flatten();
            let messages = match self.messenger.fetch_messages(&channel_id, after).await {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Polling channel {} failed: {} ({})",
                        channel_id,
                        e,
                        e.recovery_suggestion()
                    );
                    continue;
                }
            };

            for message in messages {
                let cursor = self.cursors.entry(channel_id.clone()).or_insert(None);
                if cursor.is_some_and(|seen| message.id <= seen) {
                    continue;
                }
                *cursor = Some(message.id);

                if self.handle_message(&channel_id, &message).await {
                    handled += 1;
                }
            }
        }

        handled
    }

    /// Answers a single message if it is a command. Never fails: errors end up
    /// in the log and, where possible, as a generic notice in the channel.
    pub async fn handle_message(&mut self, channel_id: &str, message: &IncomingMessage) -> bool {
        if message.author_is_bot {
            return false;
        }

        let name = match commands::parse(self.config.prefix(), &message.content) {
            Parsed::Command(name) => name,
            Parsed::Ignored => return false,
        };

        tracing::info!("🔮 {} asked for '{}' in {}", message.author_name, name, channel_id);

        let ctx = CommandContext {
            channel_id,
            author_name: &message.author_name,
            prefix: self.config.prefix(),
        };
        let replies = self
            .table
            .respond(name, &ctx, &self.catalogue, &mut self.rng);

        self.deliver(channel_id, &replies).await;
        true
    }

    async fn deliver(&self, channel_id: &str, replies: &[OutgoingMessage]) {
        for reply in replies {
            if let Err(e) = self.messenger.send(channel_id, reply).await {
                tracing::error!(
                    "❌ Sending to channel {} failed: {} (Severity: {:?})",
                    channel_id,
                    e,
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

                if let Err(e) = self
                    .messenger
                    .send(channel_id, &presentation::failure_notice())
                    .await
                {
                    tracing::error!("❌ Fallback notice to channel {} failed: {}", channel_id, e);
                }
                return;
            }
        }
    }

    /// Polls until `shutdown` resolves.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.start().await?;

        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("👋 Shutdown requested, stopping bot");
                    break;
                }
                _ = interval.tick() => {
                    let handled = self.poll_once().await;
                    if handled > 0 {
                        tracing::debug!("Answered {} command(s) this pass", handled);
                    }
                }
            }
        }

        Ok(())
    }
}

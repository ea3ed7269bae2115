use crate::core::catalogue::Catalogue;
use crate::core::drawer::SpreadDrawer;
use crate::core::presentation;
use crate::core::spread::Spread;
use crate::domain::model::{CommandContext, OutgoingMessage};
use crate::utils::error::{Result, TarotError};
use rand::RngCore;
use std::collections::HashMap;

pub const HELP_COMMAND: &str = "help_tarot";

pub type Handler =
    fn(&CommandContext<'_>, &Catalogue, &mut dyn RngCore) -> Result<Vec<OutgoingMessage>>;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub summary: &'static str,
    pub handler: Handler,
}

/// 指令表：名稱 -> 處理器，順序即說明頁的順序
pub const COMMANDS: [CommandSpec; 6] = [
    CommandSpec {
        name: "card",
        help: "Draw a single tarot card",
        summary: "Draw a single tarot card",
        handler: single_card,
    },
    CommandSpec {
        name: "daily",
        help: "Draw your daily guidance card",
        summary: "Daily guidance card",
        handler: daily_reading,
    },
    CommandSpec {
        name: "threecards",
        help: "Draw a three-card spread (Past, Present, Future)",
        summary: "Past, Present, Future spread",
        handler: three_card_spread,
    },
    CommandSpec {
        name: "love",
        help: "Draw a love/relationship reading",
        summary: "Love & relationship reading",
        handler: love_reading,
    },
    CommandSpec {
        name: "celtic",
        help: "Draw a Celtic Cross spread (10 cards)",
        summary: "Celtic Cross spread (10 cards)",
        handler: celtic_cross,
    },
    CommandSpec {
        name: HELP_COMMAND,
        help: "Show all tarot bot commands",
        summary: "Show this help message",
        handler: help_tarot,
    },
];

fn draw_spread(
    spread: Spread,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    let reading = SpreadDrawer::new(catalogue).draw(spread.count(), rng)?;
    presentation::render(spread, &reading)
}

fn single_card(
    _ctx: &CommandContext<'_>,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    draw_spread(Spread::Single, catalogue, rng)
}

fn daily_reading(
    _ctx: &CommandContext<'_>,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    draw_spread(Spread::Daily, catalogue, rng)
}

fn three_card_spread(
    _ctx: &CommandContext<'_>,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    draw_spread(Spread::ThreeCard, catalogue, rng)
}

fn love_reading(
    _ctx: &CommandContext<'_>,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    draw_spread(Spread::Love, catalogue, rng)
}

fn celtic_cross(
    _ctx: &CommandContext<'_>,
    catalogue: &Catalogue,
    rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    draw_spread(Spread::CelticCross, catalogue, rng)
}

fn help_tarot(
    ctx: &CommandContext<'_>,
    _catalogue: &Catalogue,
    _rng: &mut dyn RngCore,
) -> Result<Vec<OutgoingMessage>> {
    let listing: Vec<(&str, &str)> = COMMANDS.iter().map(|c| (c.name, c.summary)).collect();
    Ok(vec![presentation::help(ctx.prefix, &listing)])
}

/// Outcome of looking a message up in the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<'a> {
    /// Not addressed to the bot.
    Ignored,
    Command(&'a str),
}

/// Extracts the command name from `content` when it starts with `prefix`.
/// Anything after the first whitespace is ignored; commands take no arguments.
pub fn parse<'a>(prefix: &str, content: &'a str) -> Parsed<'a> {
    let Some(rest) = content.trim_start().strip_prefix(prefix) else {
        return Parsed::Ignored;
    };

    match rest.split_whitespace().next() {
        Some(name) if !rest.starts_with(char::is_whitespace) => Parsed::Command(name),
        _ => Parsed::Ignored,
    }
}

#[derive(Clone)]
pub struct CommandTable {
    handlers: HashMap<&'static str, CommandSpec>,
}

impl CommandTable {
    pub fn new() -> Self {
        let handlers = COMMANDS.iter().map(|spec| (spec.name, *spec)).collect();
        Self { handlers }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.handlers.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|spec| spec.name).collect()
    }

    /// Runs the handler for `name`. Unknown names yield `UnrecognizedCommand`.
    pub fn dispatch(
        &self,
        name: &str,
        ctx: &CommandContext<'_>,
        catalogue: &Catalogue,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<OutgoingMessage>> {
        let spec = self
            .get(name)
            .ok_or_else(|| TarotError::UnrecognizedCommand {
                name: name.to_string(),
            })?;
        (spec.handler)(ctx, catalogue, rng)
    }

    /// Like `dispatch`, but every failure becomes the matching user-facing reply.
    pub fn respond(
        &self,
        name: &str,
        ctx: &CommandContext<'_>,
        catalogue: &Catalogue,
        rng: &mut dyn RngCore,
    ) -> Vec<OutgoingMessage> {
        match self.dispatch(name, ctx, catalogue, rng) {
            Ok(messages) => messages,
            Err(TarotError::UnrecognizedCommand { name }) => {
                tracing::debug!("❓ Unknown command '{}' in channel {}", name, ctx.channel_id);
                vec![presentation::command_not_found(ctx.prefix, HELP_COMMAND)]
            }
            Err(e) => {
                tracing::error!(
                    "❌ Command '{}' failed: {} (Category: {:?})",
                    name,
                    e,
                    e.category()
                );
                vec![presentation::failure_notice()]
            }
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Pure formatting of readings into chat messages.
//!
//! Nothing here touches randomness or I/O: the same reading always renders
//! to the same messages.

use crate::core::spread::{Spread, DARK_ORCHID};
use crate::domain::model::{DrawnCard, Embed, EmbedFooter, OutgoingMessage, Reading};
use crate::utils::error::{Result, TarotError};

pub const REVERSED_SUFFIX: &str = " (Reversed)";
pub const REVERSED_MARKER: &str = "🔄";
pub const UPRIGHT_MARKER: &str = "✨";

/// Celtic Cross 分成兩則訊息，每則五張
const FIELDS_PER_EMBED: usize = 5;

pub fn display_name(card: &DrawnCard) -> String {
    if card.is_reversed {
        format!("{}{}", card.name, REVERSED_SUFFIX)
    } else {
        card.name.clone()
    }
}

pub fn orientation_marker(card: &DrawnCard) -> &'static str {
    if card.is_reversed {
        REVERSED_MARKER
    } else {
        UPRIGHT_MARKER
    }
}

/// `index` is zero-based and only printed when `Some`.
pub fn field_title(card: &DrawnCard, label: Option<&str>, index: Option<usize>) -> String {
    let mut title = String::from("**");
    if let Some(i) = index {
        title.push_str(&format!("{}. ", i + 1));
    }
    if let Some(label) = label {
        title.push_str(label);
        title.push_str(": ");
    }
    title.push_str(&format!("{} {}**", orientation_marker(card), display_name(card)));
    title
}

fn footer(spread: Spread, reversed: usize) -> String {
    match (spread, reversed) {
        (Spread::Single, 0) => "✨ Trust your intuition".to_string(),
        (Spread::Single, _) => {
            "🔄 This card appeared reversed - consider its shadow aspects and internal challenges"
                .to_string()
        }
        (Spread::Daily, 0) => "🌟 Carry this wisdom with you".to_string(),
        (Spread::Daily, _) => "🔄 Today calls for introspection and shadow work".to_string(),
        (Spread::ThreeCard, 0) => "✨ Reflect on the connections between these cards".to_string(),
        (Spread::ThreeCard, n) => format!(
            "🔄 {} card(s) appeared reversed - pay attention to internal challenges and shadow work",
            n
        ),
        (Spread::Love, 0) => "💖 Love grows through understanding".to_string(),
        (Spread::Love, n) => format!(
            "💔 {} card(s) reversed - focus on healing and inner work in love",
            n
        ),
        (Spread::CelticCross, 0) => "✨ Take time to meditate on this reading".to_string(),
        (Spread::CelticCross, n) => format!(
            "🔄 {} card(s) appeared reversed - deep inner work and shadow integration needed",
            n
        ),
    }
}

fn daily_guidance(card: &DrawnCard) -> String {
    let mut text = format!("{}\n\n*How can this energy guide you today?*", card.meaning);
    if card.is_reversed {
        text.push_str("\n\n🔄 *This card appeared reversed - what inner work needs attention?*");
    }
    text
}

/// Renders a reading drawn for `spread` into the messages to send, in order.
pub fn render(spread: Spread, reading: &Reading) -> Result<Vec<OutgoingMessage>> {
    if reading.len() != spread.count() {
        return Err(TarotError::InvalidRequest {
            message: format!(
                "{} spread needs {} card(s), got {}",
                spread,
                spread.count(),
                reading.len()
            ),
        });
    }

    let reversed = reading.reversed_count();
    let color = spread.color(reversed);
    let positions = spread.positions();

    let fields: Vec<(String, String)> = reading
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let label = positions.get(i).copied();
            let index = spread.numbered().then_some(i);
            let value = match spread {
                Spread::Daily => daily_guidance(card),
                _ => card.meaning.clone(),
            };
            (field_title(card, label, index), value)
        })
        .collect();

    let mut embeds = Vec::new();
    for (chunk_index, chunk) in fields.chunks(FIELDS_PER_EMBED).enumerate() {
        let mut embed = if chunk_index == 0 {
            let embed = Embed::new(spread.title(), color);
            match spread.description() {
                Some(description) => embed.with_description(description),
                None => embed,
            }
        } else {
            Embed::new(format!("{} (continued)", spread.title()), color)
        };

        for (name, value) in chunk {
            embed = embed.with_field(name.as_str(), value.as_str());
        }
        embeds.push(embed);
    }

    // 頁尾只放在最後一則
    if let Some(last) = embeds.last_mut() {
        last.footer = Some(EmbedFooter {
            text: footer(spread, reversed),
        });
    }

    Ok(embeds.into_iter().map(OutgoingMessage::embed).collect())
}

/// The static help listing. Depends only on the command prefix.
pub fn help(prefix: &str, commands: &[(&str, &str)]) -> OutgoingMessage {
    let mut embed = Embed::new("🔮 Tarot Bot Commands", DARK_ORCHID).with_description(
        "Available tarot readings\n\n🔄 **Note:** All cards have a 50% chance of appearing reversed, offering deeper shadow work insights!",
    );

    for (name, summary) in commands {
        embed = embed.with_field(format!("{}{}", prefix, name), *summary);
    }

    embed = embed
        .with_field(
            "🔄 **Understanding Reversed Cards**",
            "Reversed cards aren't 'bad' - they represent:\n• Internal challenges\n• Shadow aspects to explore\n• Blocked energy needing attention\n• Opportunities for inner growth",
        )
        .with_footer("✨ May the cards guide your path - both light and shadow");

    OutgoingMessage::embed(embed)
}

pub fn command_not_found(prefix: &str, help_command: &str) -> OutgoingMessage {
    OutgoingMessage::text(format!(
        "🔮 Command not found. Use `{}{}` to see available commands.",
        prefix, help_command
    ))
}

pub fn failure_notice() -> OutgoingMessage {
    OutgoingMessage::text("🔮 Something went wrong. Please try again.")
}

/// Plain-text rendering for terminals, used by the preview command.
pub fn to_plain_text(messages: &[OutgoingMessage]) -> String {
    let mut out = Vec::new();
    for message in messages {
        if let Some(content) = &message.content {
            out.push(content.clone());
        }
        for embed in &message.embeds {
            out.push(format!("{} (#{:06X})", embed.title, embed.color));
            if let Some(description) = &embed.description {
                out.push(description.clone());
            }
            for field in &embed.fields {
                out.push(String::new());
                out.push(field.name.replace("**", ""));
                out.push(field.value.clone());
            }
            if let Some(footer) = &embed.footer {
                out.push(String::new());
                out.push(format!("> {}", footer.text));
            }
            out.push(String::new());
        }
    }
    out.join("\n")
}

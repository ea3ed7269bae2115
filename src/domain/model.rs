use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Cups,
    Pentacles,
    Swords,
    Wands,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Cups, Suit::Pentacles, Suit::Swords, Suit::Wands];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Cups => "Cups",
            Suit::Pentacles => "Pentacles",
            Suit::Swords => "Swords",
            Suit::Wands => "Wands",
        }
    }

    pub fn upright(&self) -> &'static str {
        match self {
            Suit::Cups => "Emotions, love, relationships, spirituality, intuition, healing",
            Suit::Pentacles => {
                "Material world, career, money, physical manifestation, resources, prosperity"
            }
            Suit::Swords => "Thought, communication, conflict, mental activity, intellect, clarity",
            Suit::Wands => "Energy, creativity, passion, growth, inspiration, adventure",
        }
    }

    pub fn reversed(&self) -> &'static str {
        match self {
            Suit::Cups => "Emotional imbalance, blocked creativity, unrequited love, moodiness",
            Suit::Pentacles => {
                "Financial loss, lack of planning, greed, materialistic focus, scarcity mindset"
            }
            Suit::Swords => {
                "Confusion, harsh self-criticism, mental fog, miscommunication, inner conflict"
            }
            Suit::Wands => "Lack of energy, creative blocks, delays, frustration, burnout",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Page,
    Knight,
    Queen,
    King,
}

impl Rank {
    pub const NUMBERS: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];

    pub const COURTS: [Rank; 4] = [Rank::Page, Rank::Knight, Rank::Queen, Rank::King];

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Page => "Page",
            Rank::Knight => "Knight",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    pub fn is_court(&self) -> bool {
        matches!(self, Rank::Page | Rank::Knight | Rank::Queen | Rank::King)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arcana {
    Major,
    Minor { suit: Suit, rank: Rank },
}

/// 牌庫中的一張牌，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub upright: String,
    pub reversed: String,
    pub arcana: Arcana,
}

impl CardDefinition {
    pub fn major(name: &str, upright: &str, reversed: &str) -> Self {
        Self {
            name: name.to_string(),
            upright: upright.to_string(),
            reversed: reversed.to_string(),
            arcana: Arcana::Major,
        }
    }

    pub fn minor(suit: Suit, rank: Rank) -> Self {
        let suit_lower = suit.name().to_lowercase();
        let (upright, reversed) = if rank.is_court() {
            (
                format!("{} - {} personality embodying {}", suit.upright(), rank, suit_lower),
                format!("{} - {} shadow aspects in {}", suit.reversed(), rank, suit_lower),
            )
        } else {
            (
                format!("{} - {} energy in {}", suit.upright(), rank, suit_lower),
                format!("{} - {} challenges in {}", suit.reversed(), rank, suit_lower),
            )
        };

        Self {
            name: format!("{} of {}", rank, suit),
            upright,
            reversed,
            arcana: Arcana::Minor { suit, rank },
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(self.arcana, Arcana::Major)
    }

    pub fn meaning(&self, is_reversed: bool) -> &str {
        if is_reversed {
            &self.reversed
        } else {
            &self.upright
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub name: String,
    pub is_reversed: bool,
    pub meaning: String,
}

impl DrawnCard {
    pub fn from_definition(definition: &CardDefinition, is_reversed: bool) -> Self {
        Self {
            name: definition.name.clone(),
            is_reversed,
            meaning: definition.meaning(is_reversed).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reading {
    pub cards: Vec<DrawnCard>,
}

impl Reading {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn reversed_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_reversed).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawnCard> {
        self.cards.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// 結構化訊息，欄位名稱與 Discord embed 物件一致
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: u64,
    pub channel_id: String,
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
}

/// 指令處理器收到的請求上下文
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub channel_id: &'a str,
    pub author_name: &'a str,
    pub prefix: &'a str,
}

use std::fmt;

pub const PURPLE: u32 = 0x800080;
pub const INDIGO: u32 = 0x4B0082;
pub const GOLD: u32 = 0xFFD700;
pub const GOLDENROD: u32 = 0xDAA520;
pub const HOT_PINK: u32 = 0xFF69B4;
pub const DEEP_PINK: u32 = 0xFF1493;
pub const DARK_ORCHID: u32 = 0x9932CC;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spread {
    Single,
    Daily,
    ThreeCard,
    Love,
    CelticCross,
}

impl Spread {
    pub const ALL: [Spread; 5] = [
        Spread::Single,
        Spread::Daily,
        Spread::ThreeCard,
        Spread::Love,
        Spread::CelticCross,
    ];

    pub fn count(&self) -> usize {
        match self {
            Spread::Single | Spread::Daily => 1,
            Spread::ThreeCard | Spread::Love => 3,
            Spread::CelticCross => 10,
        }
    }

    /// Position labels, parallel to the drawn cards. Empty for one-card spreads.
    pub fn positions(&self) -> &'static [&'static str] {
        match self {
            Spread::Single | Spread::Daily => &[],
            Spread::ThreeCard => &["Past", "Present", "Future"],
            Spread::Love => &["You", "Your Partner/Potential Partner", "The Relationship"],
            Spread::CelticCross => &[
                "Present Situation",
                "Challenge/Cross",
                "Distant Past/Foundation",
                "Recent Past",
                "Possible Outcome",
                "Near Future",
                "Your Approach",
                "External Influences",
                "Hopes and Fears",
                "Final Outcome",
            ],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Spread::Single => "🔮 Single Card Draw",
            Spread::Daily => "🌅 Daily Guidance",
            Spread::ThreeCard => "🔮 Three Card Spread",
            Spread::Love => "💕 Love & Relationship Reading",
            Spread::CelticCross => "🔮 Celtic Cross Spread",
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        match self {
            Spread::Single => None,
            Spread::Daily => Some("Your card for today"),
            Spread::ThreeCard => Some("Past • Present • Future"),
            Spread::Love => Some("Understanding your romantic energy"),
            Spread::CelticCross => Some("A comprehensive 10-card reading"),
        }
    }

    /// 逆位牌達到這個數量時改用深色
    pub fn dark_threshold(&self) -> usize {
        match self {
            Spread::Single | Spread::Daily => 1,
            Spread::ThreeCard | Spread::Love => 2,
            Spread::CelticCross => 5,
        }
    }

    /// Accent colour for a reading with `reversed` reversed cards.
    pub fn color(&self, reversed: usize) -> u32 {
        let dark = reversed >= self.dark_threshold();
        match (self, dark) {
            (Spread::Daily, false) => GOLD,
            (Spread::Daily, true) => GOLDENROD,
            (Spread::Love, false) => HOT_PINK,
            (Spread::Love, true) => DEEP_PINK,
            (_, false) => PURPLE,
            (_, true) => INDIGO,
        }
    }

    /// Fields with numbered titles ("1. Present Situation: ...").
    pub fn numbered(&self) -> bool {
        matches!(self, Spread::CelticCross)
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Spread::Single => "single",
            Spread::Daily => "daily",
            Spread::ThreeCard => "three-card",
            Spread::Love => "love",
            Spread::CelticCross => "celtic-cross",
        };
        f.write_str(name)
    }
}

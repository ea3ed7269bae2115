use crate::domain::model::{Arcana, CardDefinition, Rank, Suit};

/// 大阿爾克那：名稱、正位、逆位
pub const MAJOR_ARCANA: [(&str, &str, &str); 22] = [
    (
        "The Fool",
        "New beginnings, innocence, spontaneity, free spirit, leap of faith",
        "Recklessness, foolishness, lack of direction, poor judgment, naivety",
    ),
    (
        "The Magician",
        "Manifestation, resourcefulness, power, inspired action, willpower",
        "Manipulation, poor planning, untapped talents, lack of focus",
    ),
    (
        "The High Priestess",
        "Intuition, sacred knowledge, divine feminine, subconscious mind, inner wisdom",
        "Secrets, disconnected from intuition, withdrawal, silence, repressed feelings",
    ),
    (
        "The Empress",
        "Femininity, beauty, nature, nurturing, abundance, creativity",
        "Creative block, dependence on others, smothering, lack of growth",
    ),
    (
        "The Emperor",
        "Authority, establishment, structure, father figure, control, leadership",
        "Tyranny, rigidity, coldness, domination, lack of discipline",
    ),
    (
        "The Hierophant",
        "Spiritual wisdom, religious beliefs, conformity, tradition, institutions",
        "Personal beliefs, freedom, challenging the status quo, inner guidance",
    ),
    (
        "The Lovers",
        "Love, harmony, relationships, values alignment, choices, union",
        "Disharmony, imbalance, misalignment of values, relationship struggles",
    ),
    (
        "The Chariot",
        "Control, willpower, success, determination, direction, focus",
        "Lack of control, lack of direction, aggression, scattered energy",
    ),
    (
        "Strength",
        "Strength, courage, persuasion, influence, compassion, inner power",
        "Self-doubt, lack of confidence, abuse of power, weakness",
    ),
    (
        "The Hermit",
        "Soul searching, introspection, inner guidance, wisdom, seeking truth",
        "Isolation, loneliness, withdrawal, lost your way, paranoia",
    ),
    (
        "Wheel of Fortune",
        "Good luck, karma, life cycles, destiny, turning point, change",
        "Bad luck, lack of control, clinging to control, unwelcome changes",
    ),
    (
        "Justice",
        "Justice, fairness, truth, cause and effect, law, balance",
        "Unfairness, lack of accountability, dishonesty, bias, avoiding consequences",
    ),
    (
        "The Hanged Man",
        "Suspension, restriction, letting go, sacrifice, martyrdom, surrender",
        "Delays, resistance, stalling, indecision, lack of sacrifice",
    ),
    (
        "Death",
        "Endings, beginnings, change, transformation, transition, rebirth",
        "Resistance to change, personal transformation, inner purging, stagnation",
    ),
    (
        "Temperance",
        "Balance, moderation, patience, purpose, meaning, harmony",
        "Imbalance, excess, self-healing, re-alignment, hasty decisions",
    ),
    (
        "The Devil",
        "Bondage, addiction, sexuality, materialism, temptation, restriction",
        "Releasing limiting beliefs, exploring dark thoughts, detachment, breaking free",
    ),
    (
        "The Tower",
        "Sudden change, upheaval, chaos, revelation, awakening, destruction",
        "Personal transformation, fear of change, averting disaster, delayed catastrophe",
    ),
    (
        "The Star",
        "Hope, faith, purpose, renewal, spirituality, healing, inspiration",
        "Lack of faith, despair, self-trust, disconnection, discouragement",
    ),
    (
        "The Moon",
        "Illusion, fear, anxiety, subconscious, intuition, dreams, uncertainty",
        "Release of fear, repressed emotion, inner confusion, unveiling secrets",
    ),
    (
        "The Sun",
        "Positivity, fun, warmth, success, vitality, joy, enlightenment",
        "Inner child, feeling down, overly optimistic, lack of success, delayed happiness",
    ),
    (
        "Judgement",
        "Judgement, rebirth, inner calling, absolution, second chances, awakening",
        "Self-doubt, harsh self-judgement, lack of self-awareness, avoiding calling",
    ),
    (
        "The World",
        "Completion, accomplishment, travel, fulfillment, success, unity",
        "Incomplete goals, lack of closure, stagnation, failed plans, delays",
    ),
];

pub const DECK_SIZE: usize = 78;

/// The full 78-card deck, built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    cards: Vec<CardDefinition>,
}

impl Catalogue {
    pub fn build() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        cards.extend(
            MAJOR_ARCANA
                .iter()
                .map(|(name, upright, reversed)| CardDefinition::major(name, upright, reversed)),
        );

        for suit in Suit::ALL {
            for rank in Rank::NUMBERS.iter().chain(Rank::COURTS.iter()) {
                cards.push(CardDefinition::minor(suit, *rank));
            }
        }

        debug_assert_eq!(cards.len(), DECK_SIZE);
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&CardDefinition> {
        self.cards.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn major_arcana(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(|card| card.is_major())
    }

    /// The fourteen cards of `suit`, numbers first, then courts.
    pub fn suit(&self, suit: Suit) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |card| {
            matches!(card.arcana, Arcana::Minor { suit: s, .. } if s == suit)
        })
    }

    pub fn find_minor(&self, suit: Suit, rank: Rank) -> Option<&CardDefinition> {
        self.cards
            .iter()
            .find(|card| card.arcana == Arcana::Minor { suit, rank })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardDefinition> {
        self.cards.iter()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::build()
    }
}

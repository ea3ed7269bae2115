use crate::core::catalogue::Catalogue;
use crate::domain::model::{DrawnCard, Reading};
use crate::utils::error::{Result, TarotError};
use rand::seq::index;
use rand::Rng;

/// 從牌庫抽出不重複的牌，並為每張牌獨立決定正逆位
#[derive(Debug, Clone, Copy)]
pub struct SpreadDrawer<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> SpreadDrawer<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn draw<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Reading> {
        let size = self.catalogue.len();
        if count == 0 || count > size {
            return Err(TarotError::InvalidRequest {
                message: format!("count {} outside 1..={}", count, size),
            });
        }

        // index::sample 回傳的順序已經是隨機的，不要排序
        let picks = index::sample(rng, size, count);
        let mut cards = Vec::with_capacity(count);
        for i in picks.iter() {
            let is_reversed = rng.random_bool(0.5);
            if let Some(definition) = self.catalogue.get(i) {
                cards.push(DrawnCard::from_definition(definition, is_reversed));
            }
        }

        tracing::debug!(
            "🃏 Drew {} card(s), {} reversed",
            cards.len(),
            cards.iter().filter(|c| c.is_reversed).count()
        );

        Ok(Reading { cards })
    }
}

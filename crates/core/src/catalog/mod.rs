pub mod pokemontcg;
pub mod types;

use crate::domain::card::CardRecord;
use types::CatalogCard;

pub const MAX_CARDS: usize = 3;

#[async_trait::async_trait]
pub trait CardCatalog: Send + Sync {
    fn catalog_name(&self) -> &'static str;

    async fn search_by_name(&self, keyword: &str) -> anyhow::Result<Vec<CatalogCard>>;
}

/// Keeps priced cards at or under `budget`, in catalog order, capped at [`MAX_CARDS`].
///
/// Ordering is whatever the catalog returned; it is neither price- nor relevance-sorted.
pub fn select_under_budget(cards: Vec<CatalogCard>, budget: f64) -> Vec<CardRecord> {
    cards
        .into_iter()
        .filter_map(|card| {
            // A zero market price means the catalog has no real quote.
            let price = card.market_price().filter(|p| *p > 0.0 && *p <= budget)?;
            let url = card
                .tcgplayer
                .as_ref()
                .map(|t| t.url.clone())
                .unwrap_or_default();
            Some(CardRecord {
                name: card.name,
                set: card.set.name,
                price,
                url,
                image_url: card.images.and_then(|i| i.small),
            })
        })
        .take(MAX_CARDS)
        .collect()
}

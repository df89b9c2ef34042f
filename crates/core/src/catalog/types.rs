use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSearchResponse {
    #[serde(default)]
    pub data: Vec<CatalogCard>,
}

/// The subset of a catalog card object this service reads.
///
/// Every field defaults when absent; pricing decides eligibility, not shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub set: CardSet,
    #[serde(default)]
    pub tcgplayer: Option<TcgPlayer>,
    #[serde(default)]
    pub images: Option<CardImages>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardSet {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcgPlayer {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub prices: Option<TcgPrices>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcgPrices {
    #[serde(default)]
    pub normal: Option<PriceTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTier {
    #[serde(default)]
    pub market: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardImages {
    #[serde(default)]
    pub small: Option<String>,
}

impl CatalogCard {
    pub fn market_price(&self) -> Option<f64> {
        self.tcgplayer
            .as_ref()?
            .prices
            .as_ref()?
            .normal
            .as_ref()?
            .market
    }
}

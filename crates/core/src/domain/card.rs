use serde::{Deserialize, Serialize};

/// A purchasable single card, already filtered to the requested budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub set: String,
    pub price: f64,
    pub url: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub reply: String,
    pub cards: Vec<CardRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_wire_shape() {
        let res = RecommendationResponse {
            reply: "Try **Pikachu**".to_string(),
            cards: vec![CardRecord {
                name: "Pikachu".to_string(),
                set: "Base".to_string(),
                price: 4.5,
                url: "https://prices.pokemontcg.io/tcgplayer/base1-58".to_string(),
                image_url: None,
            }],
        };

        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(
            v,
            json!({
                "reply": "Try **Pikachu**",
                "cards": [{
                    "name": "Pikachu",
                    "set": "Base",
                    "price": 4.5,
                    "url": "https://prices.pokemontcg.io/tcgplayer/base1-58",
                    "imageUrl": null,
                }]
            })
        );
    }
}

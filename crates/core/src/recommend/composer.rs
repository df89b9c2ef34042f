use crate::domain::card::CardRecord;
use crate::recommend::intent::Intent;

/// Builds the user message for the recommendation call.
///
/// Sealed product is not in the card catalog, so that branch leans on the model's own
/// knowledge. The singles branch hands over the fetched list as the only card data.
pub fn compose_prompt(intent: Intent, prompt: &str, budget: f64, cards: &[CardRecord]) -> String {
    match intent {
        Intent::SealedProduct => format!(
            "The user wants help finding Pokémon sealed products (like booster boxes or Elite Trainer Boxes) under ${budget}.\n\n\
Their question: \"{prompt}\"\n\n\
Give 3 beginner-friendly recommendations of sealed products or booster boxes that are under budget. \
Mention the set and a rough price estimate. Avoid made-up products."
        ),
        Intent::Singles => format!(
            "The user wants help finding Pokémon cards under ${budget}.\n\n\
Their question: \"{prompt}\"\n\n\
Here are cards available:\n{}\n\n\
Give 3 beginner-friendly tips and recommend 1–2 cards from the list.",
            card_lines(cards)
        ),
    }
}

fn card_lines(cards: &[CardRecord]) -> String {
    if cards.is_empty() {
        return "- (no cards found under budget)".to_string();
    }
    cards
        .iter()
        .map(|c| format!("- {} ({}) - ${:.2}", c.name, c.set, c.price))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, set: &str, price: f64) -> CardRecord {
        CardRecord {
            name: name.to_string(),
            set: set.to_string(),
            price,
            url: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn singles_prompt_lists_cards_with_two_decimals() {
        let cards = vec![card("Pikachu", "Base", 5.0), card("Eevee", "Jungle", 3.456)];
        let out = compose_prompt(Intent::Singles, "best beginner cards", 20.0, &cards);

        assert!(out.starts_with("The user wants help finding Pokémon cards under $20.\n\n"));
        assert!(out.contains("Their question: \"best beginner cards\""));
        assert!(out.contains("- Pikachu (Base) - $5.00\n- Eevee (Jungle) - $3.46"));
        assert!(out.ends_with("recommend 1–2 cards from the list."));
    }

    #[test]
    fn sealed_prompt_has_no_card_list() {
        let out = compose_prompt(Intent::SealedProduct, "cheap booster box", 19.99, &[]);
        assert!(out.contains("sealed products"));
        assert!(out.contains("under $19.99."));
        assert!(out.contains("Avoid made-up products."));
        assert!(!out.contains("Here are cards available"));
    }

    #[test]
    fn singles_prompt_marks_empty_list() {
        let out = compose_prompt(Intent::Singles, "charizard", 1.0, &[]);
        assert!(out.contains("Here are cards available:\n- (no cards found under budget)\n\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let cards = vec![card("Mew", "151", 9.99)];
        let a = compose_prompt(Intent::Singles, "mew", 10.0, &cards);
        let b = compose_prompt(Intent::Singles, "mew", 10.0, &cards);
        assert_eq!(a, b);
    }
}

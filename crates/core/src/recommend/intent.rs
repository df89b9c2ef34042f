use serde::Serialize;

/// Keywords containing any of these route to the sealed-product branch.
///
/// Plain substring matching: a card literally named "Box Legend" is treated as sealed product.
pub const SEALED_VOCABULARY: [&str; 6] = [
    "booster",
    "booster box",
    "box",
    "sealed",
    "etb",
    "elite trainer",
];

const GENERIC_KEYWORD: &str = "pokemon";
const FALLBACK_KEYWORD: &str = "booster";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SealedProduct,
    Singles,
}

pub fn classify(keyword: &str) -> Intent {
    let keyword = keyword.to_lowercase();
    if SEALED_VOCABULARY.iter().any(|term| keyword.contains(term)) {
        Intent::SealedProduct
    } else {
        Intent::Singles
    }
}

/// Trims, lowercases and drops wrapping quotes; the bare category name maps to the fallback.
pub fn normalize_keyword(raw: &str) -> String {
    let keyword = raw.trim().trim_matches('"').trim().to_lowercase();
    if keyword == GENERIC_KEYWORD {
        FALLBACK_KEYWORD.to_string()
    } else {
        keyword
    }
}

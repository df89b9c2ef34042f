use crate::llm::{CompletionRequest, LlmClient};
use crate::recommend::intent::normalize_keyword;
use anyhow::Context;

pub const EXTRACTION_INSTRUCTION: &str = "Extract the most relevant Pokémon-related keyword or product type from this question (like 'Charizard', 'booster box', 'Elite Trainer Box', etc). Return only one word or short phrase. No explanation.";

// Low temperature keeps the keyword stable across identical prompts.
pub const EXTRACTION_TEMPERATURE: f64 = 0.3;

pub struct KeywordExtractor<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    pub async fn extract(&self, prompt: &str) -> anyhow::Result<String> {
        let raw = self
            .llm
            .complete(CompletionRequest {
                system: EXTRACTION_INSTRUCTION.to_string(),
                user: prompt.to_string(),
                temperature: EXTRACTION_TEMPERATURE,
            })
            .await
            .context("keyword extraction failed")?;

        let keyword = normalize_keyword(&raw);
        anyhow::ensure!(
            !keyword.is_empty(),
            "keyword extraction returned an empty keyword"
        );

        tracing::debug!(provider = ?self.llm.provider(), %keyword, "keyword extracted");
        Ok(keyword)
    }
}

use crate::catalog::{select_under_budget, CardCatalog};
use crate::domain::card::{CardRecord, RecommendationResponse};
use crate::domain::request::RecommendationRequest;
use crate::error::{AskError, Upstream};
use crate::llm::{CompletionRequest, LlmClient};
use crate::recommend::composer::compose_prompt;
use crate::recommend::extractor::KeywordExtractor;
use crate::recommend::intent::{classify, Intent};
use crate::recommend::RecommendationService;
use std::sync::Arc;

pub const PERSONA_INSTRUCTION: &str = "You're an expert in Pokémon card collecting. Give beginner-friendly advice that's clear and actionable.";
pub const RECOMMENDATION_TEMPERATURE: f64 = 0.7;

/// Runs extract → (catalog lookup) → compose → recommend for one request.
///
/// Every step needs the previous one's output, so calls are strictly sequential and any
/// failure aborts the request. There are no retries.
#[derive(Clone)]
pub struct Recommender {
    llm: Arc<dyn LlmClient>,
    catalog: Arc<dyn CardCatalog>,
}

#[derive(Debug, Clone)]
struct Plan {
    keyword: String,
    intent: Intent,
    cards: Vec<CardRecord>,
}

impl Recommender {
    pub fn new(llm: Arc<dyn LlmClient>, catalog: Arc<dyn CardCatalog>) -> Self {
        Self { llm, catalog }
    }

    async fn plan(&self, req: &RecommendationRequest) -> Result<Plan, AskError> {
        let keyword = KeywordExtractor::new(self.llm.as_ref())
            .extract(req.prompt())
            .await
            .map_err(|e| AskError::upstream(Upstream::LanguageModel, e))?;

        let intent = classify(&keyword);
        let cards = match intent {
            Intent::SealedProduct => Vec::new(),
            Intent::Singles => {
                let found = self
                    .catalog
                    .search_by_name(&keyword)
                    .await
                    .map_err(|e| AskError::upstream(Upstream::CardCatalog, e))?;
                let found_len = found.len();
                let cards = select_under_budget(found, req.budget());
                tracing::debug!(
                    catalog = self.catalog.catalog_name(),
                    found = found_len,
                    kept = cards.len(),
                    "filtered catalog cards"
                );
                cards
            }
        };

        tracing::info!(%keyword, ?intent, cards = cards.len(), "planned recommendation");
        Ok(Plan {
            keyword,
            intent,
            cards,
        })
    }

    async fn respond(
        &self,
        req: &RecommendationRequest,
        plan: Plan,
    ) -> Result<RecommendationResponse, AskError> {
        let user = compose_prompt(plan.intent, req.prompt(), req.budget(), &plan.cards);
        let reply = self
            .llm
            .complete(CompletionRequest {
                system: PERSONA_INSTRUCTION.to_string(),
                user,
                temperature: RECOMMENDATION_TEMPERATURE,
            })
            .await
            .map_err(|e| {
                AskError::upstream(
                    Upstream::LanguageModel,
                    e.context(format!("recommendation failed for keyword={}", plan.keyword)),
                )
            })?;

        Ok(RecommendationResponse {
            reply,
            cards: plan.cards,
        })
    }
}

#[async_trait::async_trait]
impl RecommendationService for Recommender {
    async fn recommend(
        &self,
        req: &RecommendationRequest,
    ) -> Result<RecommendationResponse, AskError> {
        let plan = self.plan(req).await?;
        self.respond(req, plan).await
    }
}

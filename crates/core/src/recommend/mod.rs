pub mod composer;
pub mod extractor;
pub mod intent;
pub mod orchestrator;

use crate::domain::card::RecommendationResponse;
use crate::domain::request::RecommendationRequest;
use crate::error::AskError;

pub use orchestrator::Recommender;

#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(
        &self,
        req: &RecommendationRequest,
    ) -> Result<RecommendationResponse, AskError>;
}

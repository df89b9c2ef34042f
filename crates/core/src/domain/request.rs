use crate::error::AskError;
use serde::Serialize;

/// A prompt plus budget that has passed validation.
///
/// Both the browser form and the JSON endpoint go through [`RecommendationRequest::new`],
/// so nothing downstream has to re-check the invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    prompt: String,
    budget: f64,
}

impl RecommendationRequest {
    pub fn new(prompt: &str, budget: f64) -> Result<Self, AskError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AskError::validation("prompt must be non-empty"));
        }
        if !budget.is_finite() || budget <= 0.0 {
            return Err(AskError::validation(
                "budget must be a number greater than 0",
            ));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            budget,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_prompt() {
        let req = RecommendationRequest::new("  best beginner cards \n", 20.0).unwrap();
        assert_eq!(req.prompt(), "best beginner cards");
        assert_eq!(req.budget(), 20.0);
    }

    #[test]
    fn rejects_blank_prompt() {
        assert!(RecommendationRequest::new("   ", 20.0).unwrap_err().is_validation());
    }

    #[test]
    fn rejects_non_positive_or_non_finite_budget() {
        for budget in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = RecommendationRequest::new("charizard", budget).unwrap_err();
            assert!(err.is_validation(), "budget {budget} should be rejected");
        }
    }
}

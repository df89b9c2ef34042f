pub mod error;
pub mod openai;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
}

/// One system + one user turn; every call in this service has that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the text of the first choice.
    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<String>;
}

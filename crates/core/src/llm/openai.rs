use crate::config::Settings;
use crate::llm::error::{LlmDiagnosticsError, Stage};
use crate::llm::{CompletionRequest, LlmClient, Provider};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.openai_timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.openai_base_url.clone(),
            model: settings.openai_model.clone(),
        })
    }

    async fn create_chat_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenAI response body")?;
        if !status.is_success() {
            return Err(LlmDiagnosticsError {
                provider: Provider::OpenAI,
                stage: Stage::Http,
                status: Some(status.as_u16()),
                raw_body: Some(text),
            }
            .into());
        }

        serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|e| {
            anyhow::Error::new(LlmDiagnosticsError {
                provider: Provider::OpenAI,
                stage: Stage::Decode,
                status: Some(status.as_u16()),
                raw_body: Some(text),
            })
            .context(format!("failed to decode OpenAI response: {e}"))
        })
    }

    fn first_choice_text(res: ChatCompletionResponse) -> anyhow::Result<String> {
        let Some(choice) = res.choices.into_iter().next() else {
            return Err(Self::unusable(Stage::NoChoices).into());
        };
        choice
            .message
            .content
            .ok_or_else(|| Self::unusable(Stage::EmptyContent).into())
    }

    fn unusable(stage: Stage) -> LlmDiagnosticsError {
        LlmDiagnosticsError {
            provider: Provider::OpenAI,
            stage,
            status: None,
            raw_body: None,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &req.system,
                },
                Message {
                    role: "user",
                    content: &req.user,
                },
            ],
            temperature: req.temperature,
        };

        let res = self.create_chat_completion(&body).await?;
        Self::first_choice_text(res)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

use crate::llm::Provider;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Http,
    Decode,
    NoChoices,
    EmptyContent,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Http => "http",
            Stage::Decode => "decode",
            Stage::NoChoices => "no_choices",
            Stage::EmptyContent => "empty_content",
        }
    }
}

/// The completion endpoint answered, but not with anything usable.
#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: Stage,
    pub status: Option<u16>,
    pub raw_body: Option<String>,
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LLM error (provider={:?}, stage={}", self.provider, self.stage.as_str())?;
        if let Some(status) = self.status {
            write!(f, ", status={status}")?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for LlmDiagnosticsError {}

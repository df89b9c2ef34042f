use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    LanguageModel,
    CardCatalog,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::LanguageModel => f.write_str("language model"),
            Upstream::CardCatalog => f.write_str("card catalog"),
        }
    }
}

/// Failure of a single recommendation request. An empty card list is not one.
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("{0}")]
    Validation(String),

    #[error("{upstream} request failed")]
    Upstream {
        upstream: Upstream,
        timed_out: bool,
        #[source]
        source: anyhow::Error,
    },
}

impl AskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AskError::Validation(msg.into())
    }

    pub fn upstream(upstream: Upstream, source: anyhow::Error) -> Self {
        let timed_out = source.chain().any(|cause| {
            cause
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout)
        });
        AskError::Upstream {
            upstream,
            timed_out,
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AskError::Validation(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AskError::Upstream { timed_out: true, .. })
    }
}

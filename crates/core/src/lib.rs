pub mod catalog;
pub mod domain;
pub mod error;
pub mod llm;
pub mod present;
pub mod recommend;

pub mod config {
    use anyhow::Context;

    const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
    const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
    const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;
    const DEFAULT_TCG_BASE_URL: &str = "https://api.pokemontcg.io";
    const DEFAULT_TCG_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub openai_api_key: Option<String>,
        pub openai_base_url: String,
        pub openai_model: String,
        pub openai_timeout_secs: u64,
        pub tcg_api_key: Option<String>,
        pub tcg_base_url: String,
        pub tcg_timeout_secs: u64,
        pub port: u16,
        /// Empty means any origin is allowed.
        pub cors_allowed_origins: Vec<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

            Ok(Self {
                openai_api_key: get("OPENAI_API_KEY"),
                openai_base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                openai_model: get("OPENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                openai_timeout_secs: parse_or(
                    get("OPENAI_TIMEOUT_SECS"),
                    "OPENAI_TIMEOUT_SECS",
                    DEFAULT_OPENAI_TIMEOUT_SECS,
                )?,
                tcg_api_key: get("TCG_API_KEY"),
                tcg_base_url: get("TCG_BASE_URL").unwrap_or_else(|| DEFAULT_TCG_BASE_URL.to_string()),
                tcg_timeout_secs: parse_or(
                    get("TCG_TIMEOUT_SECS"),
                    "TCG_TIMEOUT_SECS",
                    DEFAULT_TCG_TIMEOUT_SECS,
                )?,
                port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
                cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
                sentry_dsn: get("SENTRY_DSN"),
            })
        }

        /// Fails fast when a key needed to serve requests is missing.
        pub fn validate(&self) -> anyhow::Result<()> {
            self.require_openai_api_key()?;
            self.require_tcg_api_key()?;
            Ok(())
        }

        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key
                .as_deref()
                .context("OPENAI_API_KEY is required")
        }

        pub fn require_tcg_api_key(&self) -> anyhow::Result<&str> {
            self.tcg_api_key.as_deref().context("TCG_API_KEY is required")
        }
    }

    fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match raw {
            Some(s) => s
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} is not a valid number: {s}")),
            None => Ok(default),
        }
    }

}

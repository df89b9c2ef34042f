use crate::catalog::types::{CardSearchResponse, CatalogCard};
use crate::catalog::CardCatalog;
use crate::config::Settings;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const CARDS_PATH: &str = "/v2/cards";

#[derive(Debug, Clone)]
pub struct PokemonTcgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PokemonTcgClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_tcg_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.tcg_timeout_secs))
            .build()
            .context("failed to build card catalog http client")?;

        Ok(Self {
            http,
            base_url: settings.tcg_base_url.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CARDS_PATH)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        Ok(headers)
    }
}

/// Multi-word keywords are quoted so the catalog matches them as one phrase.
pub fn name_query(keyword: &str) -> String {
    if keyword.chars().any(char::is_whitespace) {
        format!("name:\"{}\"", keyword.replace('"', ""))
    } else {
        format!("name:{keyword}")
    }
}

#[async_trait::async_trait]
impl CardCatalog for PokemonTcgClient {
    fn catalog_name(&self) -> &'static str {
        "pokemontcg"
    }

    async fn search_by_name(&self, keyword: &str) -> Result<Vec<CatalogCard>> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .query(&[("q", name_query(keyword))])
            .send()
            .await
            .context("card catalog request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read card catalog response")?;

        if !status.is_success() {
            anyhow::bail!("card catalog HTTP {status}: {text}");
        }

        let parsed = serde_json::from_str::<CardSearchResponse>(&text)
            .with_context(|| format!("card catalog response is not valid card JSON: {text}"))?;
        Ok(parsed.data)
    }
}

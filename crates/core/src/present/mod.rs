pub mod markup;

use crate::domain::card::RecommendationResponse;
use crate::domain::request::RecommendationRequest;
use crate::error::AskError;
use crate::recommend::RecommendationService;
use anyhow::Context;
use serde::Serialize;
use tera::Tera;

pub const MARKETPLACE_SEARCH_URL: &str =
    "https://www.tcgplayer.com/search/pokemon/product?q=booster%20box";
pub const VALIDATION_MESSAGE: &str = "Please enter a prompt and a valid budget greater than $0.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please check your server or try again.";
pub const LOADING_HTML: &str = "<p>Thinking...</p>";

const PAGE_TEMPLATE: &str = "page.html";
const RESULT_TEMPLATE: &str = "result.html";

/// Validates raw form values before anything is sent anywhere.
pub fn validate_form(prompt: &str, budget: &str) -> Result<RecommendationRequest, AskError> {
    let invalid = || AskError::validation(VALIDATION_MESSAGE);

    let prompt = prompt.trim();
    let budget = budget.trim();
    if prompt.is_empty() || budget.is_empty() {
        return Err(invalid());
    }

    let budget = budget.parse::<f64>().map_err(|_| invalid())?;
    RecommendationRequest::new(prompt, budget).map_err(|_| invalid())
}

pub fn render_error(message: &str) -> String {
    format!("<p class=\"error\">{}</p>", tera::escape_html(message))
}

#[derive(Debug, Serialize)]
struct CardView<'a> {
    name: &'a str,
    set: &'a str,
    price: String,
    url: &'a str,
    image_url: Option<&'a str>,
}

pub struct Presenter {
    templates: Tera,
    view_path: String,
}

impl Presenter {
    /// `view_path` is where the page posts raw form values to.
    pub fn new(view_path: impl Into<String>) -> anyhow::Result<Self> {
        let mut templates = Tera::default();
        templates
            .add_raw_template(PAGE_TEMPLATE, include_str!("../../templates/page.html"))
            .context("failed to compile page template")?;
        templates
            .add_raw_template(RESULT_TEMPLATE, include_str!("../../templates/result.html"))
            .context("failed to compile result template")?;

        Ok(Self {
            templates,
            view_path: view_path.into(),
        })
    }

    pub fn render_page(&self) -> anyhow::Result<String> {
        let mut context = tera::Context::new();
        context.insert("view_path", &self.view_path);
        context.insert("loading_html", LOADING_HTML);
        context.insert("validation_html", &render_error(VALIDATION_MESSAGE));
        context.insert("failure_html", &render_error(FAILURE_MESSAGE));

        self.templates
            .render(PAGE_TEMPLATE, &context)
            .context("failed to render page")
    }

    pub fn render_result(&self, res: &RecommendationResponse) -> anyhow::Result<String> {
        let cards: Vec<CardView<'_>> = res
            .cards
            .iter()
            .map(|c| CardView {
                name: &c.name,
                set: &c.set,
                price: format!("{:.2}", c.price),
                url: &c.url,
                image_url: c.image_url.as_deref(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("reply_html", &markup::format_reply(&res.reply));
        context.insert("has_cards", &!cards.is_empty());
        context.insert("cards", &cards);
        context.insert("marketplace_url", MARKETPLACE_SEARCH_URL);

        self.templates
            .render(RESULT_TEMPLATE, &context)
            .context("failed to render recommendation result")
    }

    /// Validates, makes at most one service call, and always yields renderable HTML.
    pub async fn submit<S>(&self, service: &S, prompt: &str, budget: &str) -> String
    where
        S: RecommendationService + ?Sized,
    {
        let req = match validate_form(prompt, budget) {
            Ok(req) => req,
            Err(err) => return render_error(&err.to_string()),
        };

        let rendered = match service.recommend(&req).await {
            Ok(res) => self.render_result(&res),
            Err(err) => Err(anyhow::Error::new(err)),
        };

        rendered.unwrap_or_else(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to build recommendation view");
            render_error(FAILURE_MESSAGE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardRecord;
    use crate::error::Upstream;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
        cards: Vec<CardRecord>,
    }

    impl CountingService {
        fn ok(cards: Vec<CardRecord>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                cards,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
                cards: Vec::new(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl RecommendationService for CountingService {
        async fn recommend(
            &self,
            _req: &RecommendationRequest,
        ) -> Result<RecommendationResponse, AskError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AskError::upstream(
                    Upstream::LanguageModel,
                    anyhow::anyhow!("HTTP 500"),
                ));
            }
            Ok(RecommendationResponse {
                reply: "1. Start with **Pikachu**".to_string(),
                cards: self.cards.clone(),
            })
        }
    }

    fn pikachu() -> CardRecord {
        CardRecord {
            name: "Pikachu".to_string(),
            set: "Base".to_string(),
            price: 4.5,
            url: "https://prices.pokemontcg.io/tcgplayer/base1-58".to_string(),
            image_url: Some("https://images.pokemontcg.io/base1/58.png".to_string()),
        }
    }

    fn presenter() -> Presenter {
        Presenter::new("/view").unwrap()
    }

    #[test]
    fn validate_form_rejects_bad_budgets() {
        for budget in ["0", "-5", "", "abc", "   ", "NaN", "inf"] {
            let err = validate_form("best beginner cards", budget).unwrap_err();
            assert_eq!(err.to_string(), VALIDATION_MESSAGE, "budget {budget:?}");
        }
        assert!(validate_form("  ", "20").is_err());
    }

    #[test]
    fn validate_form_accepts_decimal_budget() {
        let req = validate_form(" charizard ", " 19.99 ").unwrap();
        assert_eq!(req.prompt(), "charizard");
        assert_eq!(req.budget(), 19.99);
    }

    #[tokio::test]
    async fn invalid_input_never_calls_service() {
        let service = CountingService::ok(vec![]);
        for budget in ["0", "-5", "", "abc"] {
            let html = presenter().submit(&service, "best beginner cards", budget).await;
            assert!(html.contains(VALIDATION_MESSAGE));
        }
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn valid_input_calls_service_once_and_renders_cards() {
        let service = CountingService::ok(vec![pikachu()]);
        let html = presenter().submit(&service, "best beginner cards", "19.99").await;

        assert_eq!(service.calls(), 1);
        assert!(html.contains("<h4>1️⃣ Tip 1:</h4>Start with <strong>Pikachu</strong>"));
        assert!(html.contains("<h4>Pikachu</h4>"));
        assert!(html.contains("$4.50"));
        assert!(html.contains("Buy this card"));
        assert!(html.contains("<img src="));
        assert!(!html.contains("Browse Booster Boxes"));
    }

    #[tokio::test]
    async fn empty_cards_render_marketplace_link() {
        let service = CountingService::ok(vec![]);
        let html = presenter().submit(&service, "cheap booster box", "50").await;

        assert!(html.contains("Browse Booster Boxes on TCGPlayer"));
        assert!(html.contains(MARKETPLACE_SEARCH_URL));
    }

    #[tokio::test]
    async fn service_failure_renders_generic_error() {
        let service = CountingService::failing();
        let html = presenter().submit(&service, "charizard", "30").await;

        assert_eq!(service.calls(), 1);
        assert_eq!(html, render_error(FAILURE_MESSAGE));
    }

    #[test]
    fn card_fields_are_escaped() {
        let mut card = pikachu();
        card.name = "<b>Mr. Mime</b>".to_string();
        card.image_url = None;
        let html = presenter()
            .render_result(&RecommendationResponse {
                reply: String::new(),
                cards: vec![card],
            })
            .unwrap();

        assert!(html.contains("&lt;b&gt;Mr. Mime&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn card_without_url_has_no_buy_link() {
        let mut card = pikachu();
        card.url = String::new();
        let html = presenter()
            .render_result(&RecommendationResponse {
                reply: String::new(),
                cards: vec![card],
            })
            .unwrap();

        assert!(html.contains("<h4>Pikachu</h4>"));
        assert!(!html.contains("Buy this card"));
        assert!(!html.contains(r#"href="""#));
    }

    #[test]
    fn page_wires_view_path_and_fragments() {
        let html = presenter().render_page().unwrap();
        assert!(html.contains(r#"fetch("/view""#));
        assert!(html.contains(LOADING_HTML));
        assert!(html.contains(VALIDATION_MESSAGE));
        assert!(html.contains(FAILURE_MESSAGE));
    }
}

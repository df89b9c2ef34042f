use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use pokestarter_core::domain::card::RecommendationResponse;
use pokestarter_core::domain::request::RecommendationRequest;
use pokestarter_core::error::AskError;
use pokestarter_core::present::{self, Presenter};
use pokestarter_core::recommend::RecommendationService;

pub const VIEW_PATH: &str = "/view";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn RecommendationService>,
    pub presenter: Arc<Presenter>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/ask", post(ask))
        .route(VIEW_PATH, post(view))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    state.presenter.render_page().map(Html).map_err(|e| {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %format!("{e:#}"), "page render failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[derive(Debug, Deserialize)]
struct AskBody {
    prompt: Option<String>,
    budget: Option<f64>,
}

async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskBody>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ask", %request_id);

    async move {
        let Json(body) =
            body.map_err(|rejection| AskError::validation(rejection.body_text()))?;
        let req = RecommendationRequest::new(
            body.prompt.as_deref().unwrap_or_default(),
            body.budget.unwrap_or(f64::NAN),
        )?;

        let res = state.service.recommend(&req).await?;
        tracing::info!(cards = res.cards.len(), "ask served");
        Ok::<_, ApiError>(Json(res))
    }
    .instrument(span)
    .await
}

#[derive(Debug, Default, Deserialize)]
struct ViewBody {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    budget: Value,
}

/// Renders the result fragment for the page. Always answers 200 with HTML.
async fn view(
    State(state): State<AppState>,
    body: Result<Json<ViewBody>, JsonRejection>,
) -> Html<String> {
    let Ok(Json(body)) = body else {
        return Html(present::render_error(present::VALIDATION_MESSAGE));
    };

    let budget = match &body.budget {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    };

    let request_id = Uuid::new_v4();
    let html = state
        .presenter
        .submit(state.service.as_ref(), &body.prompt, &budget)
        .instrument(tracing::info_span!("view", %request_id))
        .await;
    Html(html)
}

#[derive(Debug)]
pub struct ApiError(AskError);

impl From<AskError> for ApiError {
    fn from(err: AskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AskError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AskError::Upstream { upstream, .. } if self.0.is_timeout() => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("{upstream} timed out"),
            ),
            AskError::Upstream { upstream, .. } => (
                StatusCode::BAD_GATEWAY,
                format!("{upstream} is unavailable"),
            ),
        };

        if !self.0.is_validation() {
            let err = anyhow::Error::new(self.0);
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), %status, "ask failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

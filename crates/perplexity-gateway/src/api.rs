//! HTTP API exposing the chat client

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use perplexity_agent::{
    AgentError, ChatClient, ChatOptions, ChatResponse, Message, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::instrument;

/// Shared handler state. `client` is `None` when initialization failed.
#[derive(Clone)]
pub struct AppState {
    pub client: Option<Arc<ChatClient>>,
}

impl AppState {
    pub fn new(client: Option<ChatClient>) -> Self {
        Self {
            client: client.map(Arc::new),
        }
    }

    fn client(&self) -> Result<&ChatClient, ApiError> {
        self.client.as_deref().ok_or_else(ApiError::not_initialized)
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/chat", post(chat))
        .route("/full-response", post(full_response))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Error body in the `{"detail": ...}` shape
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_initialized() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: "Agent not initialized".to_string(),
        }
    }

    fn validation(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }

    fn upstream(context: &str, err: AgentError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: format!("{}: {}", context, err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => rejection.status(),
        };
        Self {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// JSON body extractor whose rejections use the same `{"detail": ...}` shape
/// as every other error.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Optional generation parameters shared by every POST body
#[derive(Debug, Default, Deserialize)]
pub struct GenerationParams {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(ApiError::validation(format!(
                    "temperature must be between 0.0 and 1.0, got {}",
                    temperature
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(ApiError::validation("max_tokens must be at least 1"));
        }
        Ok(())
    }

    fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn options(&self) -> ChatOptions {
        let mut options = ChatOptions::new()
            .with_model(self.model())
            .with_temperature(self.temperature.unwrap_or(DEFAULT_TEMPERATURE));
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

impl QuestionRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.question.is_empty() {
            return Err(ApiError::validation("question must not be empty"));
        }
        self.params.validate()
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub params: GenerationParams,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct FullResponse {
    pub response: ChatResponse,
}

/// Liveness metadata. Answers even when the client is unavailable.
async fn root() -> Json<Value> {
    Json(json!({
        "name": "Perplexity Agent API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

#[instrument(skip_all)]
async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.client()?;
    Ok(Json(json!({ "status": "healthy", "agent": "ready" })))
}

#[instrument(skip_all)]
async fn ask(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<QuestionRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let client = state.client()?;
    req.validate()?;

    let answer = client
        .ask(&req.question, &req.params.options())
        .await
        .map_err(|e| ApiError::upstream("Failed to get answer", e))?;

    Ok(Json(AnswerResponse {
        answer,
        model: req.params.model().to_string(),
    }))
}

#[instrument(skip_all)]
async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatBody>,
) -> Result<Json<FullResponse>, ApiError> {
    let client = state.client()?;
    req.params.validate()?;

    let response = client
        .send(&req.messages, &req.params.options())
        .await
        .map_err(|e| ApiError::upstream("Failed to chat", e))?;

    Ok(Json(FullResponse { response }))
}

#[instrument(skip_all)]
async fn full_response(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<QuestionRequest>,
) -> Result<Json<FullResponse>, ApiError> {
    let client = state.client()?;
    req.validate()?;

    let response = client
        .ask_full(&req.question, &req.params.options())
        .await
        .map_err(|e| ApiError::upstream("Failed to get full response", e))?;

    Ok(Json(FullResponse { response }))
}

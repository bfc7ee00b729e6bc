use crate::config::Config;
use crate::engine::Recognizer;
use crate::engines::EngineInfo;
use crate::error::OcrError;
use crate::mode::Mode;
use crate::solver::{self, Solution};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::Method,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recognizer: Arc<dyn Recognizer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(recognizer: Arc<dyn Recognizer>, config: Config) -> Self {
        Self {
            recognizer,
            config: Arc::new(config),
        }
    }
}

/// Solve response
#[derive(Serialize)]
pub struct SolveResponse {
    pub text: String,
    pub confidence: Option<f32>,
    pub mode: Mode,
    pub length: usize,
    pub processing_time_ms: u64,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub engine: EngineInfo,
    pub modes: Vec<Mode>,
    pub default_mode: Mode,
    pub max_file_size_bytes: usize,
}

/// Room for the multipart envelope and the mode/length fields
const MULTIPART_OVERHEAD: usize = 16 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    // Browser userscripts call the API from arbitrary pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/solve", post(handle_solve))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: Config, recognizer: Arc<dyn Recognizer>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = router(AppState::new(recognizer, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle CAPTCHA solve requests
async fn handle_solve(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SolveResponse>, OcrError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;
    let mut mode_field: Option<String> = None;
    let mut length_field: Option<String> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| OcrError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    OcrError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            "mode" => {
                mode_field = Some(field.text().await.map_err(|e| {
                    OcrError::InvalidRequest(format!("Invalid mode field: {}", e))
                })?);
            }
            "length" => {
                length_field = Some(field.text().await.map_err(|e| {
                    OcrError::InvalidRequest(format!("Invalid length field: {}", e))
                })?);
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let data = file_data.ok_or(OcrError::MissingFile)?;
    if data.is_empty() {
        return Err(OcrError::InvalidInput("Empty file".to_string()));
    }
    if data.len() > state.config.max_file_size {
        return Err(OcrError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let mode = match mode_field.as_deref().map(str::trim) {
        None | Some("") => Mode::default(),
        Some(value) => value.parse()?,
    };
    let length = parse_length(length_field.as_deref())?;
    let expected_length = (length > 0).then_some(length);

    let recognizer = Arc::clone(&state.recognizer);
    let task = tokio::task::spawn_blocking(move || {
        solver::solve_bytes(&data, recognizer.as_ref(), mode, expected_length)
    });

    let timeout_ms = state.config.solve_timeout_ms;
    let solution: Solution = tokio::time::timeout(Duration::from_millis(timeout_ms), task)
        .await
        .map_err(|_| OcrError::Timeout(timeout_ms))?
        .map_err(|e| OcrError::Internal(format!("Solver task failed: {}", e)))??;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "Solved in {}ms, mode: {}, text length: {}, confidence: {:?}",
        processing_time_ms,
        mode,
        solution.text.len(),
        solution.confidence
    );

    Ok(Json(SolveResponse {
        text: solution.text,
        confidence: solution.confidence,
        mode,
        length,
        processing_time_ms,
    }))
}

/// Parse the `length` form field; absent or blank means 0 (unconstrained)
fn parse_length(value: Option<&str>) -> Result<usize, OcrError> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(value) => value,
    };

    let length: i64 = value.parse().map_err(|_| {
        OcrError::InvalidRequest(format!("length must be an integer: {}", value))
    })?;

    usize::try_from(length)
        .map_err(|_| OcrError::InvalidArgument("length must be >= 0".to_string()))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: EngineInfo::of(state.recognizer.as_ref()),
        modes: Mode::ALL.to_vec(),
        default_mode: Mode::default(),
        max_file_size_bytes: state.config.max_file_size,
    })
}

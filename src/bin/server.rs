//! REST API server for WWC credential validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! wwccheck-server
//!
//! # With custom port and format table
//! wwccheck-server --port 8080 --formats formats.json
//!
//! # Verbose request logging
//! RUST_LOG=debug wwccheck-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::{Path, Query, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use wwc_validator::display::status_display_for;
use wwc_validator::expiry::{local_today, parse_expiry_date};
use wwc_validator::{
    BatchSummary, BatchValidator, Credential, FormatTable, StatusDisplay, ValidationResult,
    Validator,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WWC Credential Validator API",
        version = "0.1.0",
        description = "Format and expiry validation for Australian Working With Children credentials. Checks structure only; it does not contact issuing authorities.",
        license(name = "MIT OR Apache-2.0"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Validation", description = "Credential number and expiry validation"),
        (name = "Detection", description = "Issuing region detection"),
        (name = "Expiry", description = "Expiry date checks"),
        (name = "Reference", description = "Supported formats and status presentation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        validate_credential,
        validate_batch,
        detect_region_handler,
        validate_expiry_handler,
        list_formats,
        status_display_handler,
        health,
    ),
    components(schemas(
        ValidateRequest,
        ValidateResponse,
        DisplayResponse,
        BatchValidateRequest,
        BatchValidateResponse,
        BatchSummaryResponse,
        DetectQuery,
        DetectResponse,
        ExpiryRequest,
        ExpiryResponse,
        FormatResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"number": "WWC-1234567-12", "expiry": "2026-03-25"}))]
struct ValidateRequest {
    /// Credential number. Case and surrounding whitespace are ignored.
    number: String,
    /// Expiry date. Accepts YYYY-MM-DD, DD/MM/YYYY, "25 March 2026" and ISO datetimes.
    #[serde(default)]
    expiry: Option<String>,
    /// Date to validate against (YYYY-MM-DD). Defaults to the server's local date.
    #[serde(default)]
    today: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct DisplayResponse {
    /// Status label
    label: &'static str,
    /// Colour name: green, yellow, red or gray
    color: &'static str,
    /// Background CSS class
    bg_class: &'static str,
    /// Text CSS class
    text_class: &'static str,
    /// Emoji icon
    icon: &'static str,
}

impl From<StatusDisplay> for DisplayResponse {
    fn from(d: StatusDisplay) -> Self {
        Self {
            label: d.label,
            color: d.color,
            bg_class: d.bg_class,
            text_class: d.text_class,
            icon: d.icon,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "valid": true,
    "region": "VIC",
    "region_name": "Victoria",
    "status": "Expiring Soon",
    "messages": ["credential expires in 12 days"],
    "normalized_number": "WWC-1234567-12",
    "expiry_date": "2026-03-25",
    "days_until_expiry": 12,
    "display": {"label": "Expiring Soon", "color": "yellow", "bg_class": "bg-yellow-100", "text_class": "text-yellow-800", "icon": "⚠️"}
}))]
struct ValidateResponse {
    /// True when the number matched a region and the credential is active or expiring soon
    valid: bool,
    /// Region code (VIC, NSW, QLD, SA, WA, TAS, NT, ACT)
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'static str>,
    /// Full region name
    #[serde(skip_serializing_if = "Option::is_none")]
    region_name: Option<&'static str>,
    /// Active, Expiring Soon, Expired, Invalid or Unknown
    status: &'static str,
    /// Errors and warnings, number problems first
    messages: Vec<String>,
    /// Trimmed, uppercased credential number
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized_number: Option<String>,
    /// Parsed expiry date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_date: Option<String>,
    /// Whole days until expiry; negative once expired
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_expiry: Option<i64>,
    /// How to present the status
    display: DisplayResponse,
}

impl From<ValidationResult> for ValidateResponse {
    fn from(r: ValidationResult) -> Self {
        Self {
            valid: r.is_valid,
            region: r.region.map(|region| region.code()),
            region_name: r.region_name(),
            status: r.status.label(),
            messages: r.messages(),
            display: r.display().into(),
            normalized_number: r.normalized_number,
            expiry_date: r.expiry_date.map(|d| d.format("%Y-%m-%d").to_string()),
            days_until_expiry: r.days_until_expiry,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"credentials": [
    {"number": "WWC1234567E", "expiry": "2026-12-31"},
    {"number": "SA12345678", "expiry": "2019-10-24"}
]}))]
struct BatchValidateRequest {
    /// Credentials to validate
    #[schema(value_type = Vec<Object>)]
    credentials: Vec<Credential>,
    /// Date to validate against (YYYY-MM-DD)
    #[serde(default)]
    today: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct BatchValidateResponse {
    /// Validation results, in request order
    results: Vec<ValidateResponse>,
    /// Summary statistics
    summary: BatchSummaryResponse,
}

#[derive(Serialize, ToSchema)]
struct BatchSummaryResponse {
    /// Credentials processed
    total: usize,
    /// Credentials that passed
    valid: usize,
    /// Credentials that failed
    invalid: usize,
    /// Active credentials
    active: usize,
    /// Credentials within the warning window
    expiring_soon: usize,
    /// Expired credentials
    expired: usize,
    /// Credentials with a missing or unparseable expiry date
    invalid_expiry: usize,
    /// Credentials whose number matched no region
    unrecognized_number: usize,
}

impl From<BatchSummary> for BatchSummaryResponse {
    fn from(s: BatchSummary) -> Self {
        Self {
            total: s.total,
            valid: s.valid,
            invalid: s.invalid,
            active: s.active,
            expiring_soon: s.expiring_soon,
            expired: s.expired,
            invalid_expiry: s.invalid_expiry,
            unrecognized_number: s.unrecognized_number,
        }
    }
}

#[derive(Deserialize, ToSchema, IntoParams)]
struct DetectQuery {
    /// Credential number
    number: String,
}

#[derive(Serialize, ToSchema)]
struct DetectResponse {
    /// Region code, absent when no format matched
    region: Option<&'static str>,
    /// Full region name
    region_name: Option<&'static str>,
    /// Trimmed, uppercased number
    normalized_number: Option<String>,
    /// Problems found
    messages: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"expiry": "25/03/2026"}))]
struct ExpiryRequest {
    /// Expiry date
    expiry: String,
    /// Date to check against (YYYY-MM-DD)
    #[serde(default)]
    today: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct ExpiryResponse {
    /// True for Active and Expiring Soon
    valid: bool,
    /// Lifecycle status
    status: &'static str,
    /// Parsed expiry date (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_date: Option<String>,
    /// Whole days until expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    days_until_expiry: Option<i64>,
    /// Errors and warnings
    messages: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct FormatResponse {
    /// Region code
    code: &'static str,
    /// Region name
    display_name: String,
    /// Anchored regular expression over the normalized number
    pattern: String,
    /// Example number
    example: String,
    /// Credential description
    description: String,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
    /// Number of formats loaded
    formats: usize,
}

// ============================================================================
// State
// ============================================================================

struct AppState {
    validator: Validator,
}

type SharedState = Arc<AppState>;
type ApiError = (StatusCode, String);

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, ApiError> {
    match today {
        Some(s) => parse_expiry_date(s)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid 'today': {}", e))),
        None => Ok(local_today()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a credential number and expiry date
#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse),
        (status = 400, description = "Unparseable 'today'")
    ),
    tag = "Validation"
)]
async fn validate_credential(
    State(state): State<SharedState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let today = resolve_today(req.today.as_deref())?;
    let result = state
        .validator
        .validate_at(&req.number, req.expiry.as_deref(), today);

    tracing::debug!(
        region = ?result.region,
        status = %result.status,
        valid = result.is_valid,
        "validated credential"
    );

    Ok(Json(result.into()))
}

/// Validate multiple credentials
#[utoipa::path(
    post,
    path = "/validate/batch",
    request_body = BatchValidateRequest,
    responses(
        (status = 200, description = "Batch validation results", body = BatchValidateResponse),
        (status = 400, description = "Unparseable 'today'")
    ),
    tag = "Validation"
)]
async fn validate_batch(
    State(state): State<SharedState>,
    Json(req): Json<BatchValidateRequest>,
) -> Result<Json<BatchValidateResponse>, ApiError> {
    let today = resolve_today(req.today.as_deref())?;
    let results = BatchValidator::new()
        .with_validator(state.validator.clone())
        .as_of(today)
        .validate_all(&req.credentials);
    let summary = BatchSummary::from_results(&results);

    tracing::debug!(
        total = summary.total,
        valid = summary.valid,
        "validated batch"
    );

    Ok(Json(BatchValidateResponse {
        results: results.into_iter().map(Into::into).collect(),
        summary: summary.into(),
    }))
}

/// Detect the issuing region of a credential number
#[utoipa::path(
    get,
    path = "/detect",
    params(DetectQuery),
    responses(
        (status = 200, description = "Detected region", body = DetectResponse)
    ),
    tag = "Detection"
)]
async fn detect_region_handler(
    State(state): State<SharedState>,
    Query(query): Query<DetectQuery>,
) -> Json<DetectResponse> {
    let check = state.validator.validate_number(&query.number);

    Json(DetectResponse {
        region: check.region.map(|r| r.code()),
        region_name: check.region_name(),
        messages: check.errors.iter().map(|e| e.to_string()).collect(),
        normalized_number: check.normalized_number,
    })
}

/// Check an expiry date
#[utoipa::path(
    post,
    path = "/expiry/validate",
    request_body = ExpiryRequest,
    responses(
        (status = 200, description = "Expiry check result", body = ExpiryResponse),
        (status = 400, description = "Unparseable 'today'")
    ),
    tag = "Expiry"
)]
async fn validate_expiry_handler(
    State(state): State<SharedState>,
    Json(req): Json<ExpiryRequest>,
) -> Result<Json<ExpiryResponse>, ApiError> {
    let today = resolve_today(req.today.as_deref())?;
    let check = state.validator.check_expiry(req.expiry.as_str(), today);

    Ok(Json(ExpiryResponse {
        valid: check.is_valid,
        status: check.status.label(),
        expiry_date: check.expiry_date.map(|d| d.format("%Y-%m-%d").to_string()),
        days_until_expiry: check.days_until_expiry,
        messages: check.errors.iter().map(|e| e.to_string()).collect(),
    }))
}

/// List supported credential formats
#[utoipa::path(
    get,
    path = "/formats",
    responses(
        (status = 200, description = "Formats in match order", body = Vec<FormatResponse>)
    ),
    tag = "Reference"
)]
async fn list_formats(State(state): State<SharedState>) -> Json<Vec<FormatResponse>> {
    Json(
        state
            .validator
            .table()
            .formats()
            .map(|f| FormatResponse {
                code: f.code(),
                display_name: f.display_name.to_string(),
                pattern: f.pattern.to_string(),
                example: f.example.to_string(),
                description: f.description.to_string(),
            })
            .collect(),
    )
}

/// Presentation for a status label
///
/// Unrecognised labels get the gray Unknown descriptor.
#[utoipa::path(
    get,
    path = "/status/{status}/display",
    params(("status" = String, Path, description = "Status label, e.g. Active or expiring-soon")),
    responses(
        (status = 200, description = "Status presentation", body = DisplayResponse)
    ),
    tag = "Reference"
)]
async fn status_display_handler(Path(status): Path<String>) -> Json<DisplayResponse> {
    Json(status_display_for(&status).into())
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        formats: state.validator.table().len(),
    })
}

// ============================================================================
// Main
// ============================================================================

fn arg_value(name: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != name).nth(1)
}

fn load_validator() -> Result<Validator, wwc_validator::FormatTableError> {
    match arg_value("--formats") {
        Some(path) => {
            let table = FormatTable::from_json_file(&path)?;
            tracing::info!(path = %path, formats = table.len(), "loaded format table");
            Ok(Validator::new().with_table(table))
        }
        None => {
            tracing::info!("using built-in format table");
            Ok(Validator::new())
        }
    }
}

fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/validate", post(validate_credential))
        .route("/validate/batch", post(validate_batch))
        .route("/detect", get(detect_region_handler))
        .route("/expiry/validate", post(validate_expiry_handler))
        .route("/formats", get(list_formats))
        .route("/status/:status/display", get(status_display_handler))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = match arg_value("--port") {
        Some(p) => p.parse().map_err(|e| {
            tracing::warn!(port = %p, "invalid --port value");
            e
        })?,
        None => 3000,
    };

    let validator = load_validator().map_err(|e| {
        tracing::error!(error = %e, "failed to load format table");
        e
    })?;
    let state = Arc::new(AppState { validator });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}:{}/swagger-ui/", "localhost", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

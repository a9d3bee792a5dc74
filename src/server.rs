//! JSON HTTP server exposing the CRM endpoints.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/setup` | Create the schema (idempotent) |
//! | `POST` | `/add_contact` | Create a contact |
//! | `POST` | `/add_interaction` | Log an interaction |
//! | `POST` | `/add_ai_note` | Attach a note to an interaction |
//! | `POST` | `/add_followup` | Schedule a followup |
//! | `GET`  | `/check_followups` | Claim and return due followups |
//! | `POST` | `/generate_ai_note` | Synthesize a note from interaction content |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses carry a flat JSON body:
//!
//! ```json
//! { "error": "contact_id, type, content required" }
//! ```
//!
//! Missing required fields → 400, unknown interaction on generate → 404,
//! storage failures → 500.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

use crate::ai_notes;
use crate::clock;
use crate::config::Config;
use crate::contacts::{self, NewContact};
use crate::db;
use crate::followups::{self, NewFollowup};
use crate::interactions::{self, NewInteraction};
use crate::migrate;
use crate::models::Followup;

/// Shared application state: one pool for every handler, rather than a
/// fresh connection per request.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and serves until
/// the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    let app = router(pool);

    println!("crmd listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router over an existing pool. Split out of
/// [`run_server`] so tests can serve it on an ephemeral port.
pub fn router(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/setup", post(handle_setup))
        .route("/add_contact", post(handle_add_contact))
        .route("/add_interaction", post(handle_add_interaction))
        .route("/add_ai_note", post(handle_add_ai_note))
        .route("/add_followup", post(handle_add_followup))
        .route("/check_followups", get(handle_check_followups))
        .route("/generate_ai_note", post(handle_generate_ai_note))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { pool })
}

// ============ Error response ============

/// Flat JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: message.into(),
    }
}

/// Maps a storage-layer failure to 500. Validation never reaches here —
/// required fields are checked before any statement runs.
fn internal(err: anyhow::Error) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: err.to_string(),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /setup ============

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

/// Handler for `POST /setup`. Idempotent: re-running it against an
/// existing database is a no-op.
async fn handle_setup(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    migrate::run_migrations(&state.pool).await.map_err(internal)?;
    Ok(Json(MessageResponse {
        message: "Database setup complete".to_string(),
    }))
}

// ============ POST /add_contact ============

#[derive(Deserialize)]
struct AddContactRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    notes: Option<String>,
}

#[derive(Serialize)]
struct CreatedResponse {
    id: i64,
    message: String,
}

async fn handle_add_contact(
    State(state): State<AppState>,
    Json(req): Json<AddContactRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let name = match req.name {
        Some(n) if !n.trim().is_empty() => n,
        _ => return Err(bad_request("Name required")),
    };

    let id = contacts::create_contact(
        &state.pool,
        &NewContact {
            name,
            email: req.email,
            phone: req.phone,
            notes: req.notes,
        },
    )
    .await
    .map_err(internal)?;

    Ok(Json(CreatedResponse {
        id,
        message: "Contact added".to_string(),
    }))
}

// ============ POST /add_interaction ============

#[derive(Deserialize)]
struct AddInteractionRequest {
    contact_id: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    timestamp: Option<String>,
    content: Option<String>,
    source: Option<String>,
}

async fn handle_add_interaction(
    State(state): State<AppState>,
    Json(req): Json<AddInteractionRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (contact_id, kind, content) = match (req.contact_id, req.kind, req.content) {
        (Some(c), Some(k), Some(body)) if !k.is_empty() && !body.is_empty() => (c, k, body),
        _ => return Err(bad_request("contact_id, type, content required")),
    };

    let id = interactions::create_interaction(
        &state.pool,
        &NewInteraction {
            contact_id,
            kind,
            timestamp: req.timestamp,
            content,
            source: req.source,
        },
    )
    .await
    .map_err(internal)?;

    Ok(Json(CreatedResponse {
        id,
        message: "Interaction added".to_string(),
    }))
}

// ============ POST /add_ai_note ============

#[derive(Deserialize)]
struct AddAiNoteRequest {
    interaction_id: Option<i64>,
    note: Option<String>,
}

async fn handle_add_ai_note(
    State(state): State<AppState>,
    Json(req): Json<AddAiNoteRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (interaction_id, note) = match (req.interaction_id, req.note) {
        (Some(i), Some(n)) if !n.is_empty() => (i, n),
        _ => return Err(bad_request("interaction_id and note required")),
    };

    let id = ai_notes::create_note(&state.pool, interaction_id, &note)
        .await
        .map_err(internal)?;

    Ok(Json(CreatedResponse {
        id,
        message: "AI note added".to_string(),
    }))
}

// ============ POST /add_followup ============

#[derive(Deserialize)]
struct AddFollowupRequest {
    contact_id: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    scheduled_time: Option<String>,
    message: Option<String>,
}

async fn handle_add_followup(
    State(state): State<AppState>,
    Json(req): Json<AddFollowupRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (contact_id, kind, scheduled_time, message) =
        match (req.contact_id, req.kind, req.scheduled_time, req.message) {
            (Some(c), Some(k), Some(s), Some(m))
                if !k.is_empty() && !s.is_empty() && !m.is_empty() =>
            {
                (c, k, s, m)
            }
            _ => {
                return Err(bad_request(
                    "contact_id, type, scheduled_time, message required",
                ))
            }
        };

    let id = followups::create_followup(
        &state.pool,
        &NewFollowup {
            contact_id,
            kind,
            scheduled_time,
            message,
        },
    )
    .await
    .map_err(internal)?;

    Ok(Json(CreatedResponse {
        id,
        message: "Followup added".to_string(),
    }))
}

// ============ GET /check_followups ============

/// Handler for `GET /check_followups`.
///
/// Claims every pending followup whose `scheduled_time` has elapsed and
/// returns the claimed records, each already marked `sent`. An immediate
/// second call returns an empty list.
async fn handle_check_followups(
    State(state): State<AppState>,
) -> Result<Json<Vec<Followup>>, ApiError> {
    let now = clock::now_iso();
    let claimed = followups::claim_due(&state.pool, &now)
        .await
        .map_err(internal)?;
    Ok(Json(claimed))
}

// ============ POST /generate_ai_note ============

#[derive(Deserialize)]
struct GenerateAiNoteRequest {
    interaction_id: Option<i64>,
}

#[derive(Serialize)]
struct GeneratedNoteResponse {
    id: i64,
    note: String,
}

async fn handle_generate_ai_note(
    State(state): State<AppState>,
    Json(req): Json<GenerateAiNoteRequest>,
) -> Result<Json<GeneratedNoteResponse>, ApiError> {
    let interaction_id = req
        .interaction_id
        .ok_or_else(|| bad_request("interaction_id required"))?;

    let (id, note) = ai_notes::generate_note(&state.pool, interaction_id)
        .await
        .map_err(|e| {
            if e.to_string().contains("not found") {
                not_found("Interaction not found")
            } else {
                internal(e)
            }
        })?;

    Ok(Json(GeneratedNoteResponse { id, note }))
}

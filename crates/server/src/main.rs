// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use leasehold_api::{
    AccountCreatedRequest, AccountCreatedResponse, AgentLifecycleResponse, ApiError,
    ApproveResponse, InMemoryUserDirectory, InviteRequest, InviteResponse, LifecycleConfig,
    ListInvitationsResponse, RegisterAgentRequest, RegisterAgentResponse, SuspendRequest,
    SuspensionInfo, UnsuspendResponse, VerifyTokenRequest, VerifyTokenResponse, account_created,
    agent_lifecycle, approve, invite, list_invitations, register_agent, suspend, unsuspend,
    verify_token,
};
use leasehold_domain::{AgentId, LandlordId};
use leasehold_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Leasehold Server - HTTP server for agent invitations, approvals and suspensions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Number of days an invitation stays redeemable
    #[arg(long, default_value_t = leasehold_api::DEFAULT_INVITATION_TTL_DAYS)]
    invitation_ttl_days: i64,
}

/// Application state shared across handlers.
///
/// The persistence layer and user directory are each wrapped in a Mutex to
/// allow safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for invitation events and suspensions.
    persistence: Arc<Mutex<Persistence>>,
    /// The user directory registrations create accounts in.
    directory: Arc<Mutex<InMemoryUserDirectory>>,
    /// Lifecycle settings.
    config: LifecycleConfig,
}

/// API request for sending an invitation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InviteApiRequest {
    /// The email to invite.
    email: String,
    /// The agent's first name.
    first_name: String,
    /// The agent's last name.
    last_name: String,
    /// The agent's phone number.
    #[serde(default)]
    phone: Option<String>,
}

/// Query parameters for token verification.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct VerifyTokenQuery {
    /// The presented token.
    token: String,
    /// The email the presenter claims.
    #[serde(default)]
    email: Option<String>,
}

/// API request recording an externally created account.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AccountCreatedApiRequest {
    /// The invited email.
    email: String,
    /// The created agent profile.
    agent_id: i64,
    /// The created user account.
    agent_user_id: i64,
}

/// API request for redeeming an invitation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterAgentApiRequest {
    /// The presented token.
    token: String,
    /// The email the agent registers with.
    email: String,
    /// The agent's first name.
    first_name: String,
    /// The agent's last name.
    last_name: String,
    /// The agent's phone number.
    #[serde(default)]
    phone: Option<String>,
}

/// API request for suspending an agent.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SuspendApiRequest {
    /// The reason code.
    reason_code: String,
    /// Verbatim reason text; required for `OTHER`.
    #[serde(default)]
    reason_text: Option<String>,
    /// Notes shown to the agent.
    #[serde(default)]
    notes: Option<String>,
    /// Length of the suspension in days.
    duration_days: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::TokenExpired { .. } => StatusCode::GONE,
            ApiError::TokenAlreadyUsed { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::TokenEmailMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/landlords/{landlord_id}/invitations` endpoint.
///
/// Sends or re-sends an invitation.
async fn handle_invite(
    AxumState(app_state): AxumState<AppState>,
    Path(landlord_id): Path<i64>,
    Json(req): Json<InviteApiRequest>,
) -> Result<Json<InviteResponse>, HttpError> {
    info!(landlord_id, "Handling invite request");

    let request: InviteRequest = InviteRequest {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: InviteResponse = invite(
        &mut persistence,
        &app_state.config,
        LandlordId::new(landlord_id),
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/landlords/{landlord_id}/invitations` endpoint.
///
/// Lists the landlord's invitations, most recently active first.
async fn handle_list_invitations(
    AxumState(app_state): AxumState<AppState>,
    Path(landlord_id): Path<i64>,
) -> Result<Json<ListInvitationsResponse>, HttpError> {
    info!(landlord_id, "Handling list_invitations request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListInvitationsResponse = list_invitations(
        &mut persistence,
        LandlordId::new(landlord_id),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/invitations/verify` endpoint.
///
/// Checks a token without consuming it.
async fn handle_verify_token(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<VerifyTokenQuery>,
) -> Result<Json<VerifyTokenResponse>, HttpError> {
    info!("Handling verify_token request");

    let request: VerifyTokenRequest = VerifyTokenRequest {
        token: query.token,
        email: query.email,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: VerifyTokenResponse =
        verify_token(&mut persistence, &request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/invitations/account_created` endpoint.
async fn handle_account_created(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AccountCreatedApiRequest>,
) -> Result<Json<AccountCreatedResponse>, HttpError> {
    info!(agent_id = req.agent_id, "Handling account_created request");

    let request: AccountCreatedRequest = AccountCreatedRequest {
        email: req.email,
        agent_id: req.agent_id,
        agent_user_id: req.agent_user_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AccountCreatedResponse =
        account_created(&mut persistence, &request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/invitations/register` endpoint.
///
/// Redeems a token and creates the agent's account.
async fn handle_register_agent(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterAgentApiRequest>,
) -> Result<Json<RegisterAgentResponse>, HttpError> {
    info!("Handling register_agent request");

    let request: RegisterAgentRequest = RegisterAgentRequest {
        token: req.token,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
    };

    let mut persistence = app_state.persistence.lock().await;
    let mut directory = app_state.directory.lock().await;
    let response: RegisterAgentResponse = register_agent(
        &mut persistence,
        &mut *directory,
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(directory);
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/landlords/{landlord_id}/agents/{agent_id}/approve` endpoint.
async fn handle_approve(
    AxumState(app_state): AxumState<AppState>,
    Path((landlord_id, agent_id)): Path<(i64, i64)>,
) -> Result<Json<ApproveResponse>, HttpError> {
    info!(landlord_id, agent_id, "Handling approve request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ApproveResponse = approve(
        &mut persistence,
        LandlordId::new(landlord_id),
        AgentId::new(agent_id),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/landlords/{landlord_id}/agents/{agent_id}/suspension` endpoint.
///
/// Suspends an approved agent, replacing any earlier suspension.
async fn handle_suspend(
    AxumState(app_state): AxumState<AppState>,
    Path((landlord_id, agent_id)): Path<(i64, i64)>,
    Json(req): Json<SuspendApiRequest>,
) -> Result<Json<SuspensionInfo>, HttpError> {
    info!(
        landlord_id,
        agent_id,
        reason_code = %req.reason_code,
        "Handling suspend request"
    );

    let request: SuspendRequest = SuspendRequest {
        reason_code: req.reason_code,
        reason_text: req.reason_text,
        notes: req.notes,
        duration_days: req.duration_days,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SuspensionInfo = suspend(
        &mut persistence,
        LandlordId::new(landlord_id),
        AgentId::new(agent_id),
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/landlords/{landlord_id}/agents/{agent_id}/suspension` endpoint.
async fn handle_unsuspend(
    AxumState(app_state): AxumState<AppState>,
    Path((landlord_id, agent_id)): Path<(i64, i64)>,
) -> Result<Json<UnsuspendResponse>, HttpError> {
    info!(landlord_id, agent_id, "Handling unsuspend request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UnsuspendResponse = unsuspend(
        &mut persistence,
        LandlordId::new(landlord_id),
        AgentId::new(agent_id),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/agents/{agent_id}/lifecycle` endpoint.
///
/// Reports what the agent's dashboard should render.
async fn handle_agent_lifecycle(
    AxumState(app_state): AxumState<AppState>,
    Path(agent_id): Path<i64>,
) -> Result<Json<AgentLifecycleResponse>, HttpError> {
    info!(agent_id, "Handling agent_lifecycle request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AgentLifecycleResponse = agent_lifecycle(
        &mut persistence,
        AgentId::new(agent_id),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/landlords/{landlord_id}/invitations",
            post(handle_invite).get(handle_list_invitations),
        )
        .route("/invitations/verify", get(handle_verify_token))
        .route("/invitations/account_created", post(handle_account_created))
        .route("/invitations/register", post(handle_register_agent))
        .route(
            "/landlords/{landlord_id}/agents/{agent_id}/approve",
            post(handle_approve),
        )
        .route(
            "/landlords/{landlord_id}/agents/{agent_id}/suspension",
            post(handle_suspend).delete(handle_unsuspend),
        )
        .route("/agents/{agent_id}/lifecycle", get(handle_agent_lifecycle))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Leasehold Server");

    let config: LifecycleConfig = LifecycleConfig::with_invitation_ttl_days(args.invitation_ttl_days)?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        directory: Arc::new(Mutex::new(InMemoryUserDirectory::new())),
        config,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP Handlers

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, FromRequestParts, Path, State};
use axum::http::{HeaderMap, StatusCode, request::Parts};
use serde_json::{Value, json};

use platform::client::ClientMeta;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::application::{
    AdminUsersUseCase, ChangePasswordInput, LoginInput, LoginUseCase, LogoutUseCase,
    ProfileUseCase, RefreshUseCase, RegisterInput, RegisterUseCase, UpdateProfileInput,
};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::{UserId, session_id::SessionId, user_role::UserRole};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ApiJson, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest,
    UpdateRoleRequest, UpdateStatusRequest, UserResponse,
};
use crate::presentation::middleware::AuthContext;

/// Header carrying the session id at logout
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config));
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens,
        }
    }
}

/// Client metadata for the current request
///
/// The peer address is used only when the server was started with
/// `into_make_service_with_connect_info`; otherwise only headers count.
#[derive(Debug, Clone)]
pub struct Client(pub ClientMeta);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self(ClientMeta::from_headers(&parts.headers, direct_ip)))
    }
}

// ============================================================================
// Login / Register / Refresh / Logout
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Client(client): Client,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AuthStore,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(
            LoginInput {
                username: req.username,
                password: req.password,
            },
            client,
        )
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        session_id: output.session_id.to_string(),
        user: UserResponse::from(&output.user),
        expires_at: output.expires_at,
    }))
}

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Client(client): Client,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: AuthStore,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(
            RegisterInput {
                username: req.username,
                email: req.email,
                password: req.password,
                first_name: req.first_name,
                last_name: req.last_name,
            },
            client,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: AuthStore,
{
    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

/// POST /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    Client(client): Client,
    headers: HeaderMap,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
{
    let raw = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let session_id = SessionId::from_client(raw)?;

    let use_case = LogoutUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.execute(&session_id, client).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /auth/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let use_case =
        ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let user = use_case.get(auth.user_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /auth/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
    Client(client): Client,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let use_case =
        ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let user = use_case
        .update(
            auth.user_id,
            UpdateProfileInput {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
            },
            client,
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
    Client(client): Client,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthStore,
{
    let use_case =
        ProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    use_case
        .change_password(
            auth.user_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
            client,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

// ============================================================================
// Admin
// ============================================================================

/// PUT /admin/users/{id}/role
pub async fn update_user_role<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
    Path(id): Path<String>,
    Client(client): Client,
    ApiJson(req): ApiJson<UpdateRoleRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let target: UserId = id.parse()?;
    let role: UserRole = req.role.parse()?;

    let use_case = AdminUsersUseCase::new(state.repo.clone(), state.repo.clone());
    let user = use_case.set_role(auth.user_id, target, role, client).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /admin/users/{id}/status
pub async fn update_user_status<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthContext,
    Path(id): Path<String>,
    Client(client): Client,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let target: UserId = id.parse()?;

    let use_case = AdminUsersUseCase::new(state.repo.clone(), state.repo.clone());
    let user = use_case
        .set_active(auth.user_id, target, req.is_active, client)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}


//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{RoleGuard, require_auth, require_role};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Routes:
/// - public: `/auth/login`, `/auth/register`, `/auth/refresh`, `/auth/logout`
/// - bearer token: `/auth/profile`, `/auth/change-password`
/// - bearer token + admin: `/admin/users/{id}/role`, `/admin/users/{id}/status`
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthStore,
{
    let state = AuthAppState::new(repo, config);
    let tokens = state.tokens.clone();

    let public = Router::new()
        .route("/auth/login", post(handlers::login::<R>))
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/refresh", post(handlers::refresh::<R>))
        .route("/auth/logout", post(handlers::logout::<R>));

    let protected = Router::new()
        .route(
            "/auth/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route("/auth/change-password", post(handlers::change_password::<R>))
        .route_layer(from_fn_with_state(tokens.clone(), require_auth));

    // Last layer added runs first: authenticate, then check the role
    let admin = Router::new()
        .route("/admin/users/{id}/role", put(handlers::update_user_role::<R>))
        .route("/admin/users/{id}/status", put(handlers::update_user_status::<R>))
        .route_layer(from_fn_with_state(RoleGuard::admin_only(), require_role))
        .route_layer(from_fn_with_state(tokens, require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(admin)
        .with_state(state)
}

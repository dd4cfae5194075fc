//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, Client, health};
pub use middleware::{AuthContext, RoleGuard, authenticate, require_auth, require_role};
pub use router::{auth_router, auth_router_generic};

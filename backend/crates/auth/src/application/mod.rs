//! Application Layer
//!
//! Use cases and application services.

pub mod admin_users;
pub mod audit;
pub mod config;
pub mod login;
pub mod login_attempts;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod token_service;

// Re-exports
pub use admin_users::AdminUsersUseCase;
pub use config::{AuthConfig, ConfigError};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use login_attempts::LoginAttemptTracker;
pub use logout::LogoutUseCase;
pub use profile::{ChangePasswordInput, ProfileUseCase, UpdateProfileInput};
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token_service::{Claims, TokenService};

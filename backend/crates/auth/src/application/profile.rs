//! Profile Use Cases
//!
//! Read and update the caller's own record, and change their password.

use std::sync::Arc;

use platform::client::ClientMeta;

use crate::application::audit::AuditTrail;
use crate::application::config::AuthConfig;
use crate::domain::entity::{audit_log::AuditLogEntry, user::User};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::{
    UserId,
    audit_action::AuditAction,
    email::Email,
    user_name::PersonName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Profile update input; absent or blank fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Password change input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ProfileUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    user_repo: Arc<U>,
    audit: AuditTrail<A>,
    config: Arc<AuthConfig>,
}

impl<U, A> ProfileUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    pub fn new(user_repo: Arc<U>, audit_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            audit: AuditTrail::new(audit_repo),
            config,
        }
    }

    pub async fn get(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
        client: ClientMeta,
    ) -> AuthResult<User> {
        let first_name = non_blank(input.first_name)
            .map(|s| PersonName::new(&s))
            .transpose()?;
        let last_name = non_blank(input.last_name)
            .map(|s| PersonName::new(&s))
            .transpose()?;
        let email = non_blank(input.email).map(Email::new).transpose()?;

        let mut user = self.get(user_id).await?;
        user.update_profile(first_name, last_name, email);
        self.user_repo.update(&user).await?;

        self.audit
            .record(AuditLogEntry::user_event(
                user_id,
                AuditAction::Update,
                user_id,
                "Profile updated",
                &client,
            ))
            .await;

        tracing::info!(user_id = %user_id, "Profile updated");

        Ok(user)
    }

    pub async fn change_password(
        &self,
        user_id: UserId,
        input: ChangePasswordInput,
        client: ClientMeta,
    ) -> AuthResult<()> {
        let new_password = RawPassword::new(input.new_password)?;
        let mut user = self.get(user_id).await?;

        let current = RawPassword::submitted(input.current_password);
        if !user.password.verify(&current, &self.config.hash_params)? {
            tracing::warn!(user_id = %user_id, "Password change with wrong current password");
            return Err(AuthError::IncorrectCurrentPassword);
        }

        user.set_password(UserPassword::from_raw(&new_password, &self.config.hash_params)?);
        self.user_repo.update(&user).await?;

        self.audit
            .record(AuditLogEntry::user_event(
                user_id,
                AuditAction::ChangePassword,
                user_id,
                "Password changed",
                &client,
            ))
            .await;

        tracing::info!(user_id = %user_id, "Password changed");

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::test_support::test_config;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::user_name::UserName;
    use crate::infra::memory::MemoryAuthRepository;

    type Profile = ProfileUseCase<MemoryAuthRepository, MemoryAuthRepository>;

    async fn setup() -> (Arc<MemoryAuthRepository>, Profile, UserId) {
        let config = Arc::new(test_config());
        let repo = Arc::new(MemoryAuthRepository::new());
        let raw = RawPassword::new("Str0ng!Pw".to_string()).unwrap();
        let user = UserRepository::create(
            &*repo,
            &NewUser::register(
                UserName::new("dave").unwrap(),
                Email::new("dave@example.com").unwrap(),
                UserPassword::from_raw(&raw, &config.hash_params).unwrap(),
                PersonName::new("Dave").unwrap(),
                PersonName::new("Smith").unwrap(),
            ),
        )
        .await
        .unwrap();
        let uc = ProfileUseCase::new(repo.clone(), repo.clone(), config);
        (repo, uc, user.id)
    }

    #[tokio::test]
    async fn test_update_only_non_blank_fields() {
        let (repo, uc, id) = setup().await;
        let input = UpdateProfileInput {
            first_name: Some("David".into()),
            last_name: Some("   ".into()),
            email: None,
        };

        let user = uc.update(id, input, ClientMeta::default()).await.unwrap();
        assert_eq!(user.first_name.as_str(), "David");
        assert_eq!(user.last_name.as_str(), "Smith");
        assert_eq!(user.email.as_str(), "dave@example.com");
        assert_eq!(uc.get(id).await.unwrap().first_name.as_str(), "David");
        assert_eq!(repo.audit_entries()[0].action, AuditAction::Update);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_email() {
        let (_, uc, id) = setup().await;
        let input = UpdateProfileInput {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.update(id, input, ClientMeta::default()).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_change_password() {
        let (_, uc, id) = setup().await;

        let wrong = uc
            .change_password(
                id,
                ChangePasswordInput {
                    current_password: "nope".into(),
                    new_password: "N3w!Passw0rd".into(),
                },
                ClientMeta::default(),
            )
            .await;
        assert!(matches!(wrong, Err(AuthError::IncorrectCurrentPassword)));

        let weak = uc
            .change_password(
                id,
                ChangePasswordInput {
                    current_password: "Str0ng!Pw".into(),
                    new_password: "weak".into(),
                },
                ClientMeta::default(),
            )
            .await;
        assert!(matches!(weak, Err(AuthError::Validation(_))));

        uc.change_password(
            id,
            ChangePasswordInput {
                current_password: "Str0ng!Pw".into(),
                new_password: "N3w!Passw0rd".into(),
            },
            ClientMeta::default(),
        )
        .await
        .unwrap();

        let user = uc.get(id).await.unwrap();
        let params = test_config().hash_params;
        assert!(user
            .password
            .verify(&RawPassword::submitted("N3w!Passw0rd".into()), &params)
            .unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let (_, uc, _) = setup().await;
        assert!(matches!(
            uc.get(UserId::from_i64(404)).await,
            Err(AuthError::UserNotFound)
        ));
    }
}

//! Login-Attempt Tracker
//!
//! Records every login attempt and derives lockout from the failures in a
//! trailing window. Lock state is never stored: it lifts on its own once
//! enough failures age out of the window, so there is nothing to reset on
//! success.

use std::sync::Arc;

use chrono::{Duration, Utc};
use platform::client::ClientMeta;

use crate::application::config::AuthConfig;
use crate::domain::entity::login_attempt::LoginAttempt;
use crate::domain::repository::LoginAttemptRepository;
use crate::domain::value_object::login_reason::LoginAttemptReason;
use crate::error::AuthResult;

pub struct LoginAttemptTracker<L>
where
    L: LoginAttemptRepository,
{
    repo: Arc<L>,
    window: Duration,
    threshold: u64,
}

impl<L> LoginAttemptTracker<L>
where
    L: LoginAttemptRepository,
{
    pub fn new(repo: Arc<L>, config: &AuthConfig) -> Self {
        Self {
            repo,
            window: config.lockout_window,
            threshold: config.lockout_threshold,
        }
    }

    /// Append an attempt record
    ///
    /// Best-effort: a store failure is logged and swallowed.
    pub async fn record(&self, username: &str, client: &ClientMeta, reason: LoginAttemptReason) {
        let attempt = LoginAttempt::new(username, client, reason);
        if let Err(e) = self.repo.create(&attempt).await {
            tracing::warn!(
                username = %username,
                reason = %reason,
                error = %e,
                "Failed to record login attempt"
            );
        }
    }

    /// Whether failures in the trailing window reached the threshold
    pub async fn is_locked(&self, username: &str) -> AuthResult<bool> {
        let since = Utc::now() - self.window;
        let failures = self.repo.count_failed_since(username, since).await?;
        Ok(failures >= self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::test_support::test_config;
    use crate::infra::memory::MemoryAuthRepository;

    fn failure_at(username: &str, minutes_ago: i64) -> LoginAttempt {
        let mut attempt = LoginAttempt::new(
            username,
            &ClientMeta::default(),
            LoginAttemptReason::InvalidPassword,
        );
        attempt.created_at = Utc::now() - Duration::minutes(minutes_ago);
        attempt
    }

    #[tokio::test]
    async fn test_locks_at_threshold() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let tracker = LoginAttemptTracker::new(repo.clone(), &test_config());

        for _ in 0..4 {
            tracker
                .record("bob", &ClientMeta::default(), LoginAttemptReason::InvalidPassword)
                .await;
        }
        assert!(!tracker.is_locked("bob").await.unwrap());

        tracker
            .record("bob", &ClientMeta::default(), LoginAttemptReason::InvalidPassword)
            .await;
        assert!(tracker.is_locked("bob").await.unwrap());

        // Other accounts are unaffected
        assert!(!tracker.is_locked("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_successes_do_not_count() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let tracker = LoginAttemptTracker::new(repo.clone(), &test_config());

        for _ in 0..10 {
            tracker
                .record("bob", &ClientMeta::default(), LoginAttemptReason::Success)
                .await;
        }
        assert!(!tracker.is_locked("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_window_slides() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let tracker = LoginAttemptTracker::new(repo.clone(), &test_config());

        // Four recent failures plus one just outside the window
        for minutes_ago in [1, 2, 3, 4, 16] {
            repo.insert_login_attempt(failure_at("bob", minutes_ago));
        }
        assert!(!tracker.is_locked("bob").await.unwrap());

        repo.insert_login_attempt(failure_at("bob", 14));
        assert!(tracker.is_locked("bob").await.unwrap());
    }
}

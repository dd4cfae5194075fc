//! User Entity
//!
//! Identity record: credentials, role, activation state and profile.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId,
    email::Email,
    user_name::{PersonName, UserName},
    user_password::UserPassword,
    user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub id: UserId,
    /// Unique login handle
    pub username: UserName,
    /// Unique email
    pub email: Email,
    pub password: UserPassword,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub role: UserRole,
    /// Inactive users cannot log in or refresh
    pub is_active: bool,
    /// Last successful login time
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a profile change; `None` leaves a field untouched
    pub fn update_profile(
        &mut self,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
        email: Option<Email>,
    ) {
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.updated_at = Utc::now();
    }
}

/// Data for a user not yet persisted (the store assigns the id)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub role: UserRole,
    pub is_active: bool,
}

impl NewUser {
    /// Self-registration: role `user`, active
    pub fn register(
        username: UserName,
        email: Email,
        password: UserPassword,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        Self {
            username,
            email,
            password,
            first_name,
            last_name,
            role: UserRole::User,
            is_active: true,
        }
    }

    /// Materialise with a store-assigned id
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            is_active: self.is_active,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

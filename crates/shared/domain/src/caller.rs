//! Per-request caller identity.
//!
//! The identity provider resolves credentials into a [`CallerContext`] before
//! any booking operation runs. The context is passed explicitly to every
//! operation and is never shared between requests.

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::User;

/// Authenticated user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Resolved identity (or none) of the entity making a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    user: Option<CurrentUser>,
}

impl CallerContext {
    /// Context for a request without valid credentials.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context for a request made by a known user.
    pub fn authenticated(user: impl Into<CurrentUser>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Get the authenticated user, or fail with `Unauthorized`.
    pub fn require_user(&self) -> DomainResult<&CurrentUser> {
        self.user.as_ref().ok_or(DomainError::Unauthorized)
    }
}

impl From<Option<User>> for CallerContext {
    fn from(user: Option<User>) -> Self {
        Self {
            user: user.map(CurrentUser::from),
        }
    }
}

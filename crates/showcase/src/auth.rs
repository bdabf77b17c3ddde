//! Session resolution and the admin proof type.
//!
//! Identity is owned by an external provider. The core only needs to know
//! whether the caller is an admin, and it encodes the answer in the type
//! system: every mutating operation takes an [`AdminSession`], which can only
//! be obtained from [`Session::require_admin`] (or [`AdminSession::system`]
//! for local maintenance commands).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while authorizing a caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid or expired credentials")]
    InvalidCredentials,

    #[error("Admin role required")]
    NotAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Viewer,
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Upgrade to an [`AdminSession`] if the role allows it.
    pub fn require_admin(&self) -> Result<AdminSession, AuthError> {
        match self.role {
            Role::Admin => Ok(AdminSession {
                user_id: self.user_id.clone(),
            }),
            Role::Viewer => Err(AuthError::NotAdmin),
        }
    }
}

/// Proof that the caller was verified as an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    user_id: String,
}

impl AdminSession {
    /// The identity used by local CLI commands, which run with operator
    /// privileges.
    pub fn system() -> Self {
        Self {
            user_id: "system".to_string(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Resolves a bearer credential into a [`Session`].
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn resolve(&self, credential: &str) -> Result<Session, AuthError>;
}

/// A provider backed by a fixed token table, loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenSessions {
    sessions: HashMap<String, Session>,
}

impl StaticTokenSessions {
    pub fn new(sessions: impl IntoIterator<Item = (String, Session)>) -> Self {
        Self {
            sessions: sessions.into_iter().collect(),
        }
    }

    /// Every `(token, user_id)` pair is granted the admin role.
    pub fn admins(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::new(
            tokens
                .into_iter()
                .map(|(token, user_id)| (token, Session::new(user_id, Role::Admin))),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionProvider for StaticTokenSessions {
    async fn resolve(&self, credential: &str) -> Result<Session, AuthError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        self.sessions
            .get(credential)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }
}

//! Session-based authentication
//!
//! Sessions are server-side records whose id doubles as the bearer token.
//! Expiry is a hard cliff: no renewal, no sliding window.

use chrono::{Duration, Utc};
use gf_store::EntityStore;
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};
use crate::model::{Session, User};
use crate::plan;

/// Sessions live this long from creation.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Hex SHA-256 digest of a password.
///
/// Demo-grade hashing; the stored contract is a bare digest, not a KDF.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Signup, login, and bearer-token resolution.
#[derive(Clone)]
pub struct AuthService {
    users: EntityStore<User>,
    sessions: EntityStore<Session>,
}

impl AuthService {
    /// Build over the user and session stores.
    pub fn new(users: EntityStore<User>, sessions: EntityStore<Session>) -> Self {
        Self { users, sessions }
    }

    /// Register a new operator on the default plan and open a session.
    /// Fails with `Conflict` when the email is already registered.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> CoreResult<(String, User)> {
        let existing = self.users.list(None).await?;
        if existing
            .items
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(email))
        {
            return Err(CoreError::Conflict(format!(
                "email already registered: {email}"
            )));
        }

        let user = self
            .users
            .create(User {
                id: String::new(),
                name: name.to_string(),
                email: email.to_string(),
                plan_id: plan::default_plan().id.to_string(),
                password_hash: hash_password(password),
            })
            .await?;
        tracing::info!(user = %user.id, "operator signed up");

        let token = self.open_session(&user.id).await?;
        Ok((token, user))
    }

    /// Verify credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<(String, User)> {
        let digest = hash_password(password);
        let users = self.users.list(None).await?;
        let user = users
            .items
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email) && user.password_hash == digest)
            .ok_or(CoreError::Unauthenticated)?;

        let token = self.open_session(&user.id).await?;
        Ok((token, user))
    }

    /// Resolve an `Authorization` header value to a user id.
    ///
    /// Strips the `Bearer ` prefix, looks the token up as a session id, and
    /// rejects absent or expired sessions. Performs no renewal.
    pub async fn resolve(&self, authorization: Option<&str>) -> CoreResult<String> {
        let header = authorization.ok_or(CoreError::Unauthenticated)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(CoreError::Unauthenticated)?
            .trim();

        let session = self
            .sessions
            .find(token)
            .await?
            .ok_or(CoreError::Unauthenticated)?;
        if session.expires_at <= Utc::now() {
            return Err(CoreError::Unauthenticated);
        }
        Ok(session.user_id)
    }

    /// Delete the session behind a bearer token. Unknown tokens are a no-op.
    pub async fn logout(&self, authorization: Option<&str>) -> CoreResult<()> {
        let header = authorization.ok_or(CoreError::Unauthenticated)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(CoreError::Unauthenticated)?
            .trim();
        self.sessions.delete(token).await?;
        Ok(())
    }

    async fn open_session(&self, user_id: &str) -> CoreResult<String> {
        let session = self
            .sessions
            .create(Session {
                session_id: String::new(),
                user_id: user_id.to_string(),
                expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
            })
            .await?;
        Ok(session.session_id)
    }
}

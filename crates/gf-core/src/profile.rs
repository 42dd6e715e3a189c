//! Profile composition
//!
//! Read-only join of a user, their plan, and their owned-tenant count.

use gf_store::EntityStore;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::model::{Tenant, User};
use crate::plan::{self, Plan};

/// Public projection of an operator account. Never carries the password
/// hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Resolved plan (stale ids fall back to the default plan).
    pub plan: &'static Plan,
    /// Owned tenants, active or not.
    pub tenant_count: usize,
}

/// Composes `UserProfile` aggregates.
#[derive(Clone)]
pub struct ProfileComposer {
    users: EntityStore<User>,
    tenants: EntityStore<Tenant>,
}

impl ProfileComposer {
    /// Build over the user and tenant stores.
    pub fn new(users: EntityStore<User>, tenants: EntityStore<Tenant>) -> Self {
        Self { users, tenants }
    }

    /// Compose the profile for a user id. Performs no writes.
    pub async fn compose(&self, user_id: &str) -> CoreResult<UserProfile> {
        let user = self
            .users
            .find(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;

        let plan = plan::resolve(&user.plan_id);
        let tenants = self.tenants.list(None).await?;
        let tenant_count = tenants
            .items
            .iter()
            .filter(|tenant| tenant.owner_id == user.id)
            .count();

        Ok(UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            plan,
            tenant_count,
        })
    }
}

//! Tenant provisioning
//!
//! Creation, deletion, and the `active ⇄ suspended` toggle. The plan-limit
//! check is route-level policy and lives here, not in the store.

use chrono::Utc;
use gf_store::{EntityStore, Page};

use crate::error::{CoreError, CoreResult};
use crate::license::generate_license_key;
use crate::model::{Tenant, TenantStatus, User};
use crate::plan;

/// Owns tenant lifecycle on behalf of authenticated operators.
#[derive(Clone)]
pub struct TenantService {
    tenants: EntityStore<Tenant>,
    users: EntityStore<User>,
}

impl TenantService {
    /// Build over the tenant and user stores.
    pub fn new(tenants: EntityStore<Tenant>, users: EntityStore<User>) -> Self {
        Self { tenants, users }
    }

    /// Tenants owned by a user, in insertion order.
    pub async fn list_for(&self, user_id: &str) -> CoreResult<Page<Tenant>> {
        let mut page = self.tenants.list(None).await?;
        page.items.retain(|tenant| tenant.owner_id == user_id);
        Ok(page)
    }

    /// Provision a tenant: plan-limit check, fresh id and license key,
    /// status `active`.
    ///
    /// The limit check and the create are separate store calls; two
    /// concurrent creations can both pass the check. Accepted at this scale.
    pub async fn create(&self, user_id: &str, name: &str, domain: &str) -> CoreResult<Tenant> {
        let user = self
            .users
            .find(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;
        let plan = plan::resolve(&user.plan_id);

        let owned = self.list_for(user_id).await?.items.len();
        if owned >= plan.tenant_limit {
            return Err(CoreError::plan_limit(plan.name, plan.tenant_limit));
        }

        let tenant = self
            .tenants
            .create(Tenant {
                id: String::new(),
                name: name.to_string(),
                domain: domain.to_string(),
                license_key: generate_license_key(),
                status: TenantStatus::Active,
                owner_id: user_id.to_string(),
                created_at: Utc::now(),
                last_validated: None,
            })
            .await?;
        tracing::info!(tenant = %tenant.id, owner = %user_id, "tenant provisioned");
        Ok(tenant)
    }

    /// Delete a tenant. Only the owner may; anyone else gets `Unauthorized`
    /// even for a valid id.
    pub async fn delete(&self, user_id: &str, tenant_id: &str) -> CoreResult<()> {
        let tenant = self
            .tenants
            .find(tenant_id)
            .await?
            .ok_or(CoreError::NotFound("tenant"))?;
        if tenant.owner_id != user_id {
            return Err(CoreError::Unauthorized);
        }
        self.tenants.delete(tenant_id).await?;
        tracing::info!(tenant = %tenant_id, owner = %user_id, "tenant deleted");
        Ok(())
    }

    /// Toggle between `active` and `suspended`. `expired` is terminal:
    /// toggling an expired tenant is rejected.
    pub async fn set_suspended(
        &self,
        user_id: &str,
        tenant_id: &str,
        suspended: bool,
    ) -> CoreResult<Tenant> {
        let tenant = self
            .tenants
            .find(tenant_id)
            .await?
            .ok_or(CoreError::NotFound("tenant"))?;
        if tenant.owner_id != user_id {
            return Err(CoreError::Unauthorized);
        }
        if tenant.status == TenantStatus::Expired {
            return Err(CoreError::Conflict("tenant license has expired".into()));
        }

        let next = if suspended {
            TenantStatus::Suspended
        } else {
            TenantStatus::Active
        };
        Ok(self
            .tenants
            .mutate(tenant_id, move |mut tenant| {
                tenant.status = next;
                tenant
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::error::PLAN_LIMIT_REACHED;
    use gf_store::MemoryBackend;
    use std::sync::Arc;

    async fn service() -> (TenantService, EntityStore<User>, EntityStore<Tenant>) {
        let backend = Arc::new(MemoryBackend::new());
        let users: EntityStore<User> = EntityStore::new(backend.clone());
        let tenants: EntityStore<Tenant> = EntityStore::new(backend);
        (
            TenantService::new(tenants.clone(), users.clone()),
            users,
            tenants,
        )
    }

    async fn starter_user(users: &EntityStore<User>, id: &str) -> User {
        users
            .create(User {
                id: id.to_string(),
                name: "Op".into(),
                email: format!("{id}@example.com"),
                plan_id: "starter".into(),
                password_hash: hash_password("pw"),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn created_tenant_is_active_with_prefixed_key() {
        let (service, users, _) = service().await;
        starter_user(&users, "usr-a").await;

        let tenant = service
            .create("usr-a", "Prod", "prod.example.com")
            .await
            .unwrap();

        assert_eq!(tenant.status, TenantStatus::Active);
        assert!(tenant.license_key.starts_with("GF-"));
        assert!(tenant.last_validated.is_none());
        assert_eq!(service.list_for("usr-a").await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn plan_limit_blocks_the_third_tenant() {
        let (service, users, _) = service().await;
        starter_user(&users, "usr-a").await; // starter: limit 2

        service.create("usr-a", "One", "one.example.com").await.unwrap();
        service.create("usr-a", "Two", "two.example.com").await.unwrap();

        let err = service
            .create("usr-a", "Three", "three.example.com")
            .await
            .unwrap_err();
        match err {
            CoreError::Policy { code, .. } => assert_eq!(code, PLAN_LIMIT_REACHED),
            other => panic!("expected policy rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn one_of_two_still_succeeds() {
        let (service, users, _) = service().await;
        starter_user(&users, "usr-a").await;
        service.create("usr-a", "One", "one.example.com").await.unwrap();

        assert!(service.create("usr-a", "Two", "two.example.com").await.is_ok());
    }

    #[tokio::test]
    async fn only_the_owner_may_delete() {
        let (service, users, tenants) = service().await;
        starter_user(&users, "usr-a").await;
        starter_user(&users, "usr-b").await;
        let tenant = service.create("usr-a", "One", "one.example.com").await.unwrap();

        let err = service.delete("usr-b", &tenant.id).await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized));

        service.delete("usr-a", &tenant.id).await.unwrap();
        assert!(tenants.find(&tenant.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn suspend_resume_toggles_status() {
        let (service, users, _) = service().await;
        starter_user(&users, "usr-a").await;
        let tenant = service.create("usr-a", "One", "one.example.com").await.unwrap();

        let suspended = service
            .set_suspended("usr-a", &tenant.id, true)
            .await
            .unwrap();
        assert_eq!(suspended.status, TenantStatus::Suspended);

        let resumed = service
            .set_suspended("usr-a", &tenant.id, false)
            .await
            .unwrap();
        assert_eq!(resumed.status, TenantStatus::Active);
    }

    #[tokio::test]
    async fn expired_is_terminal() {
        let (service, users, tenants) = service().await;
        starter_user(&users, "usr-a").await;
        let tenant = service.create("usr-a", "One", "one.example.com").await.unwrap();
        tenants
            .mutate(&tenant.id, |mut t| {
                t.status = TenantStatus::Expired;
                t
            })
            .await
            .unwrap();

        let err = service
            .set_suspended("usr-a", &tenant.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }
}

//! Admin statistics

use gf_store::EntityStore;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::model::{Invoice, InvoiceStatus, Tenant, User, ADMIN_USER_ID};

/// Platform-wide aggregate for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Registered operators.
    pub operator_count: usize,
    /// Provisioned tenants, any status.
    pub tenant_count: usize,
    /// Sum of paid invoices.
    pub revenue: f64,
    /// Service health indicator.
    pub health: &'static str,
}

/// Composes admin stats; readable only by the hardcoded admin operator.
#[derive(Clone)]
pub struct StatsComposer {
    users: EntityStore<User>,
    tenants: EntityStore<Tenant>,
    invoices: EntityStore<Invoice>,
}

impl StatsComposer {
    /// Build over the user, tenant, and invoice stores.
    pub fn new(
        users: EntityStore<User>,
        tenants: EntityStore<Tenant>,
        invoices: EntityStore<Invoice>,
    ) -> Self {
        Self {
            users,
            tenants,
            invoices,
        }
    }

    /// Compose the aggregate for `caller_id`; anyone but the admin gets
    /// `Unauthorized`.
    pub async fn compose(&self, caller_id: &str) -> CoreResult<AdminStats> {
        if caller_id != ADMIN_USER_ID {
            return Err(CoreError::Unauthorized);
        }

        let operator_count = self.users.list(None).await?.items.len();
        let tenant_count = self.tenants.list(None).await?.items.len();
        let revenue = self
            .invoices
            .list(None)
            .await?
            .items
            .iter()
            .filter(|invoice| invoice.status == InvoiceStatus::Paid)
            .map(|invoice| invoice.amount)
            .sum();

        Ok(AdminStats {
            operator_count,
            tenant_count,
            revenue,
            health: "ok",
        })
    }
}

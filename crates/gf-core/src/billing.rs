//! Invoice listing

use gf_store::EntityStore;

use crate::error::CoreResult;
use crate::model::Invoice;

/// Read-only view over a user's invoices.
#[derive(Clone)]
pub struct InvoiceLedger {
    invoices: EntityStore<Invoice>,
}

impl InvoiceLedger {
    /// Build over the invoice store.
    pub fn new(invoices: EntityStore<Invoice>) -> Self {
        Self { invoices }
    }

    /// Invoices billed to a user, in insertion order.
    pub async fn list_for(&self, user_id: &str) -> CoreResult<Vec<Invoice>> {
        let page = self.invoices.list(None).await?;
        Ok(page
            .items
            .into_iter()
            .filter(|invoice| invoice.user_id == user_id)
            .collect())
    }
}

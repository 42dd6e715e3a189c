//! Support tickets

use chrono::Utc;
use gf_store::EntityStore;

use crate::error::CoreResult;
use crate::model::{SupportTicket, TicketCategory, TicketStatus};

/// Filing and listing of support tickets.
#[derive(Clone)]
pub struct TicketDesk {
    tickets: EntityStore<SupportTicket>,
}

impl TicketDesk {
    /// Build over the ticket store.
    pub fn new(tickets: EntityStore<SupportTicket>) -> Self {
        Self { tickets }
    }

    /// Tickets filed by a user, in insertion order.
    pub async fn list_for(&self, user_id: &str) -> CoreResult<Vec<SupportTicket>> {
        let page = self.tickets.list(None).await?;
        Ok(page
            .items
            .into_iter()
            .filter(|ticket| ticket.user_id == user_id)
            .collect())
    }

    /// File a new ticket; it opens immediately.
    pub async fn file(
        &self,
        user_id: &str,
        subject: &str,
        message: &str,
        category: TicketCategory,
    ) -> CoreResult<SupportTicket> {
        let ticket = self
            .tickets
            .create(SupportTicket {
                id: String::new(),
                user_id: user_id.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
                status: TicketStatus::Open,
                category,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(ticket = %ticket.id, user = %user_id, "ticket filed");
        Ok(ticket)
    }
}

//! Entity types
//!
//! Typed views over the entity store. Field names are camelCase on the wire
//! because the dashboard client consumes the JSON directly.

use chrono::{DateTime, Utc};
use gf_store::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::plan;

/// The single hardcoded admin operator (seeded).
pub const ADMIN_USER_ID: &str = "usr-admin";

fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

// ============ User ============

/// An operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique id within the `user` kind.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, unique across users.
    pub email: String,
    /// Foreign key into the static plan catalog; stale ids fall back to the
    /// default plan at read time.
    pub plan_id: String,
    /// Hex SHA-256 digest of the password. Never serialized to clients
    /// (profiles are the public projection).
    pub password_hash: String,
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn initial(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            plan_id: plan::default_plan().id.to_string(),
            password_hash: String::new(),
        }
    }

    fn seed() -> Vec<Self> {
        vec![
            Self {
                id: ADMIN_USER_ID.to_string(),
                name: "GuardFlow Admin".to_string(),
                email: "admin@guardflow.dev".to_string(),
                plan_id: "enterprise".to_string(),
                // Dev credentials for the demo deployment only.
                password_hash: hash_password("gf-admin-dev"),
            },
            Self {
                id: "usr-demo".to_string(),
                name: "Demo Operator".to_string(),
                email: "demo@guardflow.dev".to_string(),
                plan_id: "pro".to_string(),
                password_hash: hash_password("gf-demo-dev"),
            },
        ]
    }

    fn generate_id() -> String {
        prefixed_id("usr")
    }
}

// ============ Tenant ============

/// Tenant lifecycle state. `active ⇄ suspended` toggles; `expired` is
/// terminal and only ever set administratively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    /// License validates.
    Active,
    /// Temporarily disabled by the owner.
    Suspended,
    /// Terminal; no in-scope flow transitions into it.
    Expired,
}

/// A licensed deployment bound to a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Unique id within the `tenant` kind.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Domain the license is bound to.
    pub domain: String,
    /// Opaque key presented for validation. `domain` + `licenseKey` together
    /// form the validation key.
    pub license_key: String,
    /// Lifecycle state.
    pub status: TenantStatus,
    /// Owning user id.
    pub owner_id: String,
    /// Provisioning time.
    pub created_at: DateTime<Utc>,
    /// Last successful validation, stamped best-effort.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_validated: Option<DateTime<Utc>>,
}

impl Entity for Tenant {
    const KIND: &'static str = "tenant";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn initial(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            domain: String::new(),
            license_key: String::new(),
            status: TenantStatus::Active,
            owner_id: String::new(),
            created_at: Utc::now(),
            last_validated: None,
        }
    }

    fn seed() -> Vec<Self> {
        vec![
            Self {
                id: "tnt-demo-1".to_string(),
                name: "Edge Node One".to_string(),
                domain: "node.example.com".to_string(),
                license_key: "GF-AB12-XYZ9".to_string(),
                status: TenantStatus::Active,
                owner_id: "usr-demo".to_string(),
                created_at: Utc::now(),
                last_validated: None,
            },
            Self {
                id: "tnt-demo-2".to_string(),
                name: "Staging Mirror".to_string(),
                domain: "staging.example.com".to_string(),
                license_key: "GF-CD34-QRS7".to_string(),
                status: TenantStatus::Suspended,
                owner_id: "usr-demo".to_string(),
                created_at: Utc::now(),
                last_validated: None,
            },
        ]
    }

    fn generate_id() -> String {
        prefixed_id("tnt")
    }
}

// ============ Session ============

/// An authenticated session. The record id doubles as the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Token value and record id in one.
    pub session_id: String,
    /// Authenticated user.
    pub user_id: String,
    /// Hard expiry; expired sessions are inert but not purged.
    pub expires_at: DateTime<Utc>,
}

impl Entity for Session {
    const KIND: &'static str = "session";

    fn id(&self) -> &str {
        &self.session_id
    }

    fn set_id(&mut self, id: String) {
        self.session_id = id;
    }

    fn initial(id: &str) -> Self {
        Self {
            session_id: id.to_string(),
            user_id: String::new(),
            // Template sessions are born expired; only `create` issues live ones.
            expires_at: Utc::now(),
        }
    }
}

// ============ Support ticket ============

/// Ticket state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting a response.
    Open,
    /// Resolved.
    Closed,
}

/// Ticket category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    /// Product or integration issues.
    Technical,
    /// Invoices and payment.
    Billing,
    /// Account and access.
    Account,
}

/// A support request filed by an operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    /// Unique id within the `ticket` kind.
    pub id: String,
    /// Filing user.
    pub user_id: String,
    /// Short summary.
    pub subject: String,
    /// Full message body.
    pub message: String,
    /// Ticket state.
    pub status: TicketStatus,
    /// Ticket category.
    pub category: TicketCategory,
    /// Filing time.
    pub created_at: DateTime<Utc>,
}

impl Entity for SupportTicket {
    const KIND: &'static str = "ticket";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn initial(id: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: String::new(),
            subject: String::new(),
            message: String::new(),
            status: TicketStatus::Open,
            category: TicketCategory::Technical,
            created_at: Utc::now(),
        }
    }

    fn seed() -> Vec<Self> {
        vec![Self {
            id: "tkt-5001".to_string(),
            user_id: "usr-demo".to_string(),
            subject: "Key rotation for staging".to_string(),
            message: "Can I rotate the license key on a suspended tenant?".to_string(),
            status: TicketStatus::Open,
            category: TicketCategory::Technical,
            created_at: Utc::now(),
        }]
    }

    fn generate_id() -> String {
        prefixed_id("tkt")
    }
}

// ============ Invoice ============

/// Invoice state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Settled.
    Paid,
    /// Awaiting payment.
    Pending,
    /// Payment failed.
    Failed,
}

/// A billing record for an operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique id within the `invoice` kind.
    pub id: String,
    /// Billed user.
    pub user_id: String,
    /// Amount in `currency` units.
    pub amount: f64,
    /// Billing date.
    pub date: DateTime<Utc>,
    /// Invoice state.
    pub status: InvoiceStatus,
    /// Plan name at billing time (plans are not persisted per user).
    pub plan_name: String,
    /// ISO currency code.
    pub currency: String,
}

impl Entity for Invoice {
    const KIND: &'static str = "invoice";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn initial(id: &str) -> Self {
        Self {
            id: id.to_string(),
            user_id: String::new(),
            amount: 0.0,
            date: Utc::now(),
            status: InvoiceStatus::Pending,
            plan_name: String::new(),
            currency: "USD".to_string(),
        }
    }

    fn seed() -> Vec<Self> {
        vec![
            Self {
                id: "inv-1001".to_string(),
                user_id: "usr-demo".to_string(),
                amount: 29.0,
                date: Utc::now(),
                status: InvoiceStatus::Paid,
                plan_name: "Pro".to_string(),
                currency: "USD".to_string(),
            },
            Self {
                id: "inv-1002".to_string(),
                user_id: "usr-demo".to_string(),
                amount: 29.0,
                date: Utc::now(),
                status: InvoiceStatus::Pending,
                plan_name: "Pro".to_string(),
                currency: "USD".to_string(),
            },
        ]
    }

    fn generate_id() -> String {
        prefixed_id("inv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_camel_case() {
        let tenant = Tenant::seed().remove(0);
        let json = serde_json::to_value(&tenant).unwrap();

        assert!(json.get("licenseKey").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "active");
        // Absent lastValidated stays off the wire.
        assert!(json.get("lastValidated").is_none());
    }

    #[test]
    fn seed_ids_reference_seed_users() {
        let user_ids: Vec<String> = User::seed().into_iter().map(|u| u.id).collect();
        for tenant in Tenant::seed() {
            assert!(user_ids.contains(&tenant.owner_id));
        }
    }
}

//! GuardFlow Domain Layer
//!
//! Stateless composition over the entity store: typed entities, session
//! auth, domain-bound license validation, and tenant provisioning.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         GUARDFLOW CORE                                  │
//! │                                                                         │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────────────┐   │
//! │  │    Auth    │ │  License   │ │  Profile   │ │      Tenant        │   │
//! │  │  Resolver  │ │ Validator  │ │  Composer  │ │   Provisioning     │   │
//! │  └──────┬─────┘ └─────┬──────┘ └─────┬──────┘ └─────────┬──────────┘   │
//! │         │             │              │                  │              │
//! │  ┌──────▼─────────────▼──────────────▼──────────────────▼──────────┐   │
//! │  │                     ENTITY STORE (gf-store)                     │   │
//! │  │    user │ tenant │ session │ ticket │ invoice                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Plan catalog: static, process-wide, immutable after start.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod auth;
pub mod billing;
pub mod error;
pub mod license;
pub mod model;
pub mod plan;
pub mod profile;
pub mod provision;
pub mod stats;
pub mod support;

pub use auth::AuthService;
pub use billing::InvoiceLedger;
pub use error::{CoreError, CoreResult};
pub use license::{LicenseValidator, RejectReason, TenantSummary, Validation};
pub use model::{
    Invoice, InvoiceStatus, Session, SupportTicket, Tenant, TenantStatus, TicketCategory,
    TicketStatus, User, ADMIN_USER_ID,
};
pub use plan::Plan;
pub use profile::{ProfileComposer, UserProfile};
pub use provision::TenantService;
pub use stats::{AdminStats, StatsComposer};
pub use support::TicketDesk;

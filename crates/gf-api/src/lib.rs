//! GuardFlow API Backend
//!
//! Axum gateway for the licensing dashboard: session auth, tenant
//! provisioning, license validation, billing, support, admin stats.
//!
//! Every `/api` endpoint answers the `{success, data?, error?}` envelope;
//! protected routes require `Authorization: Bearer <sessionId>`.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod extract;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use gf_core::{
    AuthService, CoreResult, Invoice, InvoiceLedger, LicenseValidator, ProfileComposer, Session,
    StatsComposer, SupportTicket, Tenant, TenantService, TicketDesk, User,
};
use gf_store::{Backend, EntityStore, MemoryBackend};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use response::{ApiError, ApiResponse, ErrorResponse};

/// Shared application state: one service per concern, all over the same
/// backend.
#[derive(Clone)]
pub struct AppState {
    /// Signup/login/session resolution.
    pub auth: AuthService,
    /// User profile aggregates.
    pub profiles: ProfileComposer,
    /// Tenant provisioning.
    pub tenants: TenantService,
    /// License validation.
    pub validator: LicenseValidator,
    /// Invoice listing.
    pub invoices: InvoiceLedger,
    /// Support tickets.
    pub tickets: TicketDesk,
    /// Admin aggregates.
    pub stats: StatsComposer,
}

impl AppState {
    /// State over a fresh in-memory backend, seeded with the demo data.
    pub async fn new() -> CoreResult<Self> {
        Self::with_backend(Arc::new(MemoryBackend::new())).await
    }

    /// State over a caller-provided backend. Seeds every kind; re-seeding
    /// an already-populated backend is a no-op per id.
    pub async fn with_backend(backend: Arc<dyn Backend>) -> CoreResult<Self> {
        let users: EntityStore<User> = EntityStore::new(backend.clone());
        let tenants: EntityStore<Tenant> = EntityStore::new(backend.clone());
        let sessions: EntityStore<Session> = EntityStore::new(backend.clone());
        let tickets: EntityStore<SupportTicket> = EntityStore::new(backend.clone());
        let invoices: EntityStore<Invoice> = EntityStore::new(backend);

        users.seed().await?;
        tenants.seed().await?;
        tickets.seed().await?;
        invoices.seed().await?;

        Ok(Self {
            auth: AuthService::new(users.clone(), sessions),
            profiles: ProfileComposer::new(users.clone(), tenants.clone()),
            tenants: TenantService::new(tenants.clone(), users.clone()),
            validator: LicenseValidator::new(tenants.clone()),
            invoices: InvoiceLedger::new(invoices.clone()),
            tickets: TicketDesk::new(tickets),
            stats: StatsComposer::new(users, tenants, invoices),
        })
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", routes::auth::router())
        .route("/me", get(routes::auth::me))
        .nest("/tenants", routes::tenants::router())
        .route(
            "/validate-license",
            axum::routing::post(routes::license::validate),
        )
        .nest("/billing", routes::billing::router())
        .nest("/support", routes::support::router())
        .nest("/admin", routes::admin::router())
}

async fn health() -> &'static str {
    "OK"
}

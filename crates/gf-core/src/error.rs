//! Domain error taxonomy

use gf_store::StoreError;
use thiserror::Error;

/// Policy code for a plan's tenant-limit rejection.
pub const PLAN_LIMIT_REACHED: &str = "PLAN_LIMIT_REACHED";

/// Errors surfaced by the domain services.
///
/// All variants except `Store` are expected business outcomes with stable
/// response codes; a `Store` failure is the unexpected/fatal channel for a
/// request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown id for the named entity kind.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Missing, unknown, or expired session token.
    #[error("authentication required")]
    Unauthenticated,

    /// Valid session, but the caller does not own the resource.
    #[error("not permitted")]
    Unauthorized,

    /// Duplicate unique field (e.g. email) or an illegal state transition.
    #[error("{0}")]
    Conflict(String),

    /// Business-rule rejection with a machine-readable code.
    #[error("{message}")]
    Policy {
        /// Stable machine-readable code, e.g. `PLAN_LIMIT_REACHED`.
        code: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// Backing-store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Rejection for a plan whose tenant limit is already met.
    pub fn plan_limit(plan_name: &str, limit: usize) -> Self {
        CoreError::Policy {
            code: PLAN_LIMIT_REACHED,
            message: format!("the {plan_name} plan allows at most {limit} tenants"),
        }
    }
}

/// Domain result alias.
pub type CoreResult<T> = Result<T, CoreError>;

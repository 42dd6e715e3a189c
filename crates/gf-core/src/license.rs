//! Domain-bound license validation
//!
//! Lookup-and-match: a presented key resolves to a tenant, whose status and
//! domain binding are checked. No signing is involved — keys are opaque
//! random tokens and "invalid" is a result, never an error channel.

use chrono::{DateTime, Utc};
use gf_store::EntityStore;
use rand::Rng;
use serde::Serialize;
use serde_json::json;

use crate::error::CoreResult;
use crate::model::{Tenant, TenantStatus};

/// License keys carry this recognizable prefix.
pub const LICENSE_PREFIX: &str = "GF";

// Unambiguous uppercase alphabet (no 0/O, 1/I).
const KEY_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Mint a fresh license key: `GF-XXXX-XXXX`.
pub fn generate_license_key() -> String {
    let mut rng = rand::thread_rng();
    let mut block = || {
        (0..4)
            .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
            .collect::<String>()
    };
    let (a, b) = (block(), block());
    format!("{LICENSE_PREFIX}-{a}-{b}")
}

/// Why a validation was rejected. Carried on the result so callers can tell
/// a revoked license apart from a mismatched domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No tenant carries the presented key.
    UnknownKey,
    /// Tenant exists but is suspended.
    Suspended,
    /// Tenant exists but is expired.
    Expired,
    /// Key matched, but the presented domain is not the bound one.
    DomainMismatch,
}

impl RejectReason {
    /// Stable human-readable message for the wire.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::UnknownKey => "License not found",
            RejectReason::Suspended => "License suspended",
            RejectReason::Expired => "License expired",
            RejectReason::DomainMismatch => "Domain does not match license",
        }
    }
}

/// Read-only projection returned on success. Never exposes `ownerId` or
/// `licenseKey`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    /// Tenant id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle state at validation time.
    pub status: TenantStatus,
    /// Bound domain.
    pub domain: String,
    /// When the license was provisioned.
    pub authorized_at: DateTime<Utc>,
}

impl From<&Tenant> for TenantSummary {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            status: tenant.status,
            domain: tenant.domain.clone(),
            authorized_at: tenant.created_at,
        }
    }
}

/// Outcome of a validation check.
#[derive(Debug, Clone)]
pub struct Validation {
    /// Whether the key validates for the presented domain.
    pub valid: bool,
    /// Which check failed, when invalid.
    pub reason: Option<RejectReason>,
    /// Tenant projection, when valid.
    pub tenant: Option<TenantSummary>,
}

impl Validation {
    fn rejected(reason: RejectReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            tenant: None,
        }
    }

    fn accepted(tenant: TenantSummary) -> Self {
        Self {
            valid: true,
            reason: None,
            tenant: Some(tenant),
        }
    }
}

/// Resolves presented keys against the tenant registry.
#[derive(Clone)]
pub struct LicenseValidator {
    tenants: EntityStore<Tenant>,
}

impl LicenseValidator {
    /// Build over the tenant store.
    pub fn new(tenants: EntityStore<Tenant>) -> Self {
        Self { tenants }
    }

    /// Validate a key against a domain.
    ///
    /// Key lookup is a linear scan over tenants; fine at this entity count.
    /// On success the tenant's `lastValidated` is stamped through the store's
    /// patch path as best-effort telemetry: a failed stamp is logged and the
    /// validation result is still returned.
    pub async fn validate(&self, key: &str, domain: &str) -> CoreResult<Validation> {
        let tenants = self.tenants.list(None).await?;
        let tenant = match tenants
            .items
            .into_iter()
            .find(|tenant| tenant.license_key == key)
        {
            Some(tenant) => tenant,
            None => return Ok(Validation::rejected(RejectReason::UnknownKey)),
        };

        match tenant.status {
            TenantStatus::Suspended => return Ok(Validation::rejected(RejectReason::Suspended)),
            TenantStatus::Expired => return Ok(Validation::rejected(RejectReason::Expired)),
            TenantStatus::Active => {}
        }
        if !tenant.domain.eq_ignore_ascii_case(domain) {
            return Ok(Validation::rejected(RejectReason::DomainMismatch));
        }

        if let Err(err) = self
            .tenants
            .patch(&tenant.id, json!({ "lastValidated": Utc::now() }))
            .await
        {
            tracing::warn!(tenant = %tenant.id, %err, "lastValidated stamp failed");
        }

        Ok(Validation::accepted(TenantSummary::from(&tenant)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_store::MemoryBackend;
    use std::sync::Arc;

    async fn validator_with_seeds() -> (LicenseValidator, EntityStore<Tenant>) {
        let backend = Arc::new(MemoryBackend::new());
        let tenants: EntityStore<Tenant> = EntityStore::new(backend);
        tenants.seed().await.unwrap();
        (LicenseValidator::new(tenants.clone()), tenants)
    }

    #[tokio::test]
    async fn known_key_and_domain_validate() {
        let (validator, tenants) = validator_with_seeds().await;

        let outcome = validator
            .validate("GF-AB12-XYZ9", "node.example.com")
            .await
            .unwrap();

        assert!(outcome.valid);
        assert!(outcome.reason.is_none());
        let summary = outcome.tenant.unwrap();
        assert_eq!(summary.id, "tnt-demo-1");

        // Validation stamped lastValidated.
        let tenant = tenants.get("tnt-demo-1").await.unwrap();
        assert!(tenant.last_validated.is_some());
    }

    #[tokio::test]
    async fn wrong_domain_is_a_domain_mismatch() {
        let (validator, _) = validator_with_seeds().await;

        let outcome = validator
            .validate("GF-AB12-XYZ9", "wrong.com")
            .await
            .unwrap();

        assert!(!outcome.valid);
        assert_eq!(outcome.reason, Some(RejectReason::DomainMismatch));
        assert!(outcome.tenant.is_none());
    }

    #[tokio::test]
    async fn unknown_key_is_not_found() {
        let (validator, _) = validator_with_seeds().await;

        let outcome = validator
            .validate("unknown-key", "node.example.com")
            .await
            .unwrap();

        assert!(!outcome.valid);
        assert_eq!(outcome.reason, Some(RejectReason::UnknownKey));
        assert_eq!(outcome.reason.unwrap().message(), "License not found");
    }

    #[tokio::test]
    async fn suspended_and_expired_report_their_own_reasons() {
        let (validator, tenants) = validator_with_seeds().await;

        let outcome = validator
            .validate("GF-CD34-QRS7", "staging.example.com")
            .await
            .unwrap();
        assert_eq!(outcome.reason, Some(RejectReason::Suspended));

        tenants
            .mutate("tnt-demo-2", |mut t| {
                t.status = TenantStatus::Expired;
                t
            })
            .await
            .unwrap();

        let outcome = validator
            .validate("GF-CD34-QRS7", "staging.example.com")
            .await
            .unwrap();
        assert_eq!(outcome.reason, Some(RejectReason::Expired));
    }

    #[tokio::test]
    async fn summary_leaks_no_tenant_internals() {
        let (validator, _) = validator_with_seeds().await;

        let outcome = validator
            .validate("GF-AB12-XYZ9", "node.example.com")
            .await
            .unwrap();
        let json = serde_json::to_value(outcome.tenant.unwrap()).unwrap();

        assert!(json.get("licenseKey").is_none());
        assert!(json.get("ownerId").is_none());
        assert!(json.get("authorizedAt").is_some());
    }

    #[test]
    fn generated_keys_have_the_expected_shape() {
        for _ in 0..32 {
            let key = generate_license_key();
            let parts: Vec<&str> = key.split('-').collect();
            assert_eq!(parts[0], "GF");
            assert_eq!(parts.len(), 3);
            assert!(parts[1..].iter().all(|block| block.len() == 4
                && block.bytes().all(|b| KEY_ALPHABET.contains(&b))));
        }
    }
}

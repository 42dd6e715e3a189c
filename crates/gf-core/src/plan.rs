//! Static plan catalog
//!
//! Plans are configuration, not stored state: the catalog is a process-wide
//! constant with no runtime mutation path.

use serde::Serialize;

/// A subscription tier bounding how many tenants an operator may own.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Catalog id referenced by `User.planId`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Monthly price in USD.
    pub price: f64,
    /// Billing interval.
    pub interval: &'static str,
    /// Maximum owned tenants, active or not. Enforced at creation time only.
    pub tenant_limit: usize,
    /// Marketing feature list.
    pub features: &'static [&'static str],
}

/// The full catalog, cheapest first. The first entry doubles as the
/// fallback for unrecognized plan ids.
pub const CATALOG: &[Plan] = &[
    Plan {
        id: "starter",
        name: "Starter",
        price: 0.0,
        interval: "month",
        tenant_limit: 2,
        features: &["2 tenants", "domain-bound keys", "community support"],
    },
    Plan {
        id: "pro",
        name: "Pro",
        price: 29.0,
        interval: "month",
        tenant_limit: 10,
        features: &[
            "10 tenants",
            "domain-bound keys",
            "priority support",
            "validation telemetry",
        ],
    },
    Plan {
        id: "enterprise",
        name: "Enterprise",
        price: 99.0,
        interval: "month",
        tenant_limit: 100,
        features: &[
            "100 tenants",
            "domain-bound keys",
            "dedicated support",
            "validation telemetry",
            "admin analytics",
        ],
    },
];

/// Look up a plan by catalog id.
pub fn by_id(id: &str) -> Option<&'static Plan> {
    CATALOG.iter().find(|plan| plan.id == id)
}

/// The catalog's default plan.
pub fn default_plan() -> &'static Plan {
    &CATALOG[0]
}

/// Resolve a plan id, falling back to the default plan for stale or unknown
/// references. Profile composition must never fail on a dangling plan id.
pub fn resolve(id: &str) -> &'static Plan {
    by_id(id).unwrap_or_else(default_plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert_eq!(resolve("pro").name, "Pro");
        assert_eq!(resolve("enterprise").tenant_limit, 100);
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(resolve("legacy-gold").id, default_plan().id);
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, plan) in CATALOG.iter().enumerate() {
            assert!(CATALOG[i + 1..].iter().all(|other| other.id != plan.id));
        }
    }
}

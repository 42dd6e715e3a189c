//! Entity trait - the per-kind contract

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Contract implemented by every stored record shape.
///
/// Kind-specific behavior lives here (kind tag, initial-state template,
/// seed set); the store itself stays generic.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Kind tag. Ids are unique within a kind; cross-kind collisions are fine.
    const KIND: &'static str;

    /// Record id.
    fn id(&self) -> &str;

    /// Assign the record id (used when `create` generates one).
    fn set_id(&mut self, id: String);

    /// Initial-state template: the record `mutate` starts from when no
    /// record with the id exists yet.
    fn initial(id: &str) -> Self;

    /// Records inserted at first initialization. Seeding is idempotent by
    /// id, so running it again never duplicates records.
    fn seed() -> Vec<Self> {
        Vec::new()
    }

    /// Mint a fresh unique id for this kind.
    fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

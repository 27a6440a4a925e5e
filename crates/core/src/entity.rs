//! Entity and soft-delete lifecycle traits.

use chrono::{DateTime, Utc};

/// Free-text lifecycle labels carried by soft-deletable records.
///
/// `status` is display data, not the liveness test: a record is live iff its
/// `deleted_at` marker is unset.
pub mod status {
    pub const ACTIVE: &str = "Active";
    pub const DELETED: &str = "Deleted";
}

/// Entity marker + minimal interface: identity and continuity across state
/// changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Soft-delete lifecycle: records are retired by stamping a deletion time,
/// never removed from storage.
pub trait SoftDelete {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Stamp the record deleted. Implementations also flip their status
    /// label to [`status::DELETED`] in the same mutation.
    fn mark_deleted(&mut self, at: DateTime<Utc>);

    /// A record is live iff its deletion marker is unset.
    fn is_live(&self) -> bool {
        self.deleted_at().is_none()
    }
}

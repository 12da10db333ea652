use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Mandatory bookkeeping fields shared by every persisted entity.
///
/// Embedded by value in each concrete entity struct; there is no base-type
/// hierarchy. `deleted_at == None` means the record is active, `Some` means
/// it is soft-deleted and invisible to the active retrieval policy.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecordStamp {
    pub external_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecordStamp {
    /// Fresh stamp for a record being created right now.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            external_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Default for RecordStamp {
    fn default() -> Self {
        Self::new()
    }
}

/// A record is active while its deletion timestamp is unset.
pub fn is_active(stamp: &RecordStamp) -> bool {
    stamp.deleted_at.is_none()
}

/// Soft-delete: stamp the deletion time. Calling this again on an already
/// deleted record re-stamps the timestamp.
pub fn mark_deleted(stamp: &mut RecordStamp) {
    let now = Utc::now();
    stamp.deleted_at = Some(now);
    stamp.updated_at = now;
}

/// Refresh `updated_at` after a mutation.
pub fn touch(stamp: &mut RecordStamp) {
    stamp.updated_at = Utc::now();
}

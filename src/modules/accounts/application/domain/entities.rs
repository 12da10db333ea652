use serde_json::{Map, Value};

use crate::shared::domain::record::{self, RecordStamp};

/// Upper bound on the serialized size of the free-form `attrs` store.
pub const ATTRS_MAX_BYTES: usize = 5000;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Account {
    /// Shared bookkeeping fields (external id + timestamps + soft delete).
    #[serde(flatten)]
    pub record: RecordStamp,
    /// Login identifier. Stored lowercased, unique among active accounts.
    pub email: String,
    /// Argon2id PHC string. `None` means no usable password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Object path of the profile picture inside the user-images bucket.
    pub picture: String,
    pub show_onboarding: bool,
    /// Open key/value store. Size-bounded, otherwise unvalidated.
    pub attrs: Map<String, Value>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        record::is_active(&self.record)
    }

    /// An account created without a password cannot authenticate by
    /// password until one is set.
    pub fn has_usable_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Serialized size of an attrs map, measured against [`ATTRS_MAX_BYTES`].
pub fn attrs_size(attrs: &Map<String, Value>) -> usize {
    serde_json::to_string(attrs).map(|s| s.len()).unwrap_or(0)
}

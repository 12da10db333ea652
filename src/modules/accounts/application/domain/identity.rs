/// Normalizer applied to a raw login string before lookup or storage.
pub type NormalizeFn = fn(&str) -> String;

/// Which field is the login key, and how it is normalized.
///
/// Passed to the account services as an ordinary constructor parameter so
/// the identity convention is visible at every wiring site instead of being
/// buried in a framework hook.
#[derive(Clone)]
pub struct LoginIdentity {
    field: &'static str,
    normalize: NormalizeFn,
}

impl LoginIdentity {
    pub fn new(field: &'static str, normalize: NormalizeFn) -> Self {
        Self { field, normalize }
    }

    /// The convention used by this backend: email, lowercased whole.
    pub fn email() -> Self {
        Self::new("email", |raw| raw.to_lowercase())
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn normalize(&self, raw: &str) -> String {
        (self.normalize)(raw)
    }
}

impl std::fmt::Debug for LoginIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginIdentity")
            .field("field", &self.field)
            .finish()
    }
}

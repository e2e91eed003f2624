use constant_time_eq::constant_time_eq;

mod guard;

pub use guard::*;

/// Name of the header a write request carries its key in.
pub const API_KEY_HEADER: &str = "apikey";

/// The shared secret that authorizes score submissions.
#[derive(Clone, Default)]
pub struct ApiSecret {
    key: String,
}

impl ApiSecret {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// An empty secret never authorizes anything, not even an empty key.
    pub fn authorizes(&self, presented: &str) -> bool {
        !self.key.is_empty() && constant_time_eq(self.key.as_bytes(), presented.as_bytes())
    }
}

impl std::fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "ApiSecret(<empty>)")
        } else {
            write!(f, "ApiSecret(<redacted>)")
        }
    }
}

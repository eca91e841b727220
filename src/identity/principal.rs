use serde::{Deserialize, Serialize};

/// Scoped authorization that bypasses page permissions.
pub const AUTH_PAGES_SUPER: &str = "admin.pages_super";
/// Global authorization that bypasses everything.
pub const AUTH_SUPER: &str = "admin.super";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Authorization strings granted by the host's identity system.
    #[serde(default)]
    pub authorizations: Vec<String>,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), groups: Vec::new(), authorizations: Vec::new() }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_authorization(mut self, auth: impl Into<String>) -> Self {
        self.authorizations.push(auth.into());
        self
    }

    pub fn authorize(&self, auth: &str) -> bool {
        self.authorizations.iter().any(|a| a == auth)
    }

    /// Can manage every page without restriction.
    pub fn is_pages_super(&self) -> bool {
        self.authorize(AUTH_PAGES_SUPER) || self.authorize(AUTH_SUPER)
    }
}

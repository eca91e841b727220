//! Permission documents: grants keyed by group and by user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::set::PartialPermissionSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDocument {
    #[serde(default)]
    pub groups: BTreeMap<String, PartialPermissionSet>,
    #[serde(default)]
    pub users: BTreeMap<String, PartialPermissionSet>,
}

impl PermissionDocument {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() && self.users.is_empty() }

    pub fn with_group(mut self, group: impl Into<String>, grant: PartialPermissionSet) -> Self {
        self.groups.insert(group.into(), grant);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>, grant: PartialPermissionSet) -> Self {
        self.users.insert(user.into(), grant);
        self
    }

    /// Recursive replace: entries of `other` are merged key-wise into ours,
    /// entries only we have are preserved.
    pub fn overlay(&mut self, other: &PermissionDocument) {
        overlay_map(&mut self.groups, &other.groups);
        overlay_map(&mut self.users, &other.users);
    }

    /// Fold a sequence of documents left to right; later documents win.
    pub fn merged<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a PermissionDocument>,
    {
        let mut out = PermissionDocument::default();
        for d in docs {
            out.overlay(d);
        }
        out
    }
}

fn overlay_map(base: &mut BTreeMap<String, PartialPermissionSet>, over: &BTreeMap<String, PartialPermissionSet>) {
    for (name, grant) in over {
        base.entry(name.clone()).or_default().overlay(grant);
    }
}

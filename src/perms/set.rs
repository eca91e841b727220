//! Five-capability permission vector and its partial (overlay) counterpart.

use serde::{Deserialize, Serialize};

/// A single page capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Create,
    Read,
    Update,
    Delete,
    Move,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Create,
        Capability::Read,
        Capability::Update,
        Capability::Delete,
        Capability::Move,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Create => "create",
            Capability::Read => "read",
            Capability::Update => "update",
            Capability::Delete => "delete",
            Capability::Move => "move",
        }
    }
}

/// Fully populated capability vector. `Default` grants nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionSet {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    #[serde(rename = "move")]
    pub move_: bool,
}

impl PermissionSet {
    pub fn none() -> Self { Self::default() }

    pub fn all() -> Self {
        Self { create: true, read: true, update: true, delete: true, move_: true }
    }

    pub fn get(&self, cap: Capability) -> bool {
        match cap {
            Capability::Create => self.create,
            Capability::Read => self.read,
            Capability::Update => self.update,
            Capability::Delete => self.delete,
            Capability::Move => self.move_,
        }
    }

    pub fn set(&mut self, cap: Capability, value: bool) {
        match cap {
            Capability::Create => self.create = value,
            Capability::Read => self.read = value,
            Capability::Update => self.update = value,
            Capability::Delete => self.delete = value,
            Capability::Move => self.move_ = value,
        }
    }

    /// True when the set grants anything that makes a page worth listing.
    /// `move` alone does not count.
    pub fn grants_visibility(&self) -> bool {
        self.create || self.read || self.update || self.delete
    }

    /// Group merge: a capability that is already true is never downgraded;
    /// a false one takes the grant's value when the grant specifies it.
    pub fn merge_monotonic(&mut self, grant: &PartialPermissionSet) {
        for cap in Capability::ALL {
            if self.get(cap) {
                continue;
            }
            if let Some(v) = grant.get(cap) {
                self.set(cap, v);
            }
        }
    }

    /// User merge: every capability specified by the grant replaces the current value.
    pub fn merge_override(&mut self, grant: &PartialPermissionSet) {
        for cap in Capability::ALL {
            if let Some(v) = grant.get(cap) {
                self.set(cap, v);
            }
        }
    }
}

/// Capability grant where only the specified keys are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialPermissionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, rename = "move", skip_serializing_if = "Option::is_none")]
    pub move_: Option<bool>,
}

impl PartialPermissionSet {
    pub fn get(&self, cap: Capability) -> Option<bool> {
        match cap {
            Capability::Create => self.create,
            Capability::Read => self.read,
            Capability::Update => self.update,
            Capability::Delete => self.delete,
            Capability::Move => self.move_,
        }
    }

    pub fn with(mut self, cap: Capability, value: bool) -> Self {
        let slot = match cap {
            Capability::Create => &mut self.create,
            Capability::Read => &mut self.read,
            Capability::Update => &mut self.update,
            Capability::Delete => &mut self.delete,
            Capability::Move => &mut self.move_,
        };
        *slot = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Capability::ALL.iter().all(|c| self.get(*c).is_none())
    }

    /// Right-biased overlay: keys present in `other` replace ours, absent keys are kept.
    pub fn overlay(&mut self, other: &PartialPermissionSet) {
        self.create = other.create.or(self.create);
        self.read = other.read.or(self.read);
        self.update = other.update.or(self.update);
        self.delete = other.delete.or(self.delete);
        self.move_ = other.move_.or(self.move_);
    }
}

impl From<PermissionSet> for PartialPermissionSet {
    fn from(p: PermissionSet) -> Self {
        Self {
            create: Some(p.create),
            read: Some(p.read),
            update: Some(p.update),
            delete: Some(p.delete),
            move_: Some(p.move_),
        }
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod set_tests;

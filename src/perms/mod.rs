//! Permission model: capability vectors, partial grants and grant documents.

pub mod set;
pub mod document;

use std::collections::BTreeMap;

pub use set::{Capability, PermissionSet, PartialPermissionSet};
pub use document::PermissionDocument;

/// Per-request map of page path to the principal's evaluated permissions.
pub type PathPermissionMap = BTreeMap<String, PermissionSet>;

//! Final permission set for a principal: superuser bypass, additive group
//! grants, then user grants with full override.

use crate::identity::Principal;
use crate::perms::{PermissionDocument, PermissionSet};

pub fn evaluate(doc: &PermissionDocument, principal: &Principal) -> PermissionSet {
    if principal.is_pages_super() {
        return PermissionSet::all();
    }

    let mut perms = PermissionSet::none();
    for group in &principal.groups {
        if let Some(grant) = doc.groups.get(group) {
            perms.merge_monotonic(grant);
        }
    }
    // Generic to specific: the user entry has the last word.
    if let Some(grant) = doc.users.get(&principal.username) {
        perms.merge_override(grant);
    }
    tracing::trace!(target: "pagegate::evaluator", "user={} perms={:?}", principal.username, perms);
    perms
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;

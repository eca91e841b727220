//! Tree permission resolution: base config plus per-page overrides from the
//! page and its ancestors, closest ancestor winning.

use crate::content::{ContentNode, ContentTree};
use crate::identity::Principal;
use crate::perms::{Capability, PartialPermissionSet, PermissionDocument, PermissionSet};

/// Capabilities an author implicitly holds on their own page. `move` is not one of them.
const AUTHOR_GRANTS: [Capability; 4] = [Capability::Create, Capability::Read, Capability::Update, Capability::Delete];

pub fn author_grant() -> PartialPermissionSet {
    AUTHOR_GRANTS.iter().fold(PartialPermissionSet::default(), |p, c| p.with(*c, true))
}

/// Override that withdraws every capability from `principal` at this level.
fn deny_all(principal: &Principal) -> PermissionDocument {
    let none = PartialPermissionSet::from(PermissionSet::none());
    let doc = principal
        .groups
        .iter()
        .fold(PermissionDocument::new(), |d, g| d.with_group(g.clone(), none));
    doc.with_user(principal.username.clone(), none)
}

/// Override contributed by a single page, if any.
///
/// Authorship takes precedence over an explicit `permissions` block: when the
/// evaluating principal wrote the page, only the implicit author grant applies.
/// A `permissions` block that does not parse denies everything at its level.
pub fn node_override(node: &ContentNode, principal: &Principal) -> Option<PermissionDocument> {
    if let Some(author) = node.header.author() {
        if author == principal.username {
            return Some(PermissionDocument::new().with_user(author, author_grant()));
        }
    }
    match node.header.permissions() {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(target: "pagegate::resolver", "malformed permissions header on {}, denying: {}", node.path, e);
            Some(deny_all(principal))
        }
    }
}

/// One entry per level from the page (distance 0) up to, but excluding, the root.
pub fn ancestor_overrides<T: ContentTree + ?Sized>(
    tree: &T,
    node: &ContentNode,
    principal: &Principal,
) -> Vec<Option<PermissionDocument>> {
    let mut out = Vec::new();
    // The root contributes nothing, and neither does a page with no parent.
    if tree.parent(node).is_none() {
        return out;
    }
    let mut cur = node;
    loop {
        out.push(node_override(cur, principal));
        match tree.parent(cur) {
            Some(p) if tree.parent(p).is_some() => cur = p,
            _ => break,
        }
    }
    out
}

pub struct TreeResolver<'a, T: ContentTree + ?Sized> {
    tree: &'a T,
    base: &'a PermissionDocument,
}

impl<'a, T: ContentTree + ?Sized> TreeResolver<'a, T> {
    pub fn new(tree: &'a T, base: &'a PermissionDocument) -> Self {
        Self { tree, base }
    }

    pub fn tree(&self) -> &'a T { self.tree }

    /// Merged document for `node` as seen by `principal`; empty when there is no node.
    pub fn resolve(&self, node: Option<&ContentNode>, principal: &Principal) -> PermissionDocument {
        let Some(node) = node else { return PermissionDocument::default(); };
        let overrides = ancestor_overrides(self.tree, node, principal);
        let mut doc = self.base.clone();
        // Furthest first so the closest level is applied last.
        for (distance, ov) in overrides.iter().enumerate().rev() {
            if let Some(ov) = ov {
                tracing::trace!(target: "pagegate::resolver", "apply override path={} distance={}", node.path, distance);
                doc.overlay(ov);
            }
        }
        tracing::debug!(
            target: "pagegate::resolver",
            "resolved path={} levels={} groups={} users={}",
            node.path,
            overrides.len(),
            doc.groups.len(),
            doc.users.len()
        );
        doc
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;

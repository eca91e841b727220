//! Upward read propagation: every ancestor (below the pages root) of a page the
//! principal can act on becomes listable.

use crate::content::{parent_path, path_depth};
use crate::perms::{PathPermissionMap, PermissionSet};

/// Paths sorted from the deepest descendants to the shallowest.
fn deep_to_root(map: &PathPermissionMap) -> Vec<String> {
    let mut paths: Vec<String> = map.keys().cloned().collect();
    paths.sort_by(|a, b| path_depth(b).cmp(&path_depth(a)).then_with(|| b.cmp(a)));
    paths
}

/// Returns `map` with `read=true` set on the in-root ancestors of every visible page.
/// Nothing but `read` is ever changed; the pages root itself is left alone.
pub fn visible_tree(mut map: PathPermissionMap, pages_root: &str) -> PathPermissionMap {
    let root = pages_root.trim_end_matches('/');
    let prefix = format!("{}/", root);
    let mut added = 0usize;

    for path in deep_to_root(&map) {
        let visible = map.get(&path).map(PermissionSet::grants_visibility).unwrap_or(false);
        if !visible {
            continue;
        }
        let mut cur = parent_path(&path);
        while let Some(p) = cur {
            if !p.starts_with(&prefix) {
                break;
            }
            let entry = map.entry(p.to_string()).or_insert_with(|| {
                added += 1;
                PermissionSet::none()
            });
            entry.read = true;
            cur = parent_path(p);
        }
    }
    tracing::debug!(target: "pagegate::visibility", "visible tree: entries={} added={}", map.len(), added);
    map
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod visibility_tests;

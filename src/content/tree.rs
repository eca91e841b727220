//! Read-only access to the host's content tree plus an in-memory implementation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::node::{parent_path, ContentNode};

/// Lookup capability supplied by the host's content store.
pub trait ContentTree {
    fn get(&self, path: &str) -> Option<&ContentNode>;

    /// Page by public route (e.g. `/blog/post`).
    fn find(&self, route: &str) -> Option<&ContentNode>;

    fn parent(&self, node: &ContentNode) -> Option<&ContentNode>;

    fn children(&self, node: &ContentNode) -> Vec<&ContentNode>;

    /// Top node of the tree (the pages root), if any.
    fn root(&self) -> Option<&ContentNode>;
}

/// Tree keyed by path; a node's parent is the node at its path minus the last segment.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<String, ContentNode>,
    routes: HashMap<String, String>,
    /// Parent path to child paths.
    children: HashMap<String, BTreeSet<String>>,
}

impl MemoryTree {
    pub fn new() -> Self { Self::default() }

    pub fn from_nodes<I: IntoIterator<Item = ContentNode>>(nodes: I) -> Self {
        let mut t = Self::new();
        for n in nodes {
            t.insert(n);
        }
        t
    }

    /// Insert or replace the node at `node.path`.
    pub fn insert(&mut self, node: ContentNode) {
        if let Some(old) = self.nodes.get(&node.path).and_then(|n| n.route.as_ref()) {
            self.routes.remove(&normalize_route(old));
        }
        if let Some(r) = node.route.as_ref() {
            self.routes.insert(normalize_route(r), node.path.clone());
        }
        if let Some(parent) = parent_path(&node.path) {
            self.children.entry(parent.to_string()).or_default().insert(node.path.clone());
        }
        self.nodes.insert(node.path.clone(), node);
    }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

impl ContentTree for MemoryTree {
    fn get(&self, path: &str) -> Option<&ContentNode> { self.nodes.get(path) }

    fn find(&self, route: &str) -> Option<&ContentNode> {
        self.routes.get(&normalize_route(route)).and_then(|p| self.nodes.get(p))
    }

    fn parent(&self, node: &ContentNode) -> Option<&ContentNode> {
        parent_path(&node.path).and_then(|p| self.nodes.get(p))
    }

    fn children(&self, node: &ContentNode) -> Vec<&ContentNode> {
        self.children
            .get(&node.path)
            .map(|paths| paths.iter().filter_map(|p| self.nodes.get(p)).collect())
            .unwrap_or_default()
    }

    fn root(&self) -> Option<&ContentNode> {
        // Shallowest node without a parent in the tree.
        self.nodes
            .values()
            .filter(|n| self.parent(n).is_none())
            .min_by_key(|n| n.depth())
    }
}

fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() { "/".to_string() } else if trimmed.starts_with('/') { trimmed.to_string() } else { format!("/{}", trimmed) }
}

/// The node and every ancestor up to the root, keyed by path.
pub fn branch_up<'t, T: ContentTree + ?Sized>(tree: &'t T, node: &'t ContentNode) -> BTreeMap<String, &'t ContentNode> {
    let mut out = BTreeMap::new();
    let mut cur = Some(node);
    while let Some(n) = cur {
        out.insert(n.path.clone(), n);
        cur = tree.parent(n);
    }
    out
}

/// The given nodes and all their descendants, keyed by path.
pub fn branch_down<'t, T: ContentTree + ?Sized>(tree: &'t T, nodes: &[&'t ContentNode]) -> BTreeMap<String, &'t ContentNode> {
    let mut out = BTreeMap::new();
    let mut stack: Vec<&ContentNode> = nodes.to_vec();
    while let Some(n) = stack.pop() {
        if out.insert(n.path.clone(), n).is_some() {
            continue;
        }
        stack.extend(tree.children(n));
    }
    out
}

/// Nearest existing page for a route, stripping one segment at a time.
/// A route being created does not exist yet, so its closest ancestor is used.
pub fn find_closest<'t, T: ContentTree + ?Sized>(tree: &'t T, route: &str) -> Option<&'t ContentNode> {
    let mut r = normalize_route(route);
    loop {
        if let Some(n) = tree.find(&r) {
            return Some(n);
        }
        if r == "/" {
            return None;
        }
        r = match r.rfind('/') {
            Some(0) | None => "/".to_string(),
            Some(i) => r[..i].to_string(),
        };
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;

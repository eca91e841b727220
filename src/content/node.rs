//! Content node and its header metadata bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::perms::PermissionDocument;

pub const HEADER_AUTHOR: &str = "author";
pub const HEADER_PERMISSIONS: &str = "permissions";

/// Front-matter of a page. Field presence matters, so it is kept as a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(pub BTreeMap<String, Value>);

impl Header {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    /// Set or remove a field; `None` removes it.
    pub fn put(&mut self, key: &str, value: Option<Value>) {
        match value {
            Some(v) => { self.0.insert(key.to_string(), v); }
            None => { self.0.remove(key); }
        }
    }

    pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }

    pub fn author(&self) -> Option<&str> {
        self.0.get(HEADER_AUTHOR).and_then(|v| v.as_str())
    }

    /// Explicit `permissions` block. A block that does not deserialize is an error;
    /// callers decide whether to reject the page or fail closed.
    pub fn permissions(&self) -> Result<Option<PermissionDocument>, serde_json::Error> {
        match self.0.get(HEADER_PERMISSIONS) {
            None => Ok(None),
            Some(raw) => serde_json::from_value::<PermissionDocument>(raw.clone()).map(Some),
        }
    }
}

impl From<Value> for Header {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(m) => Header(m.into_iter().collect()),
            _ => Header::default(),
        }
    }
}

/// A page as supplied by the content store. Parent/children are reached through
/// [`super::ContentTree`], never stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub path: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub header: Header,
    /// Structural properties such as `template`, `slug`, `folder`, `order`.
    #[serde(default)]
    pub props: BTreeMap<String, Value>,
}

impl ContentNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<Header>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_prop(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.props.insert(name.to_string(), value.into());
        self
    }

    pub fn prop(&self, name: &str) -> Option<&Value> { self.props.get(name) }

    pub fn put_prop(&mut self, name: &str, value: Option<Value>) {
        match value {
            Some(v) => { self.props.insert(name.to_string(), v); }
            None => { self.props.remove(name); }
        }
    }

    /// Number of '/'-separated segments in the path.
    pub fn depth(&self) -> usize { path_depth(&self.path) }
}

pub fn path_depth(path: &str) -> usize {
    path.split('/').count()
}

/// Path with its last segment removed, or `None` at the top.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rfind('/').map(|i| &path[..i])
}

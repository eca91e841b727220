//! Locked-field enforcement for editors without full update rights.
//!
//! Any locked field that was added, removed or changed in the proposed page is
//! forced back to the original value (an added field is removed again). A
//! locked structural property also drags its declared dependents back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{ContentNode, Header};

/// Structural property that may not be changed, plus the properties reverted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPropertySpec {
    pub name: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl LockedPropertySpec {
    pub fn new(name: impl Into<String>, dependencies: Vec<String>) -> Self {
        Self { name: name.into(), dependencies }
    }
}

/// Header field that may not be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedHeaderSpec {
    pub name: String,
}

impl LockedHeaderSpec {
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    Added,
    Removed,
    Updated,
}

/// How a field differs between the original and the proposed page.
pub fn detect(original: Option<&Value>, proposed: Option<&Value>) -> Option<Change> {
    match (original, proposed) {
        (None, None) => None,
        (None, Some(_)) => Some(Change::Added),
        (Some(_), None) => Some(Change::Removed),
        (Some(a), Some(b)) if a != b => Some(Change::Updated),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldScope {
    Property,
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertedField {
    pub name: String,
    pub scope: FieldScope,
    pub change: Change,
}

/// Sanitized page plus what was reverted. `reverted()` counts top-level locked
/// entries only; dependents are never counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Enforcement {
    pub node: ContentNode,
    pub reverted_fields: Vec<RevertedField>,
}

impl Enforcement {
    pub fn reverted(&self) -> usize { self.reverted_fields.len() }

    pub fn is_clean(&self) -> bool { self.reverted_fields.is_empty() }
}

/// Revert locked structural properties on `proposed` in place.
pub fn check_locked_props(original: &ContentNode, proposed: &mut ContentNode, specs: &[LockedPropertySpec]) -> Vec<RevertedField> {
    let mut out = Vec::new();
    for spec in specs {
        let Some(change) = detect(original.prop(&spec.name), proposed.prop(&spec.name)) else { continue; };
        proposed.put_prop(&spec.name, original.prop(&spec.name).cloned());
        for dep in &spec.dependencies {
            proposed.put_prop(dep, original.prop(dep).cloned());
        }
        tracing::debug!(
            target: "pagegate::locked",
            "reverted locked property '{}' ({:?}) on {} with {} dependents",
            spec.name, change, original.path, spec.dependencies.len()
        );
        out.push(RevertedField { name: spec.name.clone(), scope: FieldScope::Property, change });
    }
    out
}

/// Revert locked header fields on `proposed` in place.
pub fn check_locked_header(original: &Header, proposed: &mut Header, specs: &[LockedHeaderSpec]) -> Vec<RevertedField> {
    let mut out = Vec::new();
    for spec in specs {
        let Some(change) = detect(original.get(&spec.name), proposed.get(&spec.name)) else { continue; };
        proposed.put(&spec.name, original.get(&spec.name).cloned());
        tracing::debug!(target: "pagegate::locked", "reverted locked header '{}' ({:?})", spec.name, change);
        out.push(RevertedField { name: spec.name.clone(), scope: FieldScope::Header, change });
    }
    out
}

/// Sanitize `proposed` against `original`: structural properties first, then the header.
pub fn enforce(
    original: &ContentNode,
    proposed: ContentNode,
    props: &[LockedPropertySpec],
    headers: &[LockedHeaderSpec],
) -> Enforcement {
    let mut node = proposed;
    let mut reverted_fields = check_locked_props(original, &mut node, props);
    reverted_fields.extend(check_locked_header(&original.header, &mut node.header, headers));
    Enforcement { node, reverted_fields }
}

#[cfg(test)]
#[path = "locked_tests.rs"]
mod locked_tests;

//! Layered plugin configuration: plugin defaults < deployment < environment.
//!
//! Each layer is an already-parsed document; unspecified values inherit from the
//! layer below. Permission documents merge recursively (group/user entries
//! key-wise, capabilities per key).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::locked::{LockedHeaderSpec, LockedPropertySpec};
use crate::perms::PermissionDocument;

pub const DEFAULT_PAGES_ROOT: &str = "pages";

/// Dependents of a locked structural property, as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPropEntry {
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// One configuration layer. Every field is optional so layers can be partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginLayer {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub pages_root: Option<String>,
    #[serde(default)]
    pub permissions: Option<PermissionDocument>,
    #[serde(default)]
    pub locked_props: Option<BTreeMap<String, LockedPropEntry>>,
    #[serde(default)]
    pub locked_header: Option<Vec<String>>,
}

impl PluginLayer {
    pub fn from_value(v: Value) -> Result<Self> {
        serde_json::from_value(v).context("invalid plugin configuration layer")
    }

    pub fn with_permissions(doc: PermissionDocument) -> Self {
        Self { permissions: Some(doc), ..Default::default() }
    }
}

/// The three configuration sources in precedence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayers {
    pub plugin: Option<PluginLayer>,
    pub deployment: Option<PluginLayer>,
    pub environment: Option<PluginLayer>,
}

impl ConfigLayers {
    pub fn new(plugin: Option<PluginLayer>, deployment: Option<PluginLayer>, environment: Option<PluginLayer>) -> Self {
        Self { plugin, deployment, environment }
    }

    /// Build from parsed values; `None` means the source does not exist.
    pub fn from_values(plugin: Option<Value>, deployment: Option<Value>, environment: Option<Value>) -> Result<Self> {
        Ok(Self {
            plugin: plugin.map(PluginLayer::from_value).transpose().context("plugin defaults")?,
            deployment: deployment.map(PluginLayer::from_value).transpose().context("deployment config")?,
            environment: environment.map(PluginLayer::from_value).transpose().context("environment config")?,
        })
    }

    fn ordered(&self) -> impl Iterator<Item = &PluginLayer> {
        [self.plugin.as_ref(), self.deployment.as_ref(), self.environment.as_ref()].into_iter().flatten()
    }

    /// Base permission document: the three layers merged in fixed order.
    pub fn merged_permissions(&self) -> PermissionDocument {
        PermissionDocument::merged(self.ordered().filter_map(|l| l.permissions.as_ref()))
    }

    pub fn effective(&self) -> EffectiveConfig {
        EffectiveConfig::from_layers(self)
    }
}

/// Fully resolved configuration used during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub enabled: bool,
    pub pages_root: String,
    pub permissions: PermissionDocument,
    pub locked_props: Vec<LockedPropertySpec>,
    pub locked_header: Vec<LockedHeaderSpec>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pages_root: DEFAULT_PAGES_ROOT.to_string(),
            permissions: PermissionDocument::default(),
            locked_props: Vec::new(),
            locked_header: Vec::new(),
        }
    }
}

impl EffectiveConfig {
    pub fn from_layers(layers: &ConfigLayers) -> Self {
        let mut enabled = true;
        let mut pages_root = DEFAULT_PAGES_ROOT.to_string();
        // Locked props merge per property name; the header list is replaced whole.
        let mut props: BTreeMap<String, LockedPropEntry> = BTreeMap::new();
        let mut header: Vec<String> = Vec::new();

        for layer in layers.ordered() {
            if let Some(e) = layer.enabled { enabled = e; }
            if let Some(r) = layer.pages_root.as_ref() { pages_root = r.trim_end_matches('/').to_string(); }
            if let Some(p) = layer.locked_props.as_ref() {
                for (name, entry) in p {
                    props.insert(name.clone(), entry.clone());
                }
            }
            if let Some(h) = layer.locked_header.as_ref() { header = h.clone(); }
        }

        let locked_props = props
            .into_iter()
            .map(|(name, e)| LockedPropertySpec::new(name, e.dependencies))
            .collect();
        let locked_header = header.into_iter().map(LockedHeaderSpec::new).collect();

        Self {
            enabled,
            pages_root,
            permissions: layers.merged_permissions(),
            locked_props,
            locked_header,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

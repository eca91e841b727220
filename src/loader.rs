//! Reads configuration layers and content trees from JSON files.
//! Missing files are absent layers; malformed files are errors with file context.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::ConfigLayers;
use crate::content::{ContentNode, MemoryTree};

#[derive(Debug, Clone, Default)]
pub struct LayerPaths {
    pub plugin: Option<PathBuf>,
    pub deployment: Option<PathBuf>,
    pub environment: Option<PathBuf>,
}

fn read_json(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        tracing::debug!(target: "pagegate::loader", "config layer not found: {}", path.display());
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let v: Value = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(v))
}

fn read_opt(path: Option<&PathBuf>) -> Result<Option<Value>> {
    match path {
        Some(p) => read_json(p),
        None => Ok(None),
    }
}

pub fn load_layers(paths: &LayerPaths) -> Result<ConfigLayers> {
    let layers = ConfigLayers::from_values(
        read_opt(paths.plugin.as_ref())?,
        read_opt(paths.deployment.as_ref())?,
        read_opt(paths.environment.as_ref())?,
    )?;
    tracing::info!(
        target: "pagegate::loader",
        "loaded config layers: plugin={} deployment={} environment={}",
        layers.plugin.is_some(),
        layers.deployment.is_some(),
        layers.environment.is_some()
    );
    Ok(layers)
}

/// A tree file is a JSON array of nodes. Every `permissions` header must parse.
pub fn load_tree(path: &Path) -> Result<MemoryTree> {
    let v = read_json(path)?.ok_or_else(|| anyhow!("tree file not found: {}", path.display()))?;
    let nodes: Vec<ContentNode> = serde_json::from_value(v).with_context(|| format!("decoding nodes in {}", path.display()))?;
    for n in nodes.iter() {
        n.header
            .permissions()
            .with_context(|| format!("invalid permissions header on {} in {}", n.path, path.display()))?;
    }
    Ok(MemoryTree::from_nodes(nodes))
}

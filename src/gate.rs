//! Host-facing gate: create/update checks, author stamping and per-request
//! render data. Decisions carry translation keys; the host renders them and
//! handles redirects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::EffectiveConfig;
use crate::content::{branch_down, branch_up, find_closest, ContentNode, ContentTree, Header, HEADER_AUTHOR};
use crate::error::{AppError, AppResult};
use crate::evaluator::evaluate;
use crate::identity::Principal;
use crate::locked::{enforce, Enforcement, RevertedField};
use crate::perms::{PathPermissionMap, PermissionSet};
use crate::resolver::TreeResolver;
use crate::visibility::visible_tree;

pub const MSG_PROPERTY_LOCKED: &str = "WARNING_PROPERTY_LOCKED";
pub const MSG_PROPERTY_REVERTED: &str = "WARNING_PROPERTY_REVERTED";
pub const MSG_CREATE_IN_PARENT: &str = "WARNING_CREATE_IN_PARENT";
pub const MSG_UPDATE: &str = "WARNING_UPDATE";

/// Admin locations where the page tree is shown.
const TREE_LOCATIONS: [&str; 2] = ["dashboard", "pages"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Notice,
    Warning,
    Error,
}

/// Message for the host to translate and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

impl Message {
    pub fn new(level: Level, key: &str) -> Self { Self { level, key: key.to_string(), arg: None } }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allow: bool,
    pub reason: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Decision {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self { allow: true, reason: Some(reason.into()), messages: vec![] }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self { allow: false, reason: Some(reason.into()), messages: vec![] }
    }

    pub fn with_message(mut self, m: Message) -> Self {
        self.messages.push(m);
        self
    }

    /// Denials become `AppError::Forbidden` keyed by the last error message.
    pub fn into_result(self) -> AppResult<()> {
        if self.allow {
            return Ok(());
        }
        let reason = self.reason.unwrap_or_else(|| "denied".into());
        let key = self
            .messages
            .iter()
            .rev()
            .find(|m| m.level == Level::Error)
            .map(|m| m.key.clone())
            .unwrap_or_else(|| reason.clone());
        Err(AppError::forbidden(reason, key))
    }
}

/// Result of the pre-update hook: the (possibly sanitized) page to hand back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub decision: Decision,
    pub node: ContentNode,
    /// Locked fields forced back on `node`; empty when the save was allowed.
    pub reverted_fields: Vec<RevertedField>,
}

/// Data for the host's view layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    pub pages_super: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perms: Option<PathPermissionMap>,
}

pub struct PageGate<'a, T: ContentTree + ?Sized> {
    tree: &'a T,
    config: &'a EffectiveConfig,
}

impl<'a, T: ContentTree + ?Sized> PageGate<'a, T> {
    pub fn new(tree: &'a T, config: &'a EffectiveConfig) -> Self {
        Self { tree, config }
    }

    /// Resolved and evaluated permissions of `principal` on `node`.
    pub fn permissions_for(&self, node: Option<&ContentNode>, principal: &Principal) -> PermissionSet {
        if principal.is_pages_super() {
            return PermissionSet::all();
        }
        let resolver = TreeResolver::new(self.tree, &self.config.permissions);
        evaluate(&resolver.resolve(node, principal), principal)
    }

    pub fn paths_perms_for_user(&self, pages: &BTreeMap<String, &ContentNode>, principal: &Principal) -> PathPermissionMap {
        pages
            .iter()
            .map(|(path, node)| (path.clone(), self.permissions_for(Some(*node), principal)))
            .collect()
    }

    /// Before a page is created under `parent_route`. Authorship of the parent
    /// does not by itself allow creating children unless it grants `create`.
    pub fn pre_create(&self, parent_route: &str, principal: &Principal) -> Decision {
        let parent = self.tree.find(parent_route).or_else(|| self.tree.get(parent_route));
        let decision = if !self.config.enabled {
            Decision::allow("plugin_disabled")
        } else {
            match parent {
                Some(p) if self.permissions_for(Some(p), principal).create => Decision::allow("create_granted"),
                Some(_) => Decision::deny("create_denied")
                    .with_message(Message::new(Level::Error, MSG_CREATE_IN_PARENT)),
                None => Decision::deny("parent_not_found")
                    .with_message(Message::new(Level::Error, MSG_CREATE_IN_PARENT)),
            }
        };
        tracing::debug!(
            target: "pagegate::gate",
            "pre_create user={} parent={} allow={} reason={:?}",
            principal.username, parent_route, decision.allow, decision.reason
        );
        decision
    }

    /// Before a page is saved. Without update rights the locked fields are
    /// reverted (reported as warnings) and the save is still denied.
    pub fn pre_update(&self, original: &ContentNode, proposed: ContentNode, principal: &Principal) -> UpdateOutcome {
        if !self.config.enabled {
            return UpdateOutcome { decision: Decision::allow("plugin_disabled"), node: proposed, reverted_fields: Vec::new() };
        }

        let perms = self.permissions_for(Some(original), principal);
        if perms.update {
            return UpdateOutcome { decision: Decision::allow("update_granted"), node: proposed, reverted_fields: Vec::new() };
        }

        let Enforcement { node, reverted_fields } =
            enforce(original, proposed, &self.config.locked_props, &self.config.locked_header);
        let mut decision = Decision::deny("update_denied");
        for f in reverted_fields.iter() {
            decision.messages.push(Message::new(Level::Warning, MSG_PROPERTY_LOCKED).with_arg(f.name.clone()));
        }
        if !reverted_fields.is_empty() {
            decision.messages.push(Message::new(Level::Notice, MSG_PROPERTY_REVERTED));
        }
        decision.messages.push(Message::new(Level::Error, MSG_UPDATE));

        tracing::debug!(
            target: "pagegate::gate",
            "pre_update user={} path={} denied reverted={}",
            principal.username, original.path, reverted_fields.len()
        );
        UpdateOutcome { decision, node, reverted_fields }
    }

    /// Stamp the creating user as author when the header has none (or a null one).
    /// Returns true if stamped.
    pub fn post_create(&self, header: &mut Header, principal: &Principal) -> bool {
        if header.get(HEADER_AUTHOR).is_some_and(|v| !v.is_null()) {
            return false;
        }
        header.put(HEADER_AUTHOR, Some(serde_json::Value::String(principal.username.clone())));
        true
    }

    /// Render data for an admin request. `route` is `None` when listing pages.
    pub fn render_context(&self, location: &str, route: Option<&str>, principal: &Principal) -> RenderContext {
        let mut ctx = RenderContext { pages_super: principal.is_pages_super(), perms: None };
        crate::tprintln!("render_context location={} route={:?} user={}", location, route, principal.username);
        if !TREE_LOCATIONS.contains(&location) {
            return ctx;
        }
        let perms = match route {
            None => {
                let Some(root) = self.tree.root() else { return ctx; };
                let top = self.tree.children(root);
                let pages = branch_down(self.tree, &top);
                visible_tree(self.paths_perms_for_user(&pages, principal), &self.config.pages_root)
            }
            Some(r) => {
                let Some(page) = find_closest(self.tree, r) else { return ctx; };
                self.paths_perms_for_user(&branch_up(self.tree, page), principal)
            }
        };
        ctx.perms = Some(perms);
        ctx
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod gate_tests;

use super::*;
use crate::config::ConfigLayers;
use crate::content::MemoryTree;
use crate::identity::AUTH_PAGES_SUPER;
use crate::locked::{LockedHeaderSpec, LockedPropertySpec};
use serde_json::json;

fn config() -> EffectiveConfig {
    let mut eff = ConfigLayers::from_values(
        Some(json!({"permissions": {"groups": {"editors": {"read": true}}}})),
        None,
        None,
    )
    .unwrap()
    .effective();
    eff.locked_props = vec![LockedPropertySpec::new("template", vec!["slug".into()])];
    eff.locked_header = vec![LockedHeaderSpec::new("title")];
    eff
}

fn tree() -> MemoryTree {
    MemoryTree::from_nodes(vec![
        ContentNode::new("pages"),
        ContentNode::new("pages/blog").with_route("/blog").with_header(json!({
            "permissions": {"groups": {"editors": {"create": true, "update": true}}}
        })),
        ContentNode::new("pages/blog/post").with_route("/blog/post").with_header(json!({"author": "alice"})),
        ContentNode::new("pages/private").with_route("/private").with_header(json!({
            "permissions": {"groups": {"editors": {"read": false}}}
        })),
        ContentNode::new("pages/private/shared").with_route("/private/shared").with_header(json!({
            "permissions": {"users": {"bob": {"read": true}}}
        })),
    ])
}

#[test]
fn author_gets_everything_but_move() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let p = gate.permissions_for(t.get("pages/blog/post"), &Principal::new("alice"));
    assert_eq!(p, PermissionSet { create: true, read: true, update: true, delete: true, move_: false });
}

#[test]
fn pre_create_requires_create_on_parent() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let editor = Principal::new("erin").with_groups(["editors"]);
    assert!(gate.pre_create("/blog", &editor).allow);

    let denied = gate.pre_create("/private", &editor);
    assert!(!denied.allow);
    assert_eq!(denied.messages[0].key, MSG_CREATE_IN_PARENT);
    assert_eq!(denied.messages[0].level, Level::Error);
    let err = denied.into_result().unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));
    assert_eq!(err.message(), MSG_CREATE_IN_PARENT);

    assert_eq!(gate.pre_create("/nowhere", &editor).reason.as_deref(), Some("parent_not_found"));
    let root = Principal::new("root").with_authorization(AUTH_PAGES_SUPER);
    assert!(gate.pre_create("/private", &root).allow);
}

#[test]
fn pre_update_allows_with_update_rights() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let original = t.get("pages/blog").unwrap().clone();
    let mut proposed = original.clone();
    proposed.header.put("title", Some(json!("New")));
    let out = gate.pre_update(&original, proposed.clone(), &Principal::new("erin").with_groups(["editors"]));
    assert!(out.decision.allow);
    assert!(out.reverted_fields.is_empty());
    assert_eq!(out.node, proposed);
}

#[test]
fn pre_update_without_rights_reverts_and_denies() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let original = t.get("pages/private").unwrap().clone().with_prop("template", "page").with_prop("slug", "private");
    let mut proposed = original.clone().with_prop("template", "blog").with_prop("slug", "renamed");
    proposed.header.put("title", Some(json!("Hacked")));

    let out = gate.pre_update(&original, proposed, &Principal::new("erin").with_groups(["editors"]));
    assert!(!out.decision.allow);
    assert_eq!(out.node.prop("template"), Some(&json!("page")));
    assert_eq!(out.node.prop("slug"), Some(&json!("private")));
    assert!(!out.node.header.contains("title"));
    let names: Vec<&str> = out.reverted_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["template", "title"]);

    let levels: Vec<Level> = out.decision.messages.iter().map(|m| m.level).collect();
    assert_eq!(levels, vec![Level::Warning, Level::Warning, Level::Notice, Level::Error]);
    assert_eq!(out.decision.messages[0].arg.as_deref(), Some("template"));
    assert_eq!(out.decision.messages.last().unwrap().key, MSG_UPDATE);
}

#[test]
fn pre_update_clean_denial_has_no_notice() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let original = t.get("pages/private").unwrap().clone();
    let out = gate.pre_update(&original, original.clone(), &Principal::new("erin"));
    assert!(!out.decision.allow);
    assert_eq!(out.decision.messages.len(), 1);
    assert_eq!(out.decision.messages[0].level, Level::Error);
}

#[test]
fn disabled_plugin_allows() {
    let t = tree();
    let mut cfg = config();
    cfg.enabled = false;
    let gate = PageGate::new(&t, &cfg);
    assert_eq!(gate.pre_create("/private", &Principal::new("x")).reason.as_deref(), Some("plugin_disabled"));
}

#[test]
fn post_create_stamps_author_once() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let mut header = Header::new();
    assert!(gate.post_create(&mut header, &Principal::new("alice")));
    assert_eq!(header.author(), Some("alice"));
    assert!(!gate.post_create(&mut header, &Principal::new("bob")));
    assert_eq!(header.author(), Some("alice"));
}

#[test]
fn post_create_replaces_null_author() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let mut header = Header::from(json!({"title": "Fresh", "author": null}));
    assert!(gate.post_create(&mut header, &Principal::new("carol")));
    assert_eq!(header.author(), Some("carol"));
    assert_eq!(header.get("title"), Some(&json!("Fresh")));
}

#[test]
fn listing_propagates_visibility() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let ctx = gate.render_context("pages", None, &Principal::new("bob"));
    assert!(!ctx.pages_super);
    let perms = ctx.perms.unwrap();
    assert!(perms["pages/private/shared"].read);
    assert!(perms["pages/private"].read, "ancestor of a readable page becomes listable");
    assert!(!perms["pages/private"].update);
    assert!(!perms["pages/blog"].read);
    assert!(!perms.contains_key("pages"));
}

#[test]
fn editing_lists_branch_up_without_propagation() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let ctx = gate.render_context("pages", Some("/blog/post/new-child"), &Principal::new("alice"));
    let perms = ctx.perms.unwrap();
    let keys: Vec<&str> = perms.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["pages", "pages/blog", "pages/blog/post"]);
    assert!(perms["pages/blog/post"].update);
    assert!(!perms["pages/blog"].read);
}

#[test]
fn other_locations_only_report_super_flag() {
    let t = tree();
    let cfg = config();
    let gate = PageGate::new(&t, &cfg);
    let ctx = gate.render_context("plugins", None, &Principal::new("root").with_authorization(AUTH_PAGES_SUPER));
    assert!(ctx.pages_super);
    assert!(ctx.perms.is_none());
}

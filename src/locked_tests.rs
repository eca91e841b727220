use super::*;
use serde_json::json;

fn header_specs(names: &[&str]) -> Vec<LockedHeaderSpec> {
    names.iter().map(|n| LockedHeaderSpec::new(*n)).collect()
}

#[test]
fn changed_header_is_reverted_others_kept() {
    let original = ContentNode::new("pages/a").with_header(json!({
        "title": "A",
        "permissions": {"groups": {"editors": {"read": true}}}
    }));
    let proposed = ContentNode::new("pages/a").with_header(json!({
        "title": "B",
        "permissions": {"groups": {"editors": {"read": true, "update": true}}}
    }));
    let res = enforce(&original, proposed, &[], &header_specs(&["title"]));
    assert_eq!(res.node.header.get("title"), Some(&json!("A")));
    assert_eq!(
        res.node.header.get("permissions"),
        Some(&json!({"groups": {"editors": {"read": true, "update": true}}}))
    );
    assert_eq!(res.reverted(), 1);
    assert_eq!(res.reverted_fields[0].change, Change::Updated);
}

#[test]
fn structural_field_reverts_dependents_once() {
    let original = ContentNode::new("pages/a").with_prop("template", "page").with_prop("slug", "original-slug");
    let proposed = ContentNode::new("pages/a").with_prop("template", "blog").with_prop("slug", "new-slug");
    let specs = vec![LockedPropertySpec::new("template", vec!["slug".into()])];
    let res = enforce(&original, proposed, &specs, &[]);
    assert_eq!(res.node.prop("template"), Some(&json!("page")));
    assert_eq!(res.node.prop("slug"), Some(&json!("original-slug")));
    assert_eq!(res.reverted(), 1);
}

#[test]
fn dependents_alone_are_not_locked() {
    let original = ContentNode::new("pages/a").with_prop("template", "page").with_prop("slug", "one");
    let proposed = ContentNode::new("pages/a").with_prop("template", "page").with_prop("slug", "two");
    let specs = vec![LockedPropertySpec::new("template", vec!["slug".into()])];
    let res = enforce(&original, proposed, &specs, &[]);
    assert_eq!(res.node.prop("slug"), Some(&json!("two")));
    assert!(res.is_clean());
}

#[test]
fn added_and_removed_fields() {
    let original = ContentNode::new("pages/a").with_header(json!({"author": "alice"}));
    let proposed = ContentNode::new("pages/a").with_header(json!({"menu": "Hidden"}));
    let res = enforce(&original, proposed, &[], &header_specs(&["author", "menu", "visible"]));
    assert_eq!(res.node.header.get("author"), Some(&json!("alice")));
    assert!(!res.node.header.contains("menu"));
    assert_eq!(res.reverted(), 2);
    let changes: Vec<Change> = res.reverted_fields.iter().map(|f| f.change).collect();
    assert_eq!(changes, vec![Change::Removed, Change::Added]);
}

#[test]
fn added_structural_field_is_removed_with_dependents_restored() {
    let original = ContentNode::new("pages/a").with_prop("slug", "keep");
    let proposed = ContentNode::new("pages/a").with_prop("template", "blog").with_prop("slug", "changed");
    let specs = vec![LockedPropertySpec::new("template", vec!["slug".into()])];
    let res = enforce(&original, proposed, &specs, &[]);
    assert!(res.node.prop("template").is_none());
    assert_eq!(res.node.prop("slug"), Some(&json!("keep")));
    assert_eq!(res.reverted(), 1);
}

#[test]
fn enforcement_is_idempotent() {
    let original = ContentNode::new("pages/a").with_prop("template", "page").with_header(json!({"title": "A"}));
    let proposed = ContentNode::new("pages/a").with_prop("template", "blog").with_header(json!({"title": "B"}));
    let specs = vec![LockedPropertySpec::new("template", vec![])];
    let headers = header_specs(&["title"]);
    let first = enforce(&original, proposed, &specs, &headers);
    assert_eq!(first.reverted(), 2);
    let second = enforce(&original, first.node.clone(), &specs, &headers);
    assert!(second.is_clean());
    assert_eq!(second.node, first.node);
}

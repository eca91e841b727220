use super::*;
use serde_json::json;

#[test]
fn precedence_plugin_deployment_environment() {
    let layers = ConfigLayers::from_values(
        Some(json!({
            "permissions": {
                "groups": {
                    "editors": {"create": false, "read": true, "update": true},
                    "guests": {"read": true}
                }
            },
            "locked_props": {"template": {"dependencies": ["slug"]}},
            "locked_header": ["title", "permissions"]
        })),
        Some(json!({
            "permissions": {
                "groups": {"editors": {"create": true}},
                "users": {"bob": {"delete": true}}
            }
        })),
        Some(json!({
            "permissions": {"groups": {"editors": {"update": false}}},
            "locked_header": ["author"]
        })),
    )
    .unwrap();

    let eff = layers.effective();
    let editors = eff.permissions.groups.get("editors").unwrap();
    assert_eq!(editors.create, Some(true));
    assert_eq!(editors.read, Some(true));
    assert_eq!(editors.update, Some(false));
    assert_eq!(editors.delete, None);
    assert_eq!(eff.permissions.groups.get("guests").unwrap().read, Some(true));
    assert_eq!(eff.permissions.users.get("bob").unwrap().delete, Some(true));

    assert_eq!(eff.locked_props.len(), 1);
    assert_eq!(eff.locked_props[0].name, "template");
    assert_eq!(eff.locked_props[0].dependencies, vec!["slug".to_string()]);
    let header: Vec<&str> = eff.locked_header.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(header, vec!["author"]);
    assert_eq!(eff.pages_root, "pages");
    assert!(eff.enabled);
}

#[test]
fn missing_layers_are_empty() {
    let layers = ConfigLayers::new(None, None, None);
    assert!(layers.merged_permissions().is_empty());
    let eff = layers.effective();
    assert!(eff.locked_props.is_empty());
    assert!(eff.locked_header.is_empty());
}

#[test]
fn only_environment_layer() {
    let layers = ConfigLayers::from_values(None, None, Some(json!({
        "permissions": {"users": {"alice": {"read": true}}},
        "pages_root": "user/pages/"
    }))).unwrap();
    let eff = layers.effective();
    assert_eq!(eff.permissions.users.get("alice").unwrap().read, Some(true));
    assert_eq!(eff.pages_root, "user/pages");
}

#[test]
fn non_boolean_capability_is_rejected_at_load() {
    let err = ConfigLayers::from_values(Some(json!({"permissions": {"groups": {"g": {"read": "yes"}}}})), None, None);
    assert!(err.is_err());
}

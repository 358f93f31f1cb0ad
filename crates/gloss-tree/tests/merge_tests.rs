//! Integration tests for layer merging.
//!
//! The merge laws are checked as properties over generated preset catalogs
//! and style values.

use gloss_tree::{FONT_FAMILY_SENTINEL, get_path, merge, set_path};
use quickcheck_macros::quickcheck;
use serde_json::{Value, json};

/// Helper: a palette catalog built from generated slugs.
fn palette(slugs: &[String]) -> Value {
    Value::Array(
        slugs
            .iter()
            .map(|slug| json!({ "slug": slug, "color": format!("#{}", slug.len()) }))
            .collect(),
    )
}

/// Helper: a tree with `value` stored at `path`.
fn tree_with(path: &[&str], value: Value) -> Value {
    let mut tree = json!({});
    set_path(&mut tree, path, value);
    tree
}

const THEME_PALETTE: [&str; 4] = ["settings", "color", "palette", "theme"];
const ROOT_FONT_FAMILY: [&str; 3] = ["styles", "typography", "fontFamily"];

#[quickcheck]
fn prop_user_array_replaces_base_array(base_slugs: Vec<String>, user_slugs: Vec<String>) -> bool {
    let base = tree_with(&THEME_PALETTE, palette(&base_slugs));
    let user = tree_with(&THEME_PALETTE, palette(&user_slugs));
    let merged = merge(&base, &user).unwrap();
    get_path(&merged, &THEME_PALETTE) == Some(&palette(&user_slugs))
}

#[quickcheck]
fn prop_sentinel_always_merges_to_null(base_family: Option<String>) -> bool {
    let base = base_family.map_or_else(|| json!({}), |f| tree_with(&ROOT_FONT_FAMILY, json!(f)));
    let user = tree_with(&ROOT_FONT_FAMILY, json!(FONT_FAMILY_SENTINEL));
    let merged = merge(&base, &user).unwrap();
    merged.pointer("/styles/typography/fontFamily") == Some(&Value::Null)
}

#[quickcheck]
fn prop_empty_user_layer_is_identity(text: String, background: String) -> bool {
    let base = json!({ "styles": { "color": { "text": text, "background": background } } });
    merge(&base, &json!({})).unwrap() == base
}

#[quickcheck]
fn prop_merge_is_idempotent(base_slugs: Vec<String>, user_slugs: Vec<String>, text: String) -> bool {
    let mut base = tree_with(&THEME_PALETTE, palette(&base_slugs));
    set_path(&mut base, &["styles", "color", "text"], json!(text));
    let user = tree_with(&THEME_PALETTE, palette(&user_slugs));

    let once = merge(&base, &user).unwrap();
    let twice = merge(&once, &user).unwrap();
    once == twice
}

#[test]
fn test_full_layer_merge() {
    let base = json!({
        "version": 2,
        "settings": {
            "color": {
                "palette": {
                    "default": [{ "slug": "black", "color": "#000000" }],
                    "theme": [{ "slug": "primary", "color": "#0055ff" }]
                }
            },
            "typography": { "fluid": true }
        },
        "styles": {
            "typography": { "fontFamily": "var:preset|font-family|body" },
            "blocks": { "core/group": { "color": { "text": "red" } } }
        }
    });
    let user = json!({
        "settings": {
            "color": { "palette": { "custom": [{ "slug": "mine", "color": "#abcdef" }] } }
        },
        "styles": {
            "typography": { "fontFamily": "default" },
            "blocks": { "core/group": { "color": { "background": "blue" } } }
        }
    });

    let merged = merge(&base, &user).unwrap();
    assert_eq!(
        merged.pointer("/settings/color/palette"),
        Some(&json!({
            "default": [{ "slug": "black", "color": "#000000" }],
            "theme": [{ "slug": "primary", "color": "#0055ff" }],
            "custom": [{ "slug": "mine", "color": "#abcdef" }]
        }))
    );
    assert_eq!(
        merged.pointer("/styles/typography/fontFamily"),
        Some(&Value::Null)
    );
    assert_eq!(
        merged.pointer("/styles/blocks/core~1group/color"),
        Some(&json!({ "text": "red", "background": "blue" }))
    );
    assert_eq!(merged.pointer("/version"), Some(&json!(2)));
}

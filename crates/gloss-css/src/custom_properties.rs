//! Custom property emitter.
//!
//! [theme.json § Custom](https://developer.wordpress.org/block-editor/reference-guides/theme-json-reference/theme-json-living/#custom)
//!
//! "The custom section is a free-form area where the theme can declare
//! its own custom properties. Keys are converted to kebab case and nested
//! keys are joined with `--`."

use gloss_tree::{ORIGINS, scalar_to_css};
use serde_json::Value;

use crate::nodes::SettingsNode;
use crate::presets::PRESET_METADATA;
use crate::reference::custom_property_name;
use crate::text::kebab_case;

/// Custom property rule for one settings node, or an empty string when the
/// node declares nothing.
///
/// Preset declarations come first, category by category and origin by
/// origin; the flattened `custom` values follow.
#[must_use]
pub fn emit_custom_properties(node: &SettingsNode, merged_settings: &Value, namespace: &str) -> String {
    let mut declarations = preset_declarations(&node.presets, merged_settings, namespace);
    if let Some(custom) = &node.custom {
        flatten_custom(custom, &mut vec!["custom".to_string()], namespace, &mut declarations);
    }
    if declarations.is_empty() {
        return String::new();
    }

    let mut rule = node.selector.clone();
    rule.push('{');
    for declaration in &declarations {
        rule.push_str(declaration);
        rule.push(';');
    }
    rule.push('}');
    rule
}

/// `--{ns}--preset--{infix}--{slug}: value` for every preset item in
/// `presets`.
#[must_use]
pub fn preset_declarations(presets: &Value, merged_settings: &Value, namespace: &str) -> Vec<String> {
    let mut declarations = Vec::new();
    for metadata in &PRESET_METADATA {
        for origin in ORIGINS {
            let Some(items) = metadata.catalog(presets, origin) else {
                continue;
            };
            for item in items {
                let Some(slug) = item.get("slug").and_then(Value::as_str) else {
                    continue;
                };
                let Some(value) = metadata.value_of(item, merged_settings, namespace) else {
                    continue;
                };
                let name = custom_property_name(namespace, &["preset", metadata.css_var_infix, slug]);
                declarations.push(format!("{name}: {value}"));
            }
        }
    }
    declarations
}

fn flatten_custom(value: &Value, path: &mut Vec<String>, namespace: &str, declarations: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(kebab_case(key));
                flatten_custom(child, path, namespace, declarations);
                let _ = path.pop();
            }
        }
        other => {
            if let Some(css) = scalar_to_css(other) {
                declarations.push(format!("{}: {css}", custom_property_name(namespace, path.as_slice())));
            }
        }
    }
}

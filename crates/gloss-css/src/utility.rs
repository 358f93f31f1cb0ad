//! Utility class emitter.
//!
//! [theme.json § Presets](https://developer.wordpress.org/themes/global-settings-and-styles/settings/#presets)
//!
//! "Classes are generated for some preset categories so content can opt
//! into a preset with a class name, like `.has-primary-color`."
//!
//! Utility class declarations carry `!important`: a class applied to
//! content overrides whatever the scope inherits.

use serde_json::Value;

use crate::presets::PRESET_METADATA;
use crate::reference::custom_property_name;
use crate::selectors::append_to_selector;
use crate::text::kebab_case;

/// Utility class rules for the presets of one settings node.
///
/// Each class is appended to every part of `selector`; an empty selector
/// yields bare classes.
#[must_use]
pub fn emit_utility_classes(selector: &str, presets: &Value, namespace: &str) -> String {
    let mut css = String::new();
    for metadata in PRESET_METADATA.iter().filter(|m| !m.classes.is_empty()) {
        for &origin in metadata.class_origins {
            let Some(items) = metadata.catalog(presets, origin) else {
                continue;
            };
            for slug in items.iter().filter_map(|item| item.get("slug").and_then(Value::as_str)) {
                let slug = kebab_case(slug);
                let variable = custom_property_name(namespace, &["preset", metadata.css_var_infix, slug.as_str()]);
                for class in metadata.classes {
                    let class_selector =
                        append_to_selector(selector, &format!(".has-{slug}-{}", class.class_suffix));
                    css.push_str(&format!(
                        "{class_selector}{{{}: var({variable}) !important;}}",
                        class.property_name
                    ));
                }
            }
        }
    }
    css
}

//! Preset metadata registry.
//!
//! [theme.json § Settings](https://developer.wordpress.org/block-editor/reference-guides/theme-json-reference/theme-json-living/#settings)
//!
//! "For each preset value, a CSS Custom Property is generated following
//! the `--wp--preset--{preset-category}--{preset-slug}` naming schema."
//!
//! Every preset category the compiler knows is described once here. The
//! custom property, utility class and filter emitters all walk this table,
//! so adding a category is a one-entry change.

use gloss_tree::{ORIGINS, Origin, get_path, scalar_to_css};
use serde_json::Value;

use crate::text::kebab_case;
use crate::typography::{FluidTypography, font_size_value};

/// Compute a preset's CSS value from the preset item, the merged settings
/// and the custom property namespace.
pub type PresetValueFn = fn(preset: &Value, settings: &Value, namespace: &str) -> Option<String>;

/// A utility class a preset category generates per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilityClassSpec {
    /// Suffix of the class name: `.has-{slug}-{class_suffix}`.
    pub class_suffix: &'static str,
    /// CSS property the class sets.
    pub property_name: &'static str,
}

/// Static description of one preset category.
#[derive(Debug, Clone, Copy)]
pub struct PresetMetadata {
    /// Path of the per-origin catalog inside a settings node.
    pub path: &'static [&'static str],
    /// Field of a preset item holding its CSS value.
    pub value_key: &'static str,
    /// Computes the value instead of reading `value_key`.
    pub value_fn: Option<PresetValueFn>,
    /// Category segment of custom property names.
    pub css_var_infix: &'static str,
    /// Utility classes generated for each item.
    pub classes: &'static [UtilityClassSpec],
    /// Origins whose items get utility classes.
    pub class_origins: &'static [Origin],
}

impl PresetMetadata {
    /// CSS value of one preset item.
    #[must_use]
    pub fn value_of(&self, preset: &Value, settings: &Value, namespace: &str) -> Option<String> {
        match self.value_fn {
            Some(value_fn) => value_fn(preset, settings, namespace),
            None => get_path(preset, &[self.value_key]).and_then(scalar_to_css),
        }
    }

    /// The per-origin catalog at this category's path, if it is an array.
    #[must_use]
    pub fn catalog<'a>(&self, presets: &'a Value, origin: Origin) -> Option<&'a Vec<Value>> {
        let mut path: Vec<&str> = self.path.to_vec();
        path.push(origin.key());
        get_path(presets, &path).and_then(Value::as_array)
    }
}

/// Origins utility classes are generated for.
pub const CLASS_ORIGINS: &[Origin] = &ORIGINS;

/// Origins filter definitions are collected from. Custom duotone is
/// rendered inline where it is used.
pub const FILTER_ORIGINS: &[Origin] = &[Origin::Default, Origin::Theme];

/// Every preset category, in emission order.
pub static PRESET_METADATA: [PresetMetadata; 7] = [
    PresetMetadata {
        path: &["color", "palette"],
        value_key: "color",
        value_fn: None,
        css_var_infix: "color",
        classes: &[
            UtilityClassSpec {
                class_suffix: "color",
                property_name: "color",
            },
            UtilityClassSpec {
                class_suffix: "background-color",
                property_name: "background-color",
            },
            UtilityClassSpec {
                class_suffix: "border-color",
                property_name: "border-color",
            },
        ],
        class_origins: CLASS_ORIGINS,
    },
    PresetMetadata {
        path: &["color", "gradients"],
        value_key: "gradient",
        value_fn: None,
        css_var_infix: "gradient",
        classes: &[UtilityClassSpec {
            class_suffix: "gradient-background",
            property_name: "background",
        }],
        class_origins: CLASS_ORIGINS,
    },
    PresetMetadata {
        path: &["color", "duotone"],
        value_key: "colors",
        value_fn: Some(duotone_value),
        css_var_infix: "duotone",
        classes: &[],
        class_origins: &[],
    },
    PresetMetadata {
        path: &["shadow", "presets"],
        value_key: "shadow",
        value_fn: None,
        css_var_infix: "shadow",
        classes: &[],
        class_origins: &[],
    },
    PresetMetadata {
        path: &["typography", "fontSizes"],
        value_key: "size",
        value_fn: Some(font_size_preset_value),
        css_var_infix: "font-size",
        classes: &[UtilityClassSpec {
            class_suffix: "font-size",
            property_name: "font-size",
        }],
        class_origins: CLASS_ORIGINS,
    },
    PresetMetadata {
        path: &["typography", "fontFamilies"],
        value_key: "fontFamily",
        value_fn: None,
        css_var_infix: "font-family",
        classes: &[UtilityClassSpec {
            class_suffix: "font-family",
            property_name: "font-family",
        }],
        class_origins: CLASS_ORIGINS,
    },
    PresetMetadata {
        path: &["spacing", "spacingSizes"],
        value_key: "size",
        value_fn: None,
        css_var_infix: "spacing",
        classes: &[],
        class_origins: &[],
    },
];

/// Style paths whose values may snap to a preset, and the category infix
/// they snap to.
pub const STYLE_PATH_TO_CSS_VAR_INFIX: &[(&str, &str)] = &[
    ("border.color", "color"),
    ("color.background", "color"),
    ("color.text", "color"),
    ("color.gradient", "gradient"),
    ("typography.fontSize", "font-size"),
    ("typography.fontFamily", "font-family"),
    ("shadow", "shadow"),
    ("filter.duotone", "duotone"),
    ("elements.link.color.text", "color"),
    ("elements.link.:hover.color.text", "color"),
    ("elements.button.color.text", "color"),
    ("elements.button.color.background", "color"),
    ("elements.caption.color.text", "color"),
    ("elements.heading.color", "color"),
    ("elements.heading.color.background", "color"),
    ("elements.heading.typography.fontFamily", "font-family"),
    ("elements.heading.gradient", "gradient"),
    ("elements.heading.color.gradient", "gradient"),
    ("elements.h1.color", "color"),
    ("elements.h1.color.background", "color"),
    ("elements.h2.color", "color"),
    ("elements.h2.color.background", "color"),
    ("elements.h3.color", "color"),
    ("elements.h3.color.background", "color"),
    ("elements.h4.color", "color"),
    ("elements.h4.color.background", "color"),
    ("elements.h5.color", "color"),
    ("elements.h5.color.background", "color"),
    ("elements.h6.color", "color"),
    ("elements.h6.color.background", "color"),
];

/// Metadata of the category with the given infix.
#[must_use]
pub fn metadata_for_infix(infix: &str) -> Option<&'static PresetMetadata> {
    PRESET_METADATA.iter().find(|m| m.css_var_infix == infix)
}

/// Infix of the category a style path snaps to.
#[must_use]
pub fn infix_for_style_path(style_path: &str) -> Option<&'static str> {
    STYLE_PATH_TO_CSS_VAR_INFIX
        .iter()
        .find(|(path, _)| *path == style_path)
        .map(|(_, infix)| *infix)
}

/// Find a preset item whose `property` equals `value`.
///
/// Block presets of `scope` are searched before root presets; within each,
/// origins are searched from highest to lowest priority. A match is only
/// returned if no higher-priority item with the same slug overrides it
/// with a different value.
#[must_use]
pub fn find_in_presets_by<'a>(
    settings: &'a Value,
    scope: Option<&str>,
    preset_path: &[&str],
    property: &str,
    value: &Value,
) -> Option<&'a Value> {
    let mut sources: Vec<&Value> = Vec::with_capacity(2);
    if let Some(block) = scope.and_then(|s| get_path(settings, &["blocks", s])) {
        sources.push(block);
    }
    sources.push(settings);

    for source in sources {
        let Some(presets) = get_path(source, preset_path) else {
            continue;
        };
        for origin in Origin::by_priority() {
            let Some(items) = get_path(presets, &[origin.key()]).and_then(Value::as_array) else {
                continue;
            };
            let Some(found) = items.iter().find(|item| item.get(property) == Some(value)) else {
                continue;
            };
            if property == "slug" {
                return Some(found);
            }
            let slug = found.get("slug").unwrap_or(&Value::Null);
            let highest = find_in_presets_by(settings, scope, preset_path, "slug", slug);
            if highest.and_then(|h| h.get(property)) == found.get(property) {
                return Some(found);
            }
            return None;
        }
    }
    None
}

fn duotone_value(preset: &Value, _settings: &Value, namespace: &str) -> Option<String> {
    let slug = preset.get("slug").and_then(Value::as_str)?;
    Some(format!("url( '#{namespace}-duotone-{}' )", kebab_case(slug)))
}

fn font_size_preset_value(preset: &Value, settings: &Value, _namespace: &str) -> Option<String> {
    let size = preset.get("size")?;
    font_size_value(size, preset.get("fluid"), &FluidTypography::from_settings(settings))
}

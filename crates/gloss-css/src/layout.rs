//! Layout and block gap rules.
//!
//! [theme.json § Layout](https://developer.wordpress.org/block-editor/reference-guides/theme-json-reference/theme-json-living/#layout)
//!
//! Layout kinds are declared in `settings.layout.definitions`. Each kind
//! names a class, an optional display mode and two lists of rule
//! templates: base styles, emitted once under the root, and spacing
//! styles, emitted per node with the node's gap value filled in.
//!
//! Nodes relying on a fallback gap get their spacing rules wrapped in
//! `:where()`, so they carry no specificity and never outrank a rule the
//! theme declares.

use gloss_tree::{get_path, scalar_to_css};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::elements::ROOT_BLOCK_SELECTOR;
use crate::nodes::StyleNode;
use crate::reference::compile_reference;
use crate::selectors::append_to_selector;

/// Gap used by the root when it declares none.
pub const ROOT_FALLBACK_GAP: &str = "0.5em";

/// Layout kind that is skipped entirely without block gap support.
const DEFAULT_LAYOUT_KIND: &str = "default";

/// Layout kind whose spacing rules are still emitted with a fallback gap.
const FLEX_LAYOUT_KIND: &str = "flex";

const DISPLAY_MODES: [&str; 3] = ["block", "flex", "grid"];

/// One rule template of a layout kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    /// Appended to the layout class selector.
    pub selector: String,
    /// Declarations in order. A `null` value in a spacing template stands
    /// for the gap value.
    pub rules: Map<String, Value>,
}

/// A named layout kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutDefinition {
    /// Kind name, such as `default`, `constrained` or `flex`.
    pub name: String,
    /// Short identifier.
    pub slug: String,
    /// Class carried by containers with this layout.
    pub class_name: String,
    /// `display` value for containers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<String>,
    /// Rules emitted once for the root.
    pub base_styles: Vec<LayoutStyle>,
    /// Rules emitted per node with a gap value.
    pub spacing_styles: Vec<LayoutStyle>,
}

/// Layout kinds of `tree`, in declaration order.
///
/// Malformed entries are skipped. A kind without a `name` takes its key.
#[must_use]
pub fn layout_definitions(tree: &Value) -> Vec<LayoutDefinition> {
    let Some(definitions) = get_path(tree, &["settings", "layout", "definitions"]).and_then(Value::as_object) else {
        return Vec::new();
    };
    definitions
        .iter()
        .filter_map(|(key, value)| match serde_json::from_value::<LayoutDefinition>(value.clone()) {
            Ok(mut definition) => {
                if definition.name.is_empty() {
                    definition.name.clone_from(key);
                }
                Some(definition)
            }
            Err(err) => {
                tracing::debug!(layout = key.as_str(), %err, "skipping malformed layout definition");
                None
            }
        })
        .collect()
}

/// Block gap capabilities for a compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapSupport {
    /// The theme supports block gap.
    pub block_gap: bool,
    /// Scopes may fall back to their registry gap value.
    pub fallback_gap: bool,
}

impl GapSupport {
    /// Fallback gaps apply exactly when block gap support is off.
    #[must_use]
    pub const fn from_block_gap(block_gap: bool) -> Self {
        Self {
            block_gap,
            fallback_gap: !block_gap,
        }
    }
}

/// CSS value of a `spacing.blockGap` style.
///
/// A string is used as is; an object gives `"{top} {left}"`, collapsing to
/// one value when both sides agree. Preset tokens are compiled.
#[must_use]
pub fn gap_css_value(block_gap: &Value, namespace: &str) -> Option<String> {
    match block_gap {
        Value::Object(_) => {
            let side = |key: &str| {
                get_path(block_gap, &[key])
                    .and_then(scalar_to_css)
                    .map(|v| compile_reference(&v, namespace))
            };
            match (side("top"), side("left")) {
                (Some(row), Some(column)) if row == column => Some(row),
                (Some(row), Some(column)) => Some(format!("{row} {column}")),
                (row, column) => row.or(column),
            }
        }
        other => scalar_to_css(other)
            .filter(|v| !v.is_empty())
            .map(|v| compile_reference(&v, namespace)),
    }
}

/// Layout rules for one node.
///
/// Nodes that are neither the root nor layout-capable get nothing. Spacing
/// rules need a gap value; the root also gets the legacy gap variable, the
/// display-mode rules and the base-style rules.
#[must_use]
pub fn emit_layout_rules(
    node: &StyleNode,
    definitions: &[LayoutDefinition],
    gap: GapSupport,
    namespace: &str,
) -> String {
    let is_root = node.is_root();
    if (!is_root && !node.has_layout_support) || definitions.is_empty() {
        return String::new();
    }
    let definitions: Vec<&LayoutDefinition> = definitions
        .iter()
        .filter(|d| gap.block_gap || d.name != DEFAULT_LAYOUT_KIND)
        .collect();

    let mut gap_value = if gap.block_gap {
        get_path(&node.styles, &["spacing", "blockGap"]).and_then(|v| gap_css_value(v, namespace))
    } else {
        None
    };
    if is_root {
        gap_value = gap_value.or_else(|| Some(ROOT_FALLBACK_GAP.to_string()));
    } else if !gap.block_gap && gap.fallback_gap {
        gap_value = node.fallback_gap_value.clone().or(gap_value);
    }

    let mut css = String::new();
    if let Some(gap_value) = &gap_value {
        for definition in &definitions {
            if !gap.block_gap && definition.name != FLEX_LAYOUT_KIND {
                continue;
            }
            for style in &definition.spacing_styles {
                let declarations = spacing_declarations(&style.rules, gap_value);
                if declarations.is_empty() {
                    continue;
                }
                let target = format!(".{}{}", definition.class_name, style.selector);
                let selector = match (gap.block_gap, is_root) {
                    (true, true) => format!("{ROOT_BLOCK_SELECTOR} {target}"),
                    (true, false) => append_to_selector(&node.selector, &target),
                    (false, true) => format!(":where({target})"),
                    (false, false) => format!(":where({})", append_to_selector(&node.selector, &target)),
                };
                css.push_str(&layout_rule(&selector, &declarations));
            }
        }
        if is_root && gap.block_gap {
            css.push_str(&format!(
                "{ROOT_BLOCK_SELECTOR} {{ --{namespace}--style--block-gap: {gap_value}; }}"
            ));
        }
    }

    if is_root {
        for definition in &definitions {
            if let Some(mode) = definition
                .display_mode
                .as_deref()
                .filter(|mode| DISPLAY_MODES.contains(mode))
            {
                css.push_str(&format!(
                    "{ROOT_BLOCK_SELECTOR} .{} {{ display:{mode}; }}",
                    definition.class_name
                ));
            }
            for style in &definition.base_styles {
                let declarations: Vec<String> = style
                    .rules
                    .iter()
                    .filter_map(|(property, value)| scalar_to_css(value).map(|v| format!("{property}: {v}")))
                    .collect();
                if declarations.is_empty() {
                    continue;
                }
                let selector = format!("{ROOT_BLOCK_SELECTOR} .{}{}", definition.class_name, style.selector);
                css.push_str(&layout_rule(&selector, &declarations));
            }
        }
    }
    css
}

fn spacing_declarations(rules: &Map<String, Value>, gap_value: &str) -> Vec<String> {
    rules
        .iter()
        .map(|(property, value)| {
            let value = scalar_to_css(value)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| gap_value.to_string());
            format!("{property}: {value}")
        })
        .collect()
}

fn layout_rule(selector: &str, declarations: &[String]) -> String {
    format!("{selector} {{ {}; }}", declarations.join("; "))
}

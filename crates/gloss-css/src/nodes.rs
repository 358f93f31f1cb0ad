//! Style node enumeration.
//!
//! The merged tree is sparse and irregular: the root, its elements, every
//! scope and every scope's elements each carry their own style subtree.
//! Enumeration flattens it into a list of [`StyleNode`]s, one per selector
//! that has something to say, in a fixed order:
//!
//! 1. the root, which is always present
//! 2. root elements, in [`Element`] order
//! 3. each scope in `styles.blocks` input order, followed by its elements
//!    in input order
//!
//! Later rules win on equal specificity, so this order is part of the
//! output contract.

use std::str::FromStr;

use gloss_common::{Diagnostic, Diagnostics};
use gloss_tree::get_path;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::elements::{Element, ROOT_BLOCK_SELECTOR};
use crate::presets::PRESET_METADATA;
use crate::registry::{BlockSelectors, FeatureSelector, SelectorRegistry};
use crate::selectors::scope_selector;

/// Style keys a root or scope node picks from its subtree.
pub const STYLE_NODE_KEYS: &[&str] = &[
    "border",
    "color",
    "dimensions",
    "spacing",
    "typography",
    "filter",
    "outline",
    "shadow",
    "background",
    "css",
];

/// Where in the tree a node came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root style subtree.
    Root,
    /// An element directly under the root.
    RootElement(Element),
    /// A scope's own subtree.
    Block,
    /// An element inside a scope.
    BlockElement(Element),
}

/// A selector paired with the style subtree that applies to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleNode {
    /// Where the node came from.
    pub kind: NodeKind,
    /// Scope identifier for block and block element nodes.
    pub scope: Option<String>,
    /// Selector the styles apply to.
    pub selector: String,
    /// The picked style subtree.
    pub styles: Value,
    /// Selector duotone filters move to.
    pub duotone_selector: Option<String>,
    /// Whether the node gets layout rules.
    pub has_layout_support: bool,
    /// Gap used when block gap support is off globally.
    pub fallback_gap_value: Option<String>,
    /// Selectors for individual style features.
    pub feature_selectors: IndexMap<String, FeatureSelector>,
    /// Selectors for block style variations.
    pub style_variation_selectors: IndexMap<String, String>,
}

impl StyleNode {
    fn plain(kind: NodeKind, scope: Option<String>, selector: String, styles: Value) -> Self {
        Self {
            kind,
            scope,
            selector,
            styles,
            duotone_selector: None,
            has_layout_support: false,
            fallback_gap_value: None,
            feature_selectors: IndexMap::new(),
            style_variation_selectors: IndexMap::new(),
        }
    }

    /// Whether this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }
}

/// Flatten the style branch of `tree` into nodes.
///
/// Scopes absent from `registry` are skipped and reported as
/// [`Diagnostic::RegistryMismatch`]. With `skip_filters`, `filter` keys are
/// left out of every node.
#[must_use]
pub fn enumerate(
    tree: &Value,
    registry: &SelectorRegistry,
    skip_filters: bool,
    diagnostics: &mut Diagnostics,
) -> Vec<StyleNode> {
    let empty = Value::Object(Map::new());
    let styles = get_path(tree, &["styles"]).unwrap_or(&empty);

    // The root node is always present: its layout rules do not depend on
    // whether it has declarations of its own.
    let root = pick_style_keys(styles, STYLE_NODE_KEYS, skip_filters);
    let mut nodes = vec![StyleNode {
        has_layout_support: true,
        ..StyleNode::plain(NodeKind::Root, None, ROOT_BLOCK_SELECTOR.to_string(), root)
    }];

    for element in Element::iter() {
        if let Some(subtree) = get_path(styles, &["elements", element.as_ref()]) {
            let subtree = without_filter(subtree, skip_filters);
            if !is_empty_subtree(&subtree) {
                nodes.push(StyleNode::plain(
                    NodeKind::RootElement(element),
                    None,
                    element.selector().to_string(),
                    subtree,
                ));
            }
        }
    }

    let Some(blocks) = get_path(styles, &["blocks"]).and_then(Value::as_object) else {
        return nodes;
    };
    for (scope, block_styles) in blocks {
        let Some(selectors) = registry.get(scope) else {
            diagnostics.report(Diagnostic::RegistryMismatch {
                scope: scope.clone(),
            });
            continue;
        };
        block_nodes(scope, block_styles, selectors, skip_filters, &mut nodes);
    }
    nodes
}

fn block_nodes(
    scope: &str,
    block_styles: &Value,
    selectors: &BlockSelectors,
    skip_filters: bool,
    nodes: &mut Vec<StyleNode>,
) {
    let mut keys = STYLE_NODE_KEYS.to_vec();
    keys.push("variations");
    let picked = pick_style_keys(block_styles, &keys, skip_filters);
    if !is_empty_subtree(&picked) {
        nodes.push(StyleNode {
            duotone_selector: selectors.duotone_selector.clone(),
            has_layout_support: selectors.has_layout_support,
            fallback_gap_value: selectors.fallback_gap_value.clone(),
            feature_selectors: selectors.feature_selectors.clone(),
            style_variation_selectors: selectors.style_variation_selectors.clone(),
            ..StyleNode::plain(
                NodeKind::Block,
                Some(scope.to_string()),
                selectors.selector.clone(),
                picked,
            )
        });
    }

    let Some(elements) = get_path(block_styles, &["elements"]).and_then(Value::as_object) else {
        return;
    };
    for (name, subtree) in elements {
        let Ok(element) = Element::from_str(name) else {
            tracing::debug!(scope, element = name.as_str(), "ignoring unknown element");
            continue;
        };
        let subtree = without_filter(subtree, skip_filters);
        if is_empty_subtree(&subtree) {
            continue;
        }
        let selector = selectors
            .element_selectors
            .get(name)
            .cloned()
            .unwrap_or_else(|| scope_selector(&selectors.selector, element.selector()));
        nodes.push(StyleNode::plain(
            NodeKind::BlockElement(element),
            Some(scope.to_string()),
            selector,
            subtree,
        ));
    }
}

/// Copy the listed keys of `styles`, in input order.
fn pick_style_keys(styles: &Value, keys: &[&str], skip_filters: bool) -> Value {
    let mut picked = Map::new();
    if let Some(map) = styles.as_object() {
        for (key, value) in map {
            if value.is_null() || !keys.contains(&key.as_str()) || (skip_filters && key == "filter") {
                continue;
            }
            let _ = picked.insert(key.clone(), value.clone());
        }
    }
    Value::Object(picked)
}

fn without_filter(subtree: &Value, skip_filters: bool) -> Value {
    let mut subtree = subtree.clone();
    if skip_filters {
        if let Value::Object(map) = &mut subtree {
            let _ = map.remove("filter");
        }
    }
    subtree
}

/// `null`, a non-object, or an object with no keys.
#[must_use]
pub fn is_empty_subtree(value: &Value) -> bool {
    value.as_object().is_none_or(Map::is_empty)
}

/// A settings subtree that produces custom properties and utility classes.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsNode {
    /// Scope identifier, `None` for the root.
    pub scope: Option<String>,
    /// Selector custom properties are declared on.
    pub selector: String,
    /// Preset catalogs present in this node, at their usual paths.
    pub presets: Value,
    /// Free-form custom values.
    pub custom: Option<Value>,
}

impl SettingsNode {
    /// Whether this is the root settings node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.scope.is_none()
    }
}

/// Settings nodes with presets or custom values: the root first, then
/// each scope in `settings.blocks` input order.
#[must_use]
pub fn enumerate_settings(tree: &Value, registry: &SelectorRegistry, diagnostics: &mut Diagnostics) -> Vec<SettingsNode> {
    let mut nodes = Vec::new();
    let Some(settings) = get_path(tree, &["settings"]) else {
        return nodes;
    };

    if let Some(node) = settings_node(settings, None, ROOT_BLOCK_SELECTOR) {
        nodes.push(node);
    }

    let Some(blocks) = get_path(settings, &["blocks"]).and_then(Value::as_object) else {
        return nodes;
    };
    for (scope, block_settings) in blocks {
        let Some(selectors) = registry.get(scope) else {
            diagnostics.report(Diagnostic::RegistryMismatch {
                scope: scope.clone(),
            });
            continue;
        };
        if let Some(node) = settings_node(block_settings, Some(scope), &selectors.selector) {
            nodes.push(node);
        }
    }
    nodes
}

fn settings_node(settings: &Value, scope: Option<&str>, selector: &str) -> Option<SettingsNode> {
    let presets = pick_presets(settings);
    let custom = get_path(settings, &["custom"]).cloned();
    if is_empty_subtree(&presets) && custom.is_none() {
        return None;
    }
    Some(SettingsNode {
        scope: scope.map(str::to_string),
        selector: selector.to_string(),
        presets,
        custom,
    })
}

/// Copy every preset catalog of `settings` to the same path in a new tree.
fn pick_presets(settings: &Value) -> Value {
    let mut presets = Value::Object(Map::new());
    for metadata in &PRESET_METADATA {
        if let Some(catalog) = get_path(settings, metadata.path) {
            gloss_tree::set_path(&mut presets, metadata.path, catalog.clone());
        }
    }
    presets
}

//! Stylesheet assembly.
//!
//! [`compile`] runs every generator over a merged tree and concatenates
//! their output in a fixed order. `styles_css` is laid out as:
//!
//! 1. the reset rule on `body`, with the global size variables
//! 2. root padding-aware alignment rules, when enabled
//! 3. per style node: feature-selector rules, style-variation rules, the
//!    duotone rule, layout rules, the node rule, then pseudo-selector rules
//! 4. the alignment rules
//! 5. the block gap margin rules, when block gap is supported
//! 6. utility classes per settings node
//!
//! Compilation is pure. Memoization lives in [`crate::compiler`].

use gloss_common::{Diagnostic, Diagnostics};
use gloss_tree::{get_path, is_truthy, scalar_to_css, set_path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::custom_properties::emit_custom_properties;
use crate::declarations::{StyleContext, compile_declarations, take_feature_declarations};
use crate::elements::ROOT_BLOCK_SELECTOR;
use crate::filters::{FilterDescriptor, collect_filter_definitions};
use crate::layout::{GapSupport, ROOT_FALLBACK_GAP, emit_layout_rules, gap_css_value, layout_definitions};
use crate::nesting::process_css_nesting;
use crate::nodes::{StyleNode, enumerate, enumerate_settings};
use crate::registry::SelectorRegistry;
use crate::selectors::{append_to_selector, block_style_variation_selector};
use crate::utility::emit_utility_classes;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "wp";

/// Scope whose background doubles as its line color.
const SEPARATOR_SCOPE: &str = "core/separator";

const ALIGNMENT_RULES: &str = ".wp-site-blocks > .alignleft { float: left; margin-right: 2em; }\
.wp-site-blocks > .alignright { float: right; margin-left: 2em; }\
.wp-site-blocks > .aligncenter { justify-content: center; margin-left: auto; margin-right: auto; }";

/// Knobs for one compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Namespace of every generated custom property.
    pub namespace: String,
    /// Block gap support. `None` derives it from the tree: support is on
    /// unless `settings.spacing.blockGap` is explicitly `null`.
    pub block_gap: Option<bool>,
    /// Leave out layout rules entirely.
    pub disable_layout_styles: bool,
    /// Emit block style variation rules.
    pub variation_styles: bool,
    /// Drop `filter` styles from every node.
    pub skip_filters: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            block_gap: None,
            disable_layout_styles: false,
            variation_styles: true,
            skip_filters: false,
        }
    }
}

/// Everything one compile produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledBundle {
    /// Preset and custom value declarations.
    pub custom_properties_css: String,
    /// Style rules, layout rules and utility classes.
    pub styles_css: String,
    /// Author CSS: the global `styles.css` verbatim, then each scope's
    /// `css` with nesting expanded.
    pub custom_css: String,
    /// Duotone filter effects the host should render.
    pub filter_definitions: Vec<FilterDescriptor>,
    /// Problems found along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledBundle {
    /// The three stylesheets concatenated in load order.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        [
            self.custom_properties_css.as_str(),
            self.styles_css.as_str(),
            self.custom_css.as_str(),
        ]
        .concat()
    }
}

/// Compile a merged tree.
#[must_use]
pub fn compile(merged: &Value, registry: &SelectorRegistry, options: &CompileOptions) -> CompiledBundle {
    let tree = with_separator_colors(merged);
    let namespace = options.namespace.as_str();
    let mut diagnostics = Diagnostics::new();

    let empty = Value::Object(Map::new());
    let settings = get_path(&tree, &["settings"]).unwrap_or(&empty);
    let block_gap = options
        .block_gap
        .unwrap_or_else(|| tree.pointer("/settings/spacing/blockGap") != Some(&Value::Null));
    let gap = GapSupport::from_block_gap(block_gap);
    let ctx = StyleContext::for_tree(&tree, namespace);
    let definitions = layout_definitions(&tree);

    let nodes = enumerate(&tree, registry, options.skip_filters, &mut diagnostics);
    let settings_nodes = enumerate_settings(&tree, registry, &mut diagnostics);

    let mut styles_css = reset_rules(settings, namespace, ctx.use_root_padding_align);
    for node in &nodes {
        let ctx = ctx.with_scope(node.scope.as_deref());
        let mut styles = node.styles.clone();

        if !node.feature_selectors.is_empty() {
            for (selector, declarations) in
                take_feature_declarations(&mut styles, &node.feature_selectors, &ctx, &mut diagnostics)
            {
                styles_css.push_str(&unterminated_rule(&selector, &declarations));
            }
        }

        if options.variation_styles {
            styles_css.push_str(&variation_rules(node, &styles, &ctx, &mut diagnostics));
        }

        if let Some(duotone_selector) = &node.duotone_selector {
            if let Some(filter) = styles.as_object_mut().and_then(|map| map.remove("filter")) {
                let mut filter_styles = Map::new();
                let _ = filter_styles.insert("filter".to_string(), filter);
                let declarations =
                    compile_declarations(&Value::Object(filter_styles), false, &ctx, &mut diagnostics);
                styles_css.push_str(&rule(duotone_selector, &declarations));
            }
        }

        if !options.disable_layout_styles {
            styles_css.push_str(&emit_layout_rules(node, &definitions, gap, namespace));
        }

        let declarations = compile_declarations(&styles, node.is_root(), &ctx, &mut diagnostics);
        styles_css.push_str(&rule(&node.selector, &declarations));

        if let Some(map) = styles.as_object() {
            for (pseudo, pseudo_styles) in map.iter().filter(|(key, _)| key.starts_with(':')) {
                let declarations = compile_declarations(pseudo_styles, false, &ctx, &mut diagnostics);
                styles_css.push_str(&rule(&append_to_selector(&node.selector, pseudo), &declarations));
            }
        }
    }

    styles_css.push_str(ALIGNMENT_RULES);
    if block_gap {
        let gap_value = get_path(&tree, &["styles", "spacing", "blockGap"])
            .and_then(|value| gap_css_value(value, namespace))
            .unwrap_or_else(|| ROOT_FALLBACK_GAP.to_string());
        styles_css.push_str(&format!(
            ":where(.wp-site-blocks) > * {{ margin-block-start: {gap_value}; margin-block-end: 0; }}\
             :where(.wp-site-blocks) > :first-child:first-child {{ margin-block-start: 0; }}\
             :where(.wp-site-blocks) > :last-child:last-child {{ margin-block-end: 0; }}"
        ));
    }

    let mut custom_properties_css = String::new();
    for node in &settings_nodes {
        let class_prefix = if node.is_root() { "" } else { node.selector.as_str() };
        styles_css.push_str(&emit_utility_classes(class_prefix, &node.presets, namespace));
        custom_properties_css.push_str(&emit_custom_properties(node, settings, namespace));
    }

    let bundle = CompiledBundle {
        custom_properties_css,
        styles_css,
        custom_css: custom_css(&tree, registry),
        filter_definitions: collect_filter_definitions(settings, namespace),
        diagnostics: diagnostics.into_vec(),
    };
    tracing::debug!(
        nodes = nodes.len(),
        settings_nodes = settings_nodes.len(),
        diagnostics = bundle.diagnostics.len(),
        "compiled global styles"
    );
    bundle
}

/// `{selector}{d1;d2;}`, or nothing without declarations.
fn rule(selector: &str, declarations: &[String]) -> String {
    if declarations.is_empty() {
        return String::new();
    }
    format!("{selector}{{{};}}", declarations.join(";"))
}

/// `{selector}{d1;d2}`: feature and variation rules carry no final `;`.
fn unterminated_rule(selector: &str, declarations: &[String]) -> String {
    if declarations.is_empty() {
        return String::new();
    }
    format!("{selector}{{{}}}", declarations.join(";"))
}

/// The margin reset, which also carries the global size variables and,
/// with root padding-aware alignments, the root padding rules.
fn reset_rules(settings: &Value, namespace: &str, use_root_padding_align: bool) -> String {
    let mut declarations = vec!["margin: 0".to_string()];
    for (key, name) in [("contentSize", "content-size"), ("wideSize", "wide-size")] {
        if let Some(size) = get_path(settings, &["layout", key]).and_then(scalar_to_css) {
            declarations.push(format!("--{namespace}--style--global--{name}: {size}"));
        }
    }
    if !use_root_padding_align {
        return rule(ROOT_BLOCK_SELECTOR, &declarations);
    }

    let side = |side: &str| format!("var(--{namespace}--style--root--padding-{side})");
    declarations.extend([
        "padding-right: 0".to_string(),
        "padding-left: 0".to_string(),
        format!("padding-top: {}", side("top")),
        format!("padding-bottom: {}", side("bottom")),
    ]);
    let inline_padding = format!("padding-right: {}; padding-left: {};", side("right"), side("left"));
    let mut css = rule(ROOT_BLOCK_SELECTOR, &declarations);
    css.push_str(&format!(
        ".has-global-padding {{ {inline_padding} }}\
         .has-global-padding :where(.has-global-padding) {{ padding-right: 0; padding-left: 0; }}\
         .has-global-padding > .alignfull {{ margin-right: calc({} * -1); margin-left: calc({} * -1); }}\
         .has-global-padding :where(.has-global-padding) > .alignfull {{ margin-right: 0; margin-left: 0; }}\
         .has-global-padding > .alignfull:where(:not(.has-global-padding)) > \
         :where(.wp-block:not(.alignfull),p,h1,h2,h3,h4,h5,h6,ul,ol) {{ {inline_padding} }}\
         .has-global-padding :where(.has-global-padding) > .alignfull:where(:not(.has-global-padding)) > \
         :where(.wp-block:not(.alignfull),p,h1,h2,h3,h4,h5,h6,ul,ol) {{ padding-right: 0; padding-left: 0; }}",
        side("right"),
        side("left"),
    ));
    css
}

/// Rules for each block style variation the node has styles for.
fn variation_rules(
    node: &StyleNode,
    styles: &Value,
    ctx: &StyleContext<'_>,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut css = String::new();
    for (name, variation_selector) in &node.style_variation_selectors {
        let Some(variation) = get_path(styles, &["variations", name.as_str()]) else {
            continue;
        };
        let mut variation = variation.clone();
        for (selector, declarations) in
            take_feature_declarations(&mut variation, &node.feature_selectors, ctx, diagnostics)
        {
            css.push_str(&unterminated_rule(
                &block_style_variation_selector(name, &selector),
                &declarations,
            ));
        }
        let declarations = compile_declarations(&variation, false, ctx, diagnostics);
        css.push_str(&unterminated_rule(variation_selector, &declarations));
    }
    css
}

/// A separator with only a background color draws its line in that color.
fn with_separator_colors(tree: &Value) -> Value {
    let mut tree = tree.clone();
    let Some(separator) = get_path(&tree, &["styles", "blocks", SEPARATOR_SCOPE]) else {
        return tree;
    };
    let background = get_path(separator, &["color", "background"]).filter(|v| is_truthy(v));
    let has_text = get_path(separator, &["color", "text"]).is_some_and(is_truthy);
    let has_border = get_path(separator, &["border", "color"]).is_some_and(is_truthy);
    if let (Some(background), false, false) = (background.cloned(), has_text, has_border) {
        set_path(
            &mut tree,
            &["styles", "blocks", SEPARATOR_SCOPE, "color", "text"],
            background,
        );
    }
    tree
}

/// Global author CSS followed by each registered scope's nested CSS.
fn custom_css(tree: &Value, registry: &SelectorRegistry) -> String {
    let mut css = get_path(tree, &["styles", "css"])
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let Some(blocks) = get_path(tree, &["styles", "blocks"]).and_then(Value::as_object) else {
        return css;
    };
    for (scope, block_styles) in blocks {
        let Some(block_css) = get_path(block_styles, &["css"]).and_then(Value::as_str) else {
            continue;
        };
        if let Some(selectors) = registry.get(scope) {
            css.push_str(&process_css_nesting(block_css, &selectors.selector));
        }
    }
    css
}

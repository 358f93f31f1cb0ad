//! Declaration compiler.
//!
//! Turns one style subtree into `property: value` strings. Two passes run
//! in order:
//!
//! 1. the [`STYLE_PROPERTIES`] entries compiled directly (duotone filter,
//!    root padding variables)
//! 2. the rule extraction of [`crate::engine`] for every other category
//!
//! Values go through [`compile_reference`] in both passes.

use gloss_common::{Diagnostic, Diagnostics};
use gloss_tree::{get_path, is_truthy, scalar_to_css, set_path};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::engine::css_rules;
use crate::properties::STYLE_PROPERTIES;
use crate::reference::{Reference, compile_reference, preset_reference_exists};
use crate::registry::FeatureSelector;
use crate::typography::{FluidTypography, font_size_value};

/// What the declaration compiler needs to know beyond the subtree itself.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    /// The merged tree, for `{ "ref": ... }` values, fluid typography and
    /// reference checks. Without it none of those apply.
    pub tree: Option<&'a Value>,
    /// Custom property namespace.
    pub namespace: &'a str,
    /// Scope whose presets are searched before the root's.
    pub scope: Option<&'a str>,
    /// Whether root padding compiles to padding variables.
    pub use_root_padding_align: bool,
}

impl<'a> StyleContext<'a> {
    /// Context for a subtree compiled on its own.
    #[must_use]
    pub const fn standalone(namespace: &'a str) -> Self {
        Self {
            tree: None,
            namespace,
            scope: None,
            use_root_padding_align: false,
        }
    }

    /// Context backed by a merged tree.
    #[must_use]
    pub fn for_tree(tree: &'a Value, namespace: &'a str) -> Self {
        Self {
            tree: Some(tree),
            namespace,
            scope: None,
            use_root_padding_align: get_path(tree, &["settings", "useRootPaddingAwareAlignments"])
                .is_some_and(is_truthy),
        }
    }

    /// The same context, searching `scope` presets first.
    #[must_use]
    pub const fn with_scope(self, scope: Option<&'a str>) -> Self {
        Self { scope, ..self }
    }

    fn settings(&self) -> Option<&'a Value> {
        self.tree.and_then(|tree| get_path(tree, &["settings"]))
    }

    /// Follow a `{ "ref": "styles.x.y" }` value. References to missing
    /// values, and references to other references, resolve to nothing.
    fn follow_ref<'v>(&self, value: &'v Value) -> Option<&'v Value>
    where
        'a: 'v,
    {
        let Some(path) = value.get("ref") else {
            return Some(value);
        };
        let path = path.as_str()?;
        let segments: Vec<&str> = path.split('.').collect();
        let target = get_path(self.tree?, &segments)?;
        if target.get("ref").is_some() {
            tracing::debug!(reference = path, "nested style reference ignored");
            return None;
        }
        Some(target)
    }

    /// Compile a raw value to CSS text, reporting unknown presets.
    fn compile_value(&self, value: &Value, diagnostics: &mut Diagnostics) -> Option<String> {
        let text = scalar_to_css(self.follow_ref(value)?)?;
        self.check_reference(&text, diagnostics);
        Some(compile_reference(&text, self.namespace))
    }

    fn check_reference(&self, text: &str, diagnostics: &mut Diagnostics) {
        let Some(settings) = self.settings() else {
            return;
        };
        if matches!(Reference::parse(text, self.namespace), Some(Reference::Preset { .. }))
            && !preset_reference_exists(settings, self.scope, text, self.namespace)
        {
            diagnostics.report(Diagnostic::UnresolvedReference {
                token: text.to_string(),
                scope: self.scope.map(str::to_string),
            });
        }
    }

    fn fluid_typography(&self) -> FluidTypography {
        self.settings()
            .and_then(|settings| get_path(settings, &["typography"]))
            .map_or_else(FluidTypography::default, FluidTypography::from_typography_settings)
    }
}

/// Compile `styles` into declarations.
///
/// Root-only entries are skipped unless `is_root`. For the root, a
/// padding or margin given as a single shorthand string is dropped; root
/// spacing goes through the layout padding mechanism instead.
#[must_use]
pub fn compile_declarations(
    styles: &Value,
    is_root: bool,
    ctx: &StyleContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    let mut declarations = Vec::new();

    for property in STYLE_PROPERTIES {
        if (property.root_only && !is_root) || property.is_element_property() || property.use_engine {
            continue;
        }
        let Some(value) = get_path(styles, property.path) else {
            continue;
        };
        if property.needs_padding_alignment && (value.is_string() || !ctx.use_root_padding_align) {
            continue;
        }

        let name = property.property_name(ctx.namespace);
        if !property.sub_properties.is_empty() && value.is_object() {
            for (suffix, key) in property.sub_properties {
                let Some(sub_value) = get_path(value, &[key]).filter(|v| is_truthy(v)) else {
                    continue;
                };
                if let Some(css) = ctx.compile_value(sub_value, diagnostics) {
                    declarations.push(format!("{name}-{suffix}: {css}"));
                }
            }
        } else if is_truthy(value) {
            if let Some(css) = ctx.compile_value(value, diagnostics) {
                declarations.push(format!("{name}: {css}"));
            }
        }
    }

    let styles = with_background_defaults(styles, is_root);
    let fluid = ctx.fluid_typography();
    for rule in css_rules(&styles) {
        let is_padding = rule.property.starts_with("padding");
        if is_root && (rule.property == "padding" || rule.property == "margin") && rule.value.is_string() {
            continue;
        }
        if is_root && ctx.use_root_padding_align && is_padding {
            continue;
        }
        let Some(mut css) = ctx.compile_value(&rule.value, diagnostics) else {
            continue;
        };
        if rule.property == "font-size" {
            if let Some(fluid_css) = font_size_value(&Value::String(css.clone()), None, &fluid) {
                css = fluid_css;
            }
        }
        declarations.push(format!("{}: {css}", rule.property));
    }

    declarations
}

/// Scope backgrounds with an image cover the scope unless told otherwise,
/// and a contained image is centered.
fn with_background_defaults(styles: &Value, is_root: bool) -> Value {
    let mut styles = styles.clone();
    if is_root || get_path(&styles, &["background", "backgroundImage"]).is_none() {
        return styles;
    }
    let size = get_path(&styles, &["background", "backgroundSize"]).cloned();
    match size.as_ref().and_then(Value::as_str) {
        None => set_path(&mut styles, &["background", "backgroundSize"], Value::from("cover")),
        Some("contain") if get_path(&styles, &["background", "backgroundPosition"]).is_none() => {
            set_path(&mut styles, &["background", "backgroundPosition"], Value::from("50% 50%"));
        }
        Some(_) => {}
    }
    styles
}

/// Move features with dedicated selectors out of `styles`.
///
/// Returns `(selector, declarations)` groups in first-seen selector order,
/// walking features in registry order.
/// A shorthand selector takes the whole feature. A split selector takes
/// each listed sub-feature, and its `root` entry takes what is left.
/// Everything moved is removed from `styles`.
#[must_use]
pub fn take_feature_declarations(
    styles: &mut Value,
    selectors: &IndexMap<String, FeatureSelector>,
    ctx: &StyleContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut add = |selector: &str, declarations: Vec<String>| {
        if declarations.is_empty() {
            return;
        }
        match groups.iter_mut().find(|(s, _)| s == selector) {
            Some((_, existing)) => existing.extend(declarations),
            None => groups.push((selector.to_string(), declarations)),
        }
    };

    for (feature, selector) in selectors {
        if feature == "root" {
            continue;
        }
        let Some(Value::Object(map)) = styles.as_object_mut().and_then(|m| m.get_mut(feature)) else {
            continue;
        };

        let root_selector = match selector {
            FeatureSelector::Shorthand(selector) => Some(selector.as_str()),
            FeatureSelector::Split(subfeatures) => {
                for (subfeature, subfeature_selector) in subfeatures {
                    if subfeature == "root" {
                        continue;
                    }
                    let Some(value) = map.remove(subfeature) else {
                        continue;
                    };
                    let mut sub_styles = Map::new();
                    let _ = sub_styles.insert(subfeature.clone(), value);
                    let wrapped = single_feature(feature, Value::Object(sub_styles));
                    add(subfeature_selector, compile_declarations(&wrapped, false, ctx, diagnostics));
                }
                subfeatures.get("root").map(String::as_str)
            }
        };

        let Some(root_selector) = root_selector else {
            continue;
        };
        let feature_styles = Value::Object(std::mem::take(map));
        if let Some(object) = styles.as_object_mut() {
            let _ = object.remove(feature);
        }
        let wrapped = single_feature(feature, feature_styles);
        add(root_selector, compile_declarations(&wrapped, false, ctx, diagnostics));
    }

    groups
}

fn single_feature(feature: &str, value: Value) -> Value {
    let mut map = Map::new();
    let _ = map.insert(feature.to_string(), value);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper: compile without a backing tree.
    fn compile(styles: &Value, is_root: bool) -> Vec<String> {
        compile_declarations(styles, is_root, &StyleContext::standalone("wp"), &mut Diagnostics::new())
    }

    #[test]
    fn test_sparse_subtree_yields_nothing() {
        assert!(compile(&json!({}), false).is_empty());
        assert!(compile(&json!({ "color": {}, "unknown": "x" }), true).is_empty());
    }

    #[test]
    fn test_color_and_typography() {
        let styles = json!({
            "color": { "background": "red" },
            "typography": { "fontSize": "12px", "lineHeight": 1.7 }
        });
        assert_eq!(
            compile(&styles, false),
            vec!["background-color: red", "font-size: 12px", "line-height: 1.7"]
        );
    }

    #[test]
    fn test_references_compile_to_variables() {
        let styles = json!({ "color": { "text": "var:preset|color|primary" } });
        assert_eq!(
            compile(&styles, false),
            vec!["color: var(--wp--preset--color--primary)"]
        );
    }

    #[test]
    fn test_root_shorthand_spacing_is_dropped() {
        let styles = json!({ "spacing": { "padding": "10px", "margin": "2em" } });
        assert!(compile(&styles, true).is_empty());
        assert_eq!(
            compile(&styles, false),
            vec!["padding: 10px", "margin: 2em"]
        );
    }

    #[test]
    fn test_root_per_side_padding_is_kept() {
        let styles = json!({ "spacing": { "padding": { "top": "1px", "bottom": "2px" } } });
        assert_eq!(
            compile(&styles, true),
            vec!["padding-top: 1px", "padding-bottom: 2px"]
        );
    }

    #[test]
    fn test_root_padding_aware_alignment() {
        let tree = json!({ "settings": { "useRootPaddingAwareAlignments": true } });
        let ctx = StyleContext::for_tree(&tree, "wp");
        let styles = json!({
            "spacing": { "padding": { "top": "10px", "right": "12px" } },
            "color": { "background": "red" }
        });
        let root = compile_declarations(&styles, true, &ctx, &mut Diagnostics::new());
        assert_eq!(
            root,
            vec![
                "--wp--style--root--padding-top: 10px",
                "--wp--style--root--padding-right: 12px",
                "background-color: red",
            ]
        );
        let block = compile_declarations(&styles, false, &ctx, &mut Diagnostics::new());
        assert_eq!(
            block,
            vec!["background-color: red", "padding-top: 10px", "padding-right: 12px"]
        );
    }

    #[test]
    fn test_duotone_filter_compiles_directly() {
        let styles = json!({ "filter": { "duotone": "var:preset|duotone|blue-red" } });
        assert_eq!(
            compile(&styles, false),
            vec!["filter: var(--wp--preset--duotone--blue-red)"]
        );
    }

    #[test]
    fn test_style_refs_follow_the_tree() {
        let tree = json!({ "styles": {
            "color": { "background": "black", "text": { "ref": "styles.color.missing" } },
            "elements": { "button": { "color": { "text": { "ref": "styles.color.background" } } } }
        } });
        let ctx = StyleContext::for_tree(&tree, "wp");
        let button = compile_declarations(&tree["styles"]["elements"]["button"], false, &ctx, &mut Diagnostics::new());
        assert_eq!(button, vec!["color: black"]);

        let root = compile_declarations(&tree["styles"], true, &ctx, &mut Diagnostics::new());
        assert_eq!(root, vec!["background-color: black"]);
    }

    #[test]
    fn test_refs_without_tree_are_skipped() {
        let styles = json!({ "color": { "text": { "ref": "styles.color.background" } } });
        assert!(compile(&styles, false).is_empty());
    }

    #[test]
    fn test_unresolved_reference_is_reported_and_emitted() {
        let tree = json!({ "settings": { "color": { "palette": { "theme": [
            { "slug": "primary", "color": "#00f" }
        ] } } } });
        let ctx = StyleContext::for_tree(&tree, "wp");
        let mut diagnostics = Diagnostics::new();
        let styles = json!({ "color": {
            "text": "var:preset|color|primary",
            "background": "var:preset|color|missing"
        } });
        let declarations = compile_declarations(&styles, false, &ctx, &mut diagnostics);

        assert_eq!(
            declarations,
            vec![
                "color: var(--wp--preset--color--primary)",
                "background-color: var(--wp--preset--color--missing)",
            ]
        );
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::UnresolvedReference {
                token: "var:preset|color|missing".to_string(),
                scope: None,
            }]
        );
    }

    #[test]
    fn test_fluid_font_size_declaration() {
        let tree = json!({ "settings": { "typography": { "fluid": true } } });
        let ctx = StyleContext::for_tree(&tree, "wp");
        let styles = json!({ "typography": { "fontSize": "28px" } });
        assert_eq!(
            compile_declarations(&styles, false, &ctx, &mut Diagnostics::new()),
            vec!["font-size: clamp(17.905px, 1.119rem + ((1vw - 3.2px) * 0.789), 28px)"]
        );
    }

    #[test]
    fn test_background_defaults_for_blocks() {
        let styles = json!({ "background": {
            "backgroundImage": { "url": "https://example.com/image.jpg" },
            "backgroundSize": "contain"
        } });
        assert_eq!(
            compile(&styles, false),
            vec![
                "background-image: url( 'https://example.com/image.jpg' )",
                "background-position: 50% 50%",
                "background-size: contain",
            ]
        );
        let cover = json!({ "background": { "backgroundImage": "url(a.png)" } });
        assert_eq!(
            compile(&cover, false),
            vec!["background-image: url(a.png)", "background-size: cover"]
        );
        assert_eq!(compile(&cover, true), vec!["background-image: url(a.png)"]);
    }

    #[test]
    fn test_feature_declarations_shorthand_and_split() {
        let mut styles = json!({
            "color": { "text": "red" },
            "border": { "color": "blue", "width": "2px" },
            "typography": { "fontSize": "12px", "fontWeight": "700" }
        });
        let mut selectors = IndexMap::new();
        let _ = selectors.insert(
            "border".to_string(),
            FeatureSelector::Shorthand(".img".to_string()),
        );
        let mut split = IndexMap::new();
        let _ = split.insert("root".to_string(), ".root".to_string());
        let _ = split.insert("fontSize".to_string(), ".caption".to_string());
        let _ = selectors.insert("typography".to_string(), FeatureSelector::Split(split));

        let groups = take_feature_declarations(
            &mut styles,
            &selectors,
            &StyleContext::standalone("wp"),
            &mut Diagnostics::new(),
        );

        assert_eq!(
            groups,
            vec![
                (".img".to_string(), vec!["border-color: blue".to_string(), "border-width: 2px".to_string()]),
                (".caption".to_string(), vec!["font-size: 12px".to_string()]),
                (".root".to_string(), vec!["font-weight: 700".to_string()]),
            ]
        );
        assert_eq!(styles, json!({ "color": { "text": "red" } }));
    }

    #[test]
    fn test_feature_groups_follow_registry_order() {
        let mut styles = json!({
            "border": { "color": "blue" },
            "typography": { "fontSize": "12px" }
        });
        let mut selectors = IndexMap::new();
        let _ = selectors.insert("typography".to_string(), FeatureSelector::Shorthand(".t".to_string()));
        let _ = selectors.insert("border".to_string(), FeatureSelector::Shorthand(".b".to_string()));

        let groups = take_feature_declarations(
            &mut styles,
            &selectors,
            &StyleContext::standalone("wp"),
            &mut Diagnostics::new(),
        );
        let order: Vec<&str> = groups.iter().map(|(selector, _)| selector.as_str()).collect();
        assert_eq!(order, vec![".t", ".b"]);
    }

    #[test]
    fn test_split_feature_without_root_keeps_remaining_keys() {
        let mut styles = json!({ "typography": { "fontSize": "12px", "fontWeight": "700" } });
        let mut split = IndexMap::new();
        let _ = split.insert("fontSize".to_string(), ".caption".to_string());
        let mut selectors = IndexMap::new();
        let _ = selectors.insert("typography".to_string(), FeatureSelector::Split(split));

        let groups = take_feature_declarations(
            &mut styles,
            &selectors,
            &StyleContext::standalone("wp"),
            &mut Diagnostics::new(),
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(styles, json!({ "typography": { "fontWeight": "700" } }));
    }
}

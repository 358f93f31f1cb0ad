//! Integration tests for whole-tree compilation.
//!
//! These drive [`gloss_css::compile`] and [`gloss_css::StylesCompiler`]
//! end to end, from layered configuration through to the stylesheet text.

use gloss_common::Diagnostic;
use gloss_css::{BlockSelectors, CompileOptions, CompiledBundle, SelectorRegistry, StylesCompiler, compile};
use gloss_tree::{apply_style_variation, merge};
use quickcheck_macros::quickcheck;
use serde_json::{Value, json};

const ALIGNMENT: &str = ".wp-site-blocks > .alignleft { float: left; margin-right: 2em; }\
.wp-site-blocks > .alignright { float: right; margin-left: 2em; }\
.wp-site-blocks > .aligncenter { justify-content: center; margin-left: auto; margin-right: auto; }";

/// Helper: compile under namespace `ns` with block gap support off, so the
/// output carries no gap margin rules.
fn compile_ns(tree: &Value, registry: &SelectorRegistry) -> CompiledBundle {
    let options = CompileOptions {
        namespace: "ns".to_string(),
        block_gap: Some(false),
        ..CompileOptions::default()
    };
    compile(tree, registry, &options)
}

/// Helper: a registry with a single scope.
fn registry_with(scope: &str, selector: &str) -> SelectorRegistry {
    SelectorRegistry::new().with(scope, BlockSelectors::new(selector))
}

#[test]
fn test_root_background_only() {
    let tree = json!({ "styles": { "color": { "background": "red" } } });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    assert_eq!(
        bundle.styles_css,
        format!("body{{margin: 0;}}body{{background-color: red;}}{ALIGNMENT}")
    );
    assert!(bundle.custom_properties_css.is_empty());
    assert!(bundle.custom_css.is_empty());
}

#[test]
fn test_scope_rule_follows_root_rule() {
    let tree = json!({ "styles": {
        "color": { "background": "red" },
        "blocks": { "grp": { "color": { "text": "blue" } } }
    } });
    let bundle = compile_ns(&tree, &registry_with("grp", ".grp"));
    assert_eq!(
        bundle.styles_css,
        format!("body{{margin: 0;}}body{{background-color: red;}}.grp{{color: blue;}}{ALIGNMENT}")
    );
}

#[test]
fn test_theme_color_preset_custom_property() {
    let tree = json!({ "settings": { "color": { "palette": { "theme": [
        { "name": "White", "slug": "white", "color": "white" }
    ] } } } });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    assert!(
        bundle
            .custom_properties_css
            .contains("--ns--preset--color--white: white;")
    );
    assert!(bundle.custom_properties_css.starts_with("body{"));
}

#[test]
fn test_theme_color_preset_utility_classes() {
    let tree = json!({ "settings": { "color": { "palette": { "theme": [
        { "name": "White", "slug": "white", "color": "white" }
    ] } } } });
    let css = compile_ns(&tree, &SelectorRegistry::new()).styles_css;
    assert!(css.contains(".has-white-color{color: var(--ns--preset--color--white) !important;}"));
    assert!(css.contains(
        ".has-white-background-color{background-color: var(--ns--preset--color--white) !important;}"
    ));
}

#[test]
fn test_default_layout_skipped_without_block_gap() {
    let tree = json!({
        "settings": { "layout": { "definitions": {
            "default": {
                "name": "default",
                "slug": "flow",
                "className": "is-layout-flow",
                "baseStyles": [ { "selector": " > .alignleft", "rules": { "float": "left" } } ],
                "spacingStyles": [ { "selector": " > *", "rules": { "margin-block-start": null } } ]
            },
            "flex": {
                "name": "flex",
                "slug": "flex",
                "className": "is-layout-flex",
                "displayMode": "flex",
                "spacingStyles": [ { "selector": "", "rules": { "gap": null } } ]
            }
        } } },
        "styles": { "color": { "text": "black" } }
    });
    let css = compile_ns(&tree, &SelectorRegistry::new()).styles_css;
    assert!(!css.contains("is-layout-flow"));
    assert!(css.contains(":where(.is-layout-flex) { gap: 0.5em; }"));
    assert!(css.contains("body .is-layout-flex { display:flex; }"));
}

#[test]
fn test_root_layout_rules_without_root_styles() {
    let tree = json!({
        "settings": { "layout": { "definitions": {
            "flex": {
                "name": "flex",
                "slug": "flex",
                "className": "is-layout-flex",
                "displayMode": "flex",
                "spacingStyles": [ { "selector": "", "rules": { "gap": null } } ]
            }
        } } },
        "styles": { "elements": { "link": { "color": { "text": "blue" } } } }
    });
    let css = compile(&tree, &SelectorRegistry::new(), &CompileOptions::default()).styles_css;
    assert!(css.contains("body .is-layout-flex { display:flex; }"));
    assert!(css.contains("body { --wp--style--block-gap: 0.5em; }"));
    assert!(css.contains("a{color: blue;}"));
    assert!(!css.contains("body{color"));
}

#[test]
fn test_node_order() {
    let tree = json!({ "styles": {
        "blocks": {
            "b/second": { "color": { "text": "green" } },
            "b/first": {
                "color": { "text": "teal" },
                "elements": { "link": { "color": { "text": "navy" } } }
            }
        },
        "elements": {
            "h1": { "color": { "text": "maroon" } },
            "link": { "color": { "text": "purple" } }
        },
        "color": { "text": "black" }
    } });
    let registry = SelectorRegistry::new()
        .with("b/first", BlockSelectors::new(".first"))
        .with("b/second", BlockSelectors::new(".second"));
    let css = compile_ns(&tree, &registry).styles_css;

    let positions: Vec<usize> = [
        "body{color: black;}",
        "a{color: purple;}",
        "h1{color: maroon;}",
        ".second{color: green;}",
        ".first{color: teal;}",
        ".first a{color: navy;}",
    ]
    .iter()
    .map(|rule| css.find(rule).unwrap_or_else(|| panic!("missing {rule} in {css}")))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_sparse_tree_emits_only_fixed_rules() {
    let tree = json!({ "styles": {
        "color": {},
        "elements": { "link": {} },
        "blocks": { "grp": { "typography": {} } }
    } });
    let bundle = compile_ns(&tree, &registry_with("grp", ".grp"));
    assert_eq!(bundle.styles_css, format!("body{{margin: 0;}}{ALIGNMENT}"));
    assert!(bundle.custom_properties_css.is_empty());
    assert!(bundle.diagnostics.is_empty());
}

#[test]
fn test_root_shorthand_spacing_is_dropped() {
    let tree = json!({ "styles": { "spacing": { "padding": "1rem", "margin": "2rem" } } });
    let css = compile_ns(&tree, &SelectorRegistry::new()).styles_css;
    assert_eq!(css, format!("body{{margin: 0;}}{ALIGNMENT}"));

    let scoped = json!({ "styles": { "blocks": { "grp": { "spacing": { "padding": "1rem" } } } } });
    let css = compile_ns(&scoped, &registry_with("grp", ".grp")).styles_css;
    assert!(css.contains(".grp{padding: 1rem;}"));
}

#[test]
fn test_unregistered_scope_is_reported() {
    let tree = json!({ "styles": { "blocks": { "ghost": { "color": { "text": "red" } } } } });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    assert!(!bundle.styles_css.contains("red"));
    assert_eq!(
        bundle.diagnostics,
        vec![Diagnostic::RegistryMismatch {
            scope: "ghost".to_string()
        }]
    );
}

#[test]
fn test_references_compile_and_unknown_presets_are_reported() {
    let tree = json!({
        "settings": { "color": { "palette": { "theme": [ { "slug": "primary", "color": "#123456" } ] } } },
        "styles": {
            "color": { "text": "var:preset|color|primary", "background": "var:preset|color|missing" }
        }
    });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    assert!(bundle.styles_css.contains(
        "body{color: var(--ns--preset--color--primary);background-color: var(--ns--preset--color--missing);}"
    ));
    assert_eq!(bundle.diagnostics.len(), 1);
    assert!(matches!(
        &bundle.diagnostics[0],
        Diagnostic::UnresolvedReference { token, .. } if token == "var:preset|color|missing"
    ));
}

#[test]
fn test_merge_then_compile() {
    let base = json!({
        "settings": { "color": { "palette": { "theme": [ { "slug": "base", "color": "#000" } ] } } },
        "styles": {
            "color": { "text": "black" },
            "typography": { "fontFamily": "serif" }
        }
    });
    let user = json!({
        "styles": {
            "color": { "background": "white" },
            "typography": { "fontFamily": "default" }
        }
    });
    let merged = merge(&base, &user).unwrap();
    let bundle = compile_ns(&merged, &SelectorRegistry::new());
    assert!(bundle.styles_css.contains("body{color: black;background-color: white;}"));
    assert!(!bundle.styles_css.contains("font-family"));
    assert!(bundle.custom_properties_css.contains("--ns--preset--color--base: #000;"));
}

#[test]
fn test_style_variation_then_compile() {
    let tree = json!({
        "styles": {
            "color": { "text": "black" },
            "variations": { "dark": { "color": { "text": "white" } } }
        }
    });
    let varied = apply_style_variation(&tree, "dark").unwrap();
    let css = compile_ns(&varied, &SelectorRegistry::new()).styles_css;
    assert!(css.contains("body{color: white;}"));
}

#[test]
fn test_block_gap_margin_rules() {
    let tree = json!({ "styles": { "spacing": { "blockGap": "1.5rem" } } });
    let css = compile(&tree, &SelectorRegistry::new(), &CompileOptions::default()).styles_css;
    assert!(css.ends_with(
        ":where(.wp-site-blocks) > * { margin-block-start: 1.5rem; margin-block-end: 0; }\
         :where(.wp-site-blocks) > :first-child:first-child { margin-block-start: 0; }\
         :where(.wp-site-blocks) > :last-child:last-child { margin-block-end: 0; }"
    ));
}

#[test]
fn test_stylesheet_concatenates_in_load_order() {
    let tree = json!({
        "settings": { "custom": { "lineHeight": { "body": 1.5 } } },
        "styles": { "css": "p { margin: 0; }" }
    });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    let sheet = bundle.stylesheet();
    let custom = sheet.find("--ns--custom--line-height--body: 1.5;").unwrap();
    let reset = sheet.find("body{margin: 0;}").unwrap();
    let author = sheet.find("p { margin: 0; }").unwrap();
    assert!(custom < reset && reset < author);
}

#[test]
fn test_compiler_caches_across_equal_trees() {
    let compiler = StylesCompiler::new();
    let registry = registry_with("grp", ".grp");
    let options = CompileOptions::default();
    let first = compiler.compile(&json!({ "styles": { "color": { "text": "red" } } }), &registry, &options);
    let second = compiler.compile(&json!({ "styles": { "color": { "text": "red" } } }), &registry, &options);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[quickcheck]
fn prop_compile_is_deterministic(text: String, background: String, scope_color: String) -> bool {
    let tree = json!({ "styles": {
        "color": { "text": text, "background": background },
        "blocks": { "grp": { "color": { "text": scope_color } } }
    } });
    let registry = registry_with("grp", ".grp");
    compile_ns(&tree, &registry) == compile_ns(&tree, &registry)
}

#[quickcheck]
fn prop_unregistered_scopes_never_emit(scope: String, color: String) -> bool {
    let tree = json!({ "styles": { "blocks": { scope: { "color": { "text": color } } } } });
    let bundle = compile_ns(&tree, &SelectorRegistry::new());
    bundle.styles_css == format!("body{{margin: 0;}}{ALIGNMENT}")
}

//! Rule extraction for style categories.
//!
//! Turns the structured categories of a style subtree (border, color,
//! spacing and so on) into flat `property`/`value` pairs. Values are left
//! as found: references and `{ "ref": ... }` objects are resolved by the
//! declaration compiler, which also decides what to drop for the root.

use gloss_tree::get_path;
use serde_json::Value;

/// One extracted declaration, value not yet compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    /// CSS property name.
    pub property: String,
    /// Raw value from the style subtree.
    pub value: Value,
}

impl CssRule {
    fn new(property: impl Into<String>, value: &Value) -> Self {
        Self {
            property: property.into(),
            value: value.clone(),
        }
    }
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [(&str, &str); 4] = [
    ("topLeft", "top-left"),
    ("topRight", "top-right"),
    ("bottomLeft", "bottom-left"),
    ("bottomRight", "bottom-right"),
];

/// `(style key, CSS property)` for categories that map one to one.
const COLOR: &[(&str, &str)] = &[
    ("text", "color"),
    ("gradient", "background"),
    ("background", "background-color"),
];
const DIMENSIONS: &[(&str, &str)] = &[("minHeight", "min-height"), ("aspectRatio", "aspect-ratio")];
const OUTLINE: &[(&str, &str)] = &[
    ("color", "outline-color"),
    ("offset", "outline-offset"),
    ("style", "outline-style"),
    ("width", "outline-width"),
];
const TYPOGRAPHY: &[(&str, &str)] = &[
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("fontStyle", "font-style"),
    ("fontWeight", "font-weight"),
    ("lineHeight", "line-height"),
    ("letterSpacing", "letter-spacing"),
    ("textColumns", "column-count"),
    ("textDecoration", "text-decoration"),
    ("textTransform", "text-transform"),
    ("writingMode", "writing-mode"),
];
const BACKGROUND: &[(&str, &str)] = &[
    ("backgroundPosition", "background-position"),
    ("backgroundRepeat", "background-repeat"),
    ("backgroundSize", "background-size"),
    ("backgroundAttachment", "background-attachment"),
];

/// Extract every recognized declaration from `styles`, category by
/// category: border, color, dimensions, outline, spacing, typography,
/// shadow, background.
#[must_use]
pub fn css_rules(styles: &Value) -> Vec<CssRule> {
    let mut rules = Vec::new();
    border_rules(styles, &mut rules);
    simple_rules(styles, "color", COLOR, &mut rules);
    simple_rules(styles, "dimensions", DIMENSIONS, &mut rules);
    simple_rules(styles, "outline", OUTLINE, &mut rules);
    box_rules(styles, "padding", &mut rules);
    box_rules(styles, "margin", &mut rules);
    simple_rules(styles, "typography", TYPOGRAPHY, &mut rules);
    if let Some(shadow) = get_path(styles, &["shadow"]) {
        rules.push(CssRule::new("box-shadow", shadow));
    }
    background_rules(styles, &mut rules);
    rules
}

fn simple_rules(styles: &Value, category: &str, table: &[(&str, &str)], rules: &mut Vec<CssRule>) {
    for &(key, property) in table {
        if let Some(value) = get_path(styles, &[category, key]) {
            rules.push(CssRule::new(property, value));
        }
    }
}

/// `spacing.padding` / `spacing.margin`: a string is the shorthand, an
/// object gives one declaration per side present.
fn box_rules(styles: &Value, property: &str, rules: &mut Vec<CssRule>) {
    let Some(value) = get_path(styles, &["spacing", property]) else {
        return;
    };
    if value.is_object() {
        for side in SIDES {
            if let Some(side_value) = get_path(value, &[side]) {
                rules.push(CssRule::new(format!("{property}-{side}"), side_value));
            }
        }
    } else {
        rules.push(CssRule::new(property, value));
    }
}

fn border_rules(styles: &Value, rules: &mut Vec<CssRule>) {
    let Some(border) = get_path(styles, &["border"]) else {
        return;
    };
    if let Some(color) = get_path(border, &["color"]) {
        rules.push(CssRule::new("border-color", color));
    }
    match get_path(border, &["radius"]) {
        Some(radius) if radius.is_object() => {
            for (key, corner) in CORNERS {
                if let Some(value) = get_path(radius, &[key]) {
                    rules.push(CssRule::new(format!("border-{corner}-radius"), value));
                }
            }
        }
        Some(radius) => rules.push(CssRule::new("border-radius", radius)),
        None => {}
    }
    for key in ["style", "width"] {
        if let Some(value) = get_path(border, &[key]) {
            rules.push(CssRule::new(format!("border-{key}"), value));
        }
    }
    for side in SIDES {
        for key in ["color", "style", "width"] {
            if let Some(value) = get_path(border, &[side, key]) {
                rules.push(CssRule::new(format!("border-{side}-{key}"), value));
            }
        }
    }
}

fn background_rules(styles: &Value, rules: &mut Vec<CssRule>) {
    if let Some(image) = get_path(styles, &["background", "backgroundImage"]) {
        match get_path(image, &["url"]).and_then(Value::as_str) {
            Some(url) => rules.push(CssRule {
                property: "background-image".to_string(),
                value: Value::String(format!("url( '{url}' )")),
            }),
            None if image.is_string() => rules.push(CssRule::new("background-image", image)),
            None => {}
        }
    }
    simple_rules(styles, "background", BACKGROUND, rules);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper: render rules as `property: value` for compact assertions.
    fn render(rules: &[CssRule]) -> Vec<String> {
        rules
            .iter()
            .map(|r| format!("{}: {}", r.property, gloss_tree::scalar_to_css(&r.value).unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_empty_styles_yield_nothing() {
        assert!(css_rules(&json!({})).is_empty());
        assert!(css_rules(&json!({ "unknown": { "x": 1 } })).is_empty());
    }

    #[test]
    fn test_color_rules() {
        let styles = json!({ "color": { "background": "red", "text": "blue" } });
        assert_eq!(render(&css_rules(&styles)), vec!["color: blue", "background-color: red"]);
    }

    #[test]
    fn test_spacing_sides_and_shorthand() {
        let styles = json!({ "spacing": {
            "padding": { "top": "1px", "left": "4px" },
            "margin": "2em"
        } });
        assert_eq!(
            render(&css_rules(&styles)),
            vec!["padding-top: 1px", "padding-left: 4px", "margin: 2em"]
        );
    }

    #[test]
    fn test_border_rules() {
        let styles = json!({ "border": {
            "color": "red",
            "radius": { "topLeft": "2px", "bottomRight": "4px" },
            "width": "1px",
            "top": { "color": "blue", "width": "3px" }
        } });
        assert_eq!(
            render(&css_rules(&styles)),
            vec![
                "border-color: red",
                "border-top-left-radius: 2px",
                "border-bottom-right-radius: 4px",
                "border-width: 1px",
                "border-top-color: blue",
                "border-top-width: 3px",
            ]
        );
    }

    #[test]
    fn test_typography_order_and_numbers() {
        let styles = json!({ "typography": {
            "lineHeight": 1.5,
            "fontWeight": 700,
            "fontFamily": "serif",
            "textColumns": "2"
        } });
        assert_eq!(
            render(&css_rules(&styles)),
            vec![
                "font-family: serif",
                "font-weight: 700",
                "line-height: 1.5",
                "column-count: 2"
            ]
        );
    }

    #[test]
    fn test_background_image_object() {
        let styles = json!({ "background": {
            "backgroundImage": { "url": "https://example.com/a.png" },
            "backgroundSize": "contain"
        } });
        assert_eq!(
            render(&css_rules(&styles)),
            vec![
                "background-image: url( 'https://example.com/a.png' )",
                "background-size: contain"
            ]
        );
    }

    #[test]
    fn test_ref_values_are_kept_raw() {
        let styles = json!({ "color": { "text": { "ref": "styles.color.background" } } });
        let rules = css_rules(&styles);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].value, json!({ "ref": "styles.color.background" }));
    }
}

//! Style property registry.
//!
//! Maps style keys of a subtree to CSS properties. Most categories are
//! compiled by the rule extraction in [`crate::engine`] and are listed here
//! with `use_engine` set so the table stays a complete inventory of what a
//! style subtree may contain. Entries without the flag are compiled
//! directly by the declaration compiler.

/// One style key and the CSS it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleProperty {
    /// CSS property name. A leading `--` marks a custom property that gets
    /// the namespace inserted: `--style--x` becomes `--{ns}--style--x`.
    pub css_name: &'static str,
    /// Path of the value inside a style subtree.
    pub path: &'static [&'static str],
    /// Per-side sub-properties as `(css suffix, key)` pairs.
    pub sub_properties: &'static [(&'static str, &'static str)],
    /// Only emitted for the root node.
    pub root_only: bool,
    /// Compiled by the rule extraction engine instead.
    pub use_engine: bool,
    /// Only emitted when root padding-aware alignments are enabled.
    pub needs_padding_alignment: bool,
}

impl StyleProperty {
    const fn engine(css_name: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            css_name,
            path,
            sub_properties: &[],
            root_only: false,
            use_engine: true,
            needs_padding_alignment: false,
        }
    }

    /// Whether the value lives under `elements` and belongs to an element
    /// node instead.
    #[must_use]
    pub fn is_element_property(&self) -> bool {
        self.path.first() == Some(&"elements")
    }

    /// The concrete CSS property name for `namespace`.
    #[must_use]
    pub fn property_name(&self, namespace: &str) -> String {
        self.css_name
            .strip_prefix("--")
            .map_or_else(|| self.css_name.to_string(), |rest| format!("--{namespace}--{rest}"))
    }
}

const SIDES: &[(&str, &str)] = &[
    ("top", "top"),
    ("right", "right"),
    ("bottom", "bottom"),
    ("left", "left"),
];

/// Every style property, in declaration order.
pub static STYLE_PROPERTIES: &[StyleProperty] = &[
    StyleProperty::engine("background", &["color", "gradient"]),
    StyleProperty::engine("background-color", &["color", "background"]),
    StyleProperty::engine("color", &["color", "text"]),
    StyleProperty::engine("border-color", &["border", "color"]),
    StyleProperty::engine("border-radius", &["border", "radius"]),
    StyleProperty::engine("border-style", &["border", "style"]),
    StyleProperty::engine("border-width", &["border", "width"]),
    StyleProperty::engine("min-height", &["dimensions", "minHeight"]),
    StyleProperty::engine("aspect-ratio", &["dimensions", "aspectRatio"]),
    StyleProperty {
        css_name: "filter",
        path: &["filter", "duotone"],
        sub_properties: &[],
        root_only: false,
        use_engine: false,
        needs_padding_alignment: false,
    },
    StyleProperty {
        css_name: "--style--root--padding",
        path: &["spacing", "padding"],
        sub_properties: SIDES,
        root_only: true,
        use_engine: false,
        needs_padding_alignment: true,
    },
    StyleProperty::engine("margin", &["spacing", "margin"]),
    StyleProperty::engine("padding", &["spacing", "padding"]),
    StyleProperty::engine("box-shadow", &["shadow"]),
    StyleProperty::engine("outline-color", &["outline", "color"]),
    StyleProperty::engine("font-family", &["typography", "fontFamily"]),
    StyleProperty::engine("font-size", &["typography", "fontSize"]),
    StyleProperty::engine("font-style", &["typography", "fontStyle"]),
    StyleProperty::engine("font-weight", &["typography", "fontWeight"]),
    StyleProperty::engine("line-height", &["typography", "lineHeight"]),
    StyleProperty::engine("letter-spacing", &["typography", "letterSpacing"]),
    StyleProperty::engine("text-decoration", &["typography", "textDecoration"]),
    StyleProperty::engine("text-transform", &["typography", "textTransform"]),
    StyleProperty::engine("writing-mode", &["typography", "writingMode"]),
    StyleProperty::engine("color", &["elements", "link", "color", "text"]),
    StyleProperty::engine("color", &["elements", "button", "color", "text"]),
    StyleProperty::engine("background-color", &["elements", "button", "color", "background"]),
    StyleProperty::engine("color", &["elements", "caption", "color", "text"]),
    StyleProperty::engine("color", &["elements", "heading", "color", "text"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_inserts_namespace() {
        let padding = STYLE_PROPERTIES
            .iter()
            .find(|p| p.root_only)
            .unwrap();
        assert_eq!(padding.property_name("wp"), "--wp--style--root--padding");
        assert_eq!(STYLE_PROPERTIES[0].property_name("wp"), "background");
    }

    #[test]
    fn test_element_properties_are_flagged() {
        let element_count = STYLE_PROPERTIES
            .iter()
            .filter(|p| p.is_element_property())
            .count();
        assert_eq!(element_count, 5);
    }

    #[test]
    fn test_only_direct_entries_skip_the_engine() {
        let direct: Vec<&str> = STYLE_PROPERTIES
            .iter()
            .filter(|p| !p.use_engine)
            .map(|p| p.css_name)
            .collect();
        assert_eq!(direct, vec!["filter", "--style--root--padding"]);
    }
}

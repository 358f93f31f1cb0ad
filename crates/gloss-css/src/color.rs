//! Color parsing for filter definitions.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Duotone presets list their stops as CSS color strings. Hosts rendering
//! the filters need channel values, so stops are parsed here with
//! `csscolorparser`: hex notations, named colors and the color functions.

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Rgba {
    /// Parse any CSS `<color>`, or `None` when the text is not one.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match csscolorparser::parse(value.trim()) {
            Ok(color) => {
                let [r, g, b, a] = color.to_rgba8();
                Some(Self { r, g, b, a })
            }
            Err(err) => {
                tracing::debug!(color = value, %err, "unparseable color stop");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: an opaque color.
    const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    #[test]
    fn test_hex_notations() {
        assert_eq!(Rgba::parse("#f00"), Some(opaque(255, 0, 0)));
        assert_eq!(Rgba::parse(" #1a2b3c "), Some(opaque(0x1a, 0x2b, 0x3c)));
        assert_eq!(Rgba::parse("#0000ff00").map(|c| c.a), Some(0));
        assert_eq!(Rgba::parse("#zzz"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Rgba::parse("White"), Some(opaque(255, 255, 255)));
        assert_eq!(Rgba::parse("papayawhip"), Some(opaque(255, 239, 213)));
        assert_eq!(Rgba::parse("rebeccapurple"), Some(opaque(102, 51, 153)));
        assert_eq!(Rgba::parse("transparent").map(|c| c.a), Some(0));
        assert_eq!(Rgba::parse("not-a-color"), None);
    }

    #[test]
    fn test_color_functions() {
        assert_eq!(Rgba::parse("rgb(255, 128, 0)"), Some(opaque(255, 128, 0)));
        assert_eq!(Rgba::parse("rgb(0 0 255 / 0)"), Some(Rgba { r: 0, g: 0, b: 255, a: 0 }));
        assert_eq!(Rgba::parse("hsl(0, 100%, 50%)"), Some(opaque(255, 0, 0)));
        assert_eq!(Rgba::parse("rgb(a, b, c)"), None);
    }
}

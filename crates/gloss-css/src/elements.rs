//! Semantic elements and the fixed selectors they map to.
//!
//! [theme.json § Elements](https://developer.wordpress.org/themes/global-settings-and-styles/styles/styles-reference/#elements)
//!
//! "Elements are HTML elements that are not blocks but that can be styled
//! globally or per block."

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Selector of the root style node, and of the root settings node's
/// custom properties.
pub const ROOT_BLOCK_SELECTOR: &str = "body";

/// A semantic sub-role of the root or of a scope.
///
/// Declaration order is emission order for root elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Element {
    /// Hyperlinks.
    Link,
    /// All heading levels at once.
    Heading,
    /// Level 1 headings.
    H1,
    /// Level 2 headings.
    H2,
    /// Level 3 headings.
    H3,
    /// Level 4 headings.
    H4,
    /// Level 5 headings.
    H5,
    /// Level 6 headings.
    H6,
    /// Buttons, including button-styled links.
    Button,
    /// Figure captions.
    Caption,
    /// Quotation citations.
    Cite,
}

impl Element {
    /// The fixed selector for this element. May be a selector list.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Link => "a",
            Self::Heading => "h1, h2, h3, h4, h5, h6",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Button => ".wp-element-button, .wp-block-button__link",
            Self::Caption => {
                ".wp-element-caption, .wp-block-audio figcaption, .wp-block-embed figcaption, \
                 .wp-block-gallery figcaption, .wp-block-image figcaption, \
                 .wp-block-table figcaption, .wp-block-video figcaption"
            }
            Self::Cite => "cite",
        }
    }
}

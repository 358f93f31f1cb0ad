//! Selector list helpers.
//!
//! Scope selectors may be selector lists (`.a, .b`). Every helper here
//! works part by part so a list never collapses into a single compound.

/// Nest `selector` inside every part of `scope`.
///
/// `scope_selector(".a, .b", "h1, h2")` is `.a h1, .a h2, .b h1, .b h2`.
#[must_use]
pub fn scope_selector(scope: &str, selector: &str) -> String {
    let mut parts = Vec::new();
    for outer in scope.split(',') {
        for inner in selector.split(',') {
            parts.push(format!("{} {}", outer.trim(), inner.trim()));
        }
    }
    parts.join(", ")
}

/// Append `suffix` to every part of `selector`, keeping the list spacing.
///
/// `append_to_selector("h1, h2", ":hover")` is `h1:hover, h2:hover`.
#[must_use]
pub fn append_to_selector(selector: &str, suffix: &str) -> String {
    selector
        .split(',')
        .map(|part| format!("{part}{suffix}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Selector for a block style variation.
///
/// The `.is-style-{variation}` class lands right after the first compound
/// of each part, so `.wp-block-quote p` becomes
/// `.wp-block-quote.is-style-plain p`.
#[must_use]
pub fn block_style_variation_selector(variation: &str, block_selector: &str) -> String {
    let class = format!(".is-style-{variation}");
    block_selector
        .split(',')
        .map(|part| insert_after_first_compound(part, &class))
        .collect::<Vec<_>>()
        .join(",")
}

fn insert_after_first_compound(part: &str, class: &str) -> String {
    let is_compound_char = |c: char| !c.is_whitespace() && c != ':';
    let Some(start) = part.find(is_compound_char) else {
        return part.to_string();
    };
    let end = part[start..]
        .find(|c: char| !is_compound_char(c))
        .map_or(part.len(), |offset| start + offset);
    format!("{}{class}{}", &part[..end], &part[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_selector_cross_product() {
        assert_eq!(scope_selector(".a, .b", "x"), ".a x, .b x");
        assert_eq!(
            scope_selector(".a,.b", "h1, h2"),
            ".a h1, .a h2, .b h1, .b h2"
        );
    }

    #[test]
    fn test_append_to_selector() {
        assert_eq!(append_to_selector("a", ":hover"), "a:hover");
        assert_eq!(append_to_selector("h1, h2", ":focus"), "h1:focus, h2:focus");
        assert_eq!(append_to_selector("", ".has-x-color"), ".has-x-color");
    }

    #[test]
    fn test_block_style_variation_selector() {
        assert_eq!(
            block_style_variation_selector("custom", ".wp-block-quote"),
            ".wp-block-quote.is-style-custom"
        );
        assert_eq!(
            block_style_variation_selector("plain", ".wp-block-quote p, .wp-block-pullquote"),
            ".wp-block-quote.is-style-plain p, .wp-block-pullquote.is-style-plain"
        );
        assert_eq!(
            block_style_variation_selector("x", ".wp-block-button:hover"),
            ".wp-block-button.is-style-x:hover"
        );
    }
}

//! `&` nesting for per-scope custom CSS.
//!
//! A scope's `css` string is written relative to the scope: bare
//! declarations apply to the scope itself and `&` stands for the scope
//! selector, as in
//!
//! ```css
//! color: red; &:hover { color: blue; } & p { margin: 0; }
//! ```
//!
//! This is not a CSS parser. Anything beyond one level of `&` rules passes
//! through as written.

use crate::selectors::append_to_selector;

/// Expand `css` against `selector`.
///
/// Each `&` starts a nested rule whose selector is appended to every part
/// of `selector`; text without braces becomes a rule on `selector` itself.
#[must_use]
pub fn process_css_nesting(css: &str, selector: &str) -> String {
    let mut processed = String::new();
    for part in css.split('&') {
        match part.find('{') {
            None => {
                let declarations = part.trim();
                if !declarations.is_empty() {
                    processed.push_str(selector);
                    processed.push('{');
                    processed.push_str(declarations);
                    processed.push('}');
                }
            }
            Some(open) => {
                processed.push_str(&append_to_selector(selector, &part[..open]));
                processed.push_str(part[open..].trim_end());
            }
        }
    }
    processed
}

//! Variable references.
//!
//! Style values may name a preset or custom value symbolically instead of
//! repeating its literal:
//!
//! - `ref:preset|color|primary` compiles to `var(--wp--preset--color--primary)`
//! - `ref:custom|line-height|body` compiles to `var(--wp--custom--line-height--body)`
//!
//! The older `var:` prefix is accepted as a synonym. Segments are kebab
//! cased on the way out, matching how the custom property emitter names
//! the declarations the reference points at.

use std::collections::HashSet;

use gloss_tree::get_path;
use serde_json::Value;

use crate::presets::{find_in_presets_by, infix_for_style_path, metadata_for_infix};
use crate::text::kebab_case;

/// Prefix of a symbolic reference token.
pub const REFERENCE_PREFIX: &str = "ref:";
/// Older prefix accepted for compatibility with existing documents.
pub const LEGACY_REFERENCE_PREFIX: &str = "var:";
/// Separator between token segments.
pub const REFERENCE_SEPARATOR: char = '|';

/// Segments of a reference token, or `None` if `value` is not a token.
#[must_use]
pub fn token_segments(value: &str) -> Option<Vec<&str>> {
    let body = value
        .strip_prefix(REFERENCE_PREFIX)
        .or_else(|| value.strip_prefix(LEGACY_REFERENCE_PREFIX))?;
    Some(body.split(REFERENCE_SEPARATOR).collect())
}

/// Compile a reference token to a `var()` call. Anything that is not a
/// token is returned unchanged.
#[must_use]
pub fn compile_reference(value: &str, namespace: &str) -> String {
    match token_segments(value) {
        Some(segments) => format!("var({})", custom_property_name(namespace, &segments)),
        None => value.to_string(),
    }
}

/// `--{namespace}--{segment}--{segment}...` with kebab-cased segments.
#[must_use]
pub fn custom_property_name<S: AsRef<str>>(namespace: &str, segments: &[S]) -> String {
    let mut name = format!("--{namespace}");
    for segment in segments {
        name.push_str("--");
        name.push_str(&kebab_case(segment.as_ref()));
    }
    name
}

/// Snap a concrete style value to the preset it equals.
///
/// `style_path` is the dotted path of the value inside a style subtree,
/// such as `color.text`. Returns `ref:preset|{infix}|{slug}` when a live
/// preset has exactly this value, otherwise `value` unchanged.
#[must_use]
pub fn resolve_preset_reference(settings: &Value, scope: Option<&str>, style_path: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let Some(metadata) = infix_for_style_path(style_path).and_then(metadata_for_infix) else {
        return value.to_string();
    };

    let found = find_in_presets_by(
        settings,
        scope,
        metadata.path,
        metadata.value_key,
        &Value::String(value.to_string()),
    );
    match found.and_then(|preset| preset.get("slug")).and_then(Value::as_str) {
        Some(slug) => format!(
            "{REFERENCE_PREFIX}preset{REFERENCE_SEPARATOR}{}{REFERENCE_SEPARATOR}{slug}",
            metadata.css_var_infix
        ),
        None => value.to_string(),
    }
}

/// A reference split into its domain and remaining path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `preset|{infix}|{slug}`
    Preset {
        /// Category infix.
        infix: String,
        /// Preset slug as written.
        slug: String,
    },
    /// `custom|{path...}`
    Custom {
        /// Path segments under `custom`.
        path: Vec<String>,
    },
}

impl Reference {
    /// Parse a `ref:`/`var:` token or a `var(--{namespace}--...)` call.
    #[must_use]
    pub fn parse(value: &str, namespace: &str) -> Option<Self> {
        let segments: Vec<String> = if let Some(segments) = token_segments(value) {
            segments.into_iter().map(str::to_string).collect()
        } else {
            let prefix = format!("var(--{namespace}--");
            let inner = value.strip_prefix(prefix.as_str())?.strip_suffix(')')?;
            inner.split("--").map(str::to_string).collect()
        };

        match segments.as_slice() {
            [domain, infix, slug] if domain == "preset" => Some(Self::Preset {
                infix: infix.clone(),
                slug: slug.clone(),
            }),
            [domain, path @ ..] if domain == "custom" && !path.is_empty() => Some(Self::Custom {
                path: path.to_vec(),
            }),
            _ => None,
        }
    }
}

/// Whether a preset token names a preset defined at the root or in `scope`.
///
/// Non-preset values are considered resolved.
#[must_use]
pub fn preset_reference_exists(settings: &Value, scope: Option<&str>, value: &str, namespace: &str) -> bool {
    match Reference::parse(value, namespace) {
        Some(Reference::Preset { infix, slug }) => find_preset_by_slug(settings, scope, &infix, &slug).is_some(),
        _ => true,
    }
}

fn find_preset_by_slug<'a>(settings: &'a Value, scope: Option<&str>, infix: &str, slug: &str) -> Option<&'a Value> {
    let metadata = metadata_for_infix(infix)?;
    let wanted = kebab_case(slug);
    let mut sources: Vec<&Value> = Vec::with_capacity(2);
    if let Some(block) = scope.and_then(|s| get_path(settings, &["blocks", s])) {
        sources.push(block);
    }
    sources.push(settings);

    sources.into_iter().find_map(|source| {
        gloss_tree::Origin::by_priority().find_map(|origin| {
            metadata.catalog(source, origin)?.iter().find(|item| {
                item.get("slug")
                    .and_then(Value::as_str)
                    .is_some_and(|s| kebab_case(s) == wanted)
            })
        })
    })
}

/// Resolve a reference back to the concrete value it stands for.
///
/// Preset references yield the preset's value field. Custom references
/// yield the custom value, looked up in `scope` first. Resolution repeats
/// while the result is itself a reference; a reference cycle is logged and
/// the value is returned as found. Non-references come back unchanged.
#[must_use]
pub fn resolve_variable_value(tree: &Value, scope: Option<&str>, value: &Value, namespace: &str) -> Value {
    let mut seen = HashSet::new();
    let mut current = value.clone();

    loop {
        let Some(text) = current.as_str() else {
            return current;
        };
        let Some(reference) = Reference::parse(text, namespace) else {
            return current;
        };
        if !seen.insert(text.to_string()) {
            tracing::warn!(reference = text, "reference cycle while resolving variable");
            return current;
        }

        let settings = get_path(tree, &["settings"]).unwrap_or(&Value::Null);
        let next = match &reference {
            Reference::Preset { infix, slug } => find_preset_by_slug(settings, scope, infix, slug).and_then(|preset| {
                let metadata = metadata_for_infix(infix)?;
                preset.get(metadata.value_key).cloned()
            }),
            Reference::Custom { path } => {
                let block = scope.and_then(|s| {
                    let mut full = vec!["blocks", s, "custom"];
                    full.extend(path.iter().map(String::as_str));
                    get_path(settings, &full)
                });
                block
                    .or_else(|| {
                        let mut full = vec!["custom"];
                        full.extend(path.iter().map(String::as_str));
                        get_path(settings, &full)
                    })
                    .cloned()
            }
        };

        match next {
            Some(next) => current = next,
            None => return current,
        }
    }
}

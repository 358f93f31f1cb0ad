//! Layer merging.
//!
//! A configuration reaches the compiler as two layers: the base layer
//! (host defaults plus theme) and the user layer (edits made on top). The
//! merge is a deep object merge with three rules:
//!
//! 1. Arrays in the user layer replace the base array outright. Preset
//!    catalogs are per-origin arrays and must never be zipped by index.
//! 2. A `typography.fontFamily` set to [`FONT_FAMILY_SENTINEL`] merges to an
//!    explicit `null`, which downstream means "emit no rule".
//! 3. Every other user value, `null` included, replaces the base value.

use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::path::get_path;

/// Deepest object nesting accepted from the user layer. Real documents stay
/// under ten levels.
pub const MAX_MERGE_DEPTH: usize = 64;

/// User-layer value for `typography.fontFamily` meaning "inherit the
/// default typeface". `default` is a CSS-wide reserved word and can never be
/// a real family name.
pub const FONT_FAMILY_SENTINEL: &str = "default";

/// Merge `user` over `base`.
///
/// A non-object at either top level is read as an empty object, so the
/// result is always an object.
///
/// # Errors
///
/// Returns [`ConfigError::NestingTooDeep`] when the user layer nests past
/// [`MAX_MERGE_DEPTH`].
pub fn merge(base: &Value, user: &Value) -> Result<Value, ConfigError> {
    let empty = Value::Object(Map::new());
    let base = if base.is_object() { base } else { &empty };
    let user = if user.is_object() { user } else { &empty };

    let mut path = Vec::new();
    merge_value(Some(base), user, &mut path)
}

fn merge_value(base: Option<&Value>, user: &Value, path: &mut Vec<String>) -> Result<Value, ConfigError> {
    if path.len() > MAX_MERGE_DEPTH {
        return Err(ConfigError::NestingTooDeep {
            path: path.join("."),
            limit: MAX_MERGE_DEPTH,
        });
    }

    let Value::Object(user_map) = user else {
        return Ok(user.clone());
    };

    let mut merged = match base {
        Some(Value::Object(base_map)) => base_map.clone(),
        _ => Map::new(),
    };

    for (key, user_value) in user_map {
        path.push(key.clone());
        let value = if is_font_family_sentinel(path, user_value) {
            Value::Null
        } else {
            merge_value(merged.get(key), user_value, path)?
        };
        let _ = path.pop();
        let _ = merged.insert(key.clone(), value);
    }

    Ok(Value::Object(merged))
}

fn is_font_family_sentinel(path: &[String], value: &Value) -> bool {
    let [.., parent, field] = path else {
        return false;
    };
    parent == "typography" && field == "fontFamily" && value.as_str() == Some(FONT_FAMILY_SENTINEL)
}

/// Parse a configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for invalid JSON.
pub fn load_config(json: &str) -> Result<Value, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Whether two configurations would compile to the same output.
///
/// Only `styles` and `settings` take part; metadata such as a title or
/// version number does not.
#[must_use]
pub fn are_configs_equal(a: &Value, b: &Value) -> bool {
    ["styles", "settings"]
        .iter()
        .all(|branch| get_path(a, &[branch]) == get_path(b, &[branch]))
}

/// Apply the named entry of `styles.variations` over `styles`.
///
/// The variation's styles are merged like a user layer, then the
/// `variations` map itself is kept so other variations stay addressable.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownVariation`] when no such variation exists,
/// or any error from [`merge`].
pub fn apply_style_variation(tree: &Value, name: &str) -> Result<Value, ConfigError> {
    let Some(variation) = get_path(tree, &["styles", "variations", name]) else {
        return Err(ConfigError::UnknownVariation {
            name: name.to_string(),
        });
    };
    tracing::debug!(variation = name, "applying style variation");

    let styles = get_path(tree, &["styles"]).cloned().unwrap_or(Value::Null);
    let merged_styles = merge(&styles, variation)?;

    let mut result = tree.clone();
    if let Value::Object(map) = &mut result {
        let _ = map.insert("styles".to_string(), merged_styles);
    }
    Ok(result)
}

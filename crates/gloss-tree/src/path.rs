use serde_json::{Map, Value};

/// Look up `path` in `tree`.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not an object, or when the value found is `null`. An explicit `null` in a
/// merged tree means "render nothing", so callers never need to tell it
/// apart from absence.
#[must_use]
pub fn get_path<'a, S: AsRef<str>>(tree: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path {
        current = current.as_object()?.get(segment.as_ref())?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Store `value` at `path`, creating intermediate objects as needed.
///
/// Any non-object met along the way is replaced by an empty object. An
/// empty path replaces the whole tree.
pub fn set_path<S: AsRef<str>>(tree: &mut Value, path: &[S], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *tree = value;
        return;
    };
    if !tree.is_object() {
        *tree = Value::Object(Map::new());
    }
    if let Value::Object(map) = tree {
        let child = map
            .entry(head.as_ref().to_string())
            .or_insert(Value::Null);
        set_path(child, rest, value);
    }
}

/// Truthiness as style authors expect it: `null`, `false`, `0` and `""`
/// are false, every object and array is true.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as CSS text. Objects, arrays and `null` have no CSS form.
#[must_use]
pub fn scalar_to_css(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_path_nested() {
        let tree = json!({ "styles": { "color": { "text": "red" } } });
        assert_eq!(
            get_path(&tree, &["styles", "color", "text"]),
            Some(&json!("red"))
        );
        assert_eq!(get_path(&tree, &["styles", "spacing"]), None);
        assert_eq!(get_path(&tree, &["styles", "color", "text", "deeper"]), None);
    }

    #[test]
    fn test_get_path_treats_null_as_absent() {
        let tree = json!({ "typography": { "fontFamily": null } });
        assert_eq!(get_path(&tree, &["typography", "fontFamily"]), None);
    }

    #[test]
    fn test_get_path_empty_returns_root() {
        let tree = json!({ "a": 1 });
        assert_eq!(get_path::<&str>(&tree, &[]), Some(&tree));
    }

    #[test]
    fn test_set_path_creates_branches() {
        let mut tree = json!({});
        set_path(&mut tree, &["styles", "color", "text"], json!("blue"));
        assert_eq!(tree, json!({ "styles": { "color": { "text": "blue" } } }));
    }

    #[test]
    fn test_set_path_replaces_scalars_on_the_way() {
        let mut tree = json!({ "styles": "oops" });
        set_path(&mut tree, &["styles", "color"], json!("red"));
        assert_eq!(tree, json!({ "styles": { "color": "red" } }));
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_scalar_to_css() {
        assert_eq!(scalar_to_css(&json!("1rem")), Some("1rem".to_string()));
        assert_eq!(scalar_to_css(&json!(1.7)), Some("1.7".to_string()));
        assert_eq!(scalar_to_css(&json!(12)), Some("12".to_string()));
        assert_eq!(scalar_to_css(&json!(null)), None);
        assert_eq!(scalar_to_css(&json!({ "a": 1 })), None);
    }
}

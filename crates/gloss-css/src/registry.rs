//! Selector registry.
//!
//! The host application knows which scopes exist and what CSS each one
//! targets. It hands the compiler that knowledge as JSON keyed by scope
//! identifier:
//!
//! ```json
//! {
//!   "core/group": { "selector": ".wp-block-group", "hasLayoutSupport": true },
//!   "core/image": {
//!     "selector": ".wp-block-image",
//!     "duotoneSelector": ".wp-block-image img",
//!     "featureSelectors": { "border": ".wp-block-image img" }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::selectors::block_style_variation_selector;

/// Selector for a style feature of a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureSelector {
    /// The whole feature targets one selector.
    Shorthand(String),
    /// Per sub-feature selectors. The `root` key, when present, covers the
    /// sub-features not listed.
    Split(IndexMap<String, String>),
}

/// Everything the compiler needs to know about one scope.
///
/// Equality takes feature and variation selector order into account,
/// since it decides rule order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSelectors {
    /// CSS selector of the scope. May be a selector list.
    pub selector: String,
    /// Explicit selectors for elements inside this scope.
    pub element_selectors: BTreeMap<String, String>,
    /// Selector duotone filters apply to, if the scope supports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duotone_selector: Option<String>,
    /// Whether the scope supports layout and gets layout rules.
    pub has_layout_support: bool,
    /// Gap applied when block gap support is off globally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_gap_value: Option<String>,
    /// Selectors for individual style features, applied in this order.
    pub feature_selectors: IndexMap<String, FeatureSelector>,
    /// Selectors for named block style variations.
    pub style_variation_selectors: IndexMap<String, String>,
}

impl PartialEq for BlockSelectors {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
            && self.element_selectors == other.element_selectors
            && self.duotone_selector == other.duotone_selector
            && self.has_layout_support == other.has_layout_support
            && self.fallback_gap_value == other.fallback_gap_value
            && self.feature_selectors.iter().eq(&other.feature_selectors)
            && self.style_variation_selectors.iter().eq(&other.style_variation_selectors)
    }
}

impl Eq for BlockSelectors {}

impl BlockSelectors {
    /// Entry targeting `selector` with no extra capabilities.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    /// Add variation selectors for each named style, derived from this
    /// entry's selector.
    #[must_use]
    pub fn with_style_variations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            let selector = block_style_variation_selector(name, &self.selector);
            let _ = self.style_variation_selectors.insert(name.to_string(), selector);
        }
        self
    }
}

/// All scopes known to the host, keyed by scope identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorRegistry {
    entries: HashMap<String, BlockSelectors>,
}

impl SelectorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry document.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON or entries.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Register or replace a scope.
    pub fn insert(&mut self, scope: impl Into<String>, selectors: BlockSelectors) {
        let _ = self.entries.insert(scope.into(), selectors);
    }

    /// Builder form of [`SelectorRegistry::insert`].
    #[must_use]
    pub fn with(mut self, scope: impl Into<String>, selectors: BlockSelectors) -> Self {
        self.insert(scope, selectors);
        self
    }

    /// Look up a scope.
    #[must_use]
    pub fn get(&self, scope: &str) -> Option<&BlockSelectors> {
        self.entries.get(scope)
    }

    /// Number of registered scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no scope is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Configuration tree model for the gloss styles compiler.
//!
//! A configuration is a JSON document with two top-level branches:
//!
//! - `settings` - preset catalogs partitioned by [`Origin`], free-form
//!   `custom` values, and a `blocks` map with the same shape per scope
//! - `styles` - style values for the root, its `elements`, a `blocks` map
//!   keyed by scope identifier, and named `variations`
//!
//! Trees are plain [`serde_json::Value`]s with insertion order preserved,
//! since enumeration order of blocks is observable in the compiled output.
//!
//! # Scope
//!
//! - Path lookup and update ([`get_path`], [`set_path`])
//! - Layer merging with array replacement and sentinel nulling ([`merge`])
//! - Style variation selection ([`apply_style_variation`])
//! - Structural comparison of configurations ([`are_configs_equal`])

/// Errors raised for configuration input that cannot be merged.
pub mod error;
/// Deep merge of base and user layers.
pub mod merge;
/// Preset provenance tiers.
pub mod origin;
/// Path-based access into a configuration tree.
pub mod path;

pub use error::ConfigError;
pub use merge::{
    FONT_FAMILY_SENTINEL, MAX_MERGE_DEPTH, apply_style_variation, are_configs_equal, load_config,
    merge,
};
pub use origin::{ORIGINS, Origin};
pub use path::{get_path, is_truthy, scalar_to_css, set_path};

/// A configuration tree. Absence is modelled as a missing key.
pub type ConfigTree = serde_json::Value;

//! Global-styles to CSS compiler.
//!
//! Takes a merged configuration tree (see `gloss-tree`) and a
//! [`SelectorRegistry`] describing the host's scopes, and produces a
//! [`CompiledBundle`]: custom property declarations, style rules, utility
//! classes, author CSS and duotone filter data.
//!
//! # Scope
//!
//! This crate implements:
//! - **Presets** ([theme.json § Settings](https://developer.wordpress.org/block-editor/reference-guides/theme-json-reference/theme-json-living/#settings))
//!   - Static metadata for every preset category
//!   - Custom properties and utility classes per origin
//!   - Fluid typography for font sizes
//!
//! - **References**
//!   - `ref:`/`var:` tokens compiled to `var()` calls
//!   - Snapping concrete values back to presets, and resolving references
//!     to values
//!
//! - **Style rules** ([theme.json § Styles](https://developer.wordpress.org/themes/global-settings-and-styles/styles/))
//!   - Node enumeration for the root, elements, scopes and scope elements
//!   - Declaration compilation, feature selectors, style variations,
//!     pseudo selectors and duotone rules
//!   - Layout and block gap rules
//!
//! - **Output**
//!   - Deterministic assembly of the bundle
//!   - Memoization keyed on structurally equal inputs
//!
//! # Not Yet Implemented
//!
//! - Nesting in author CSS beyond one level of `&` rules

/// Duotone color stop parsing.
pub mod color;
/// Memoizing compiler.
pub mod compiler;
/// Custom property emission for presets and custom values.
pub mod custom_properties;
/// Declaration compilation for style subtrees.
pub mod declarations;
/// Semantic elements and their selectors.
pub mod elements;
/// Rule extraction for style categories.
pub mod engine;
/// Duotone filter definitions.
pub mod filters;
/// Layout and block gap rules.
pub mod layout;
/// `&` nesting for per-scope custom CSS.
pub mod nesting;
/// Style and settings node enumeration.
pub mod nodes;
/// Bundle assembly.
pub mod output;
/// Preset metadata registry.
pub mod presets;
/// Style property registry.
pub mod properties;
/// Variable reference compilation and resolution.
pub mod reference;
/// Selector registry supplied by the host.
pub mod registry;
/// Selector list helpers.
pub mod selectors;
/// Case conversion for slugs and keys.
pub mod text;
/// Fluid typography.
pub mod typography;
/// Utility class emission.
pub mod utility;

pub use color::Rgba;
pub use compiler::StylesCompiler;
pub use custom_properties::emit_custom_properties;
pub use declarations::{StyleContext, compile_declarations};
pub use elements::{Element, ROOT_BLOCK_SELECTOR};
pub use filters::{ColorStop, FilterDescriptor, collect_filter_definitions};
pub use layout::{GapSupport, LayoutDefinition, emit_layout_rules};
pub use nodes::{NodeKind, SettingsNode, StyleNode, enumerate, enumerate_settings};
pub use output::{CompileOptions, CompiledBundle, DEFAULT_NAMESPACE, compile};
pub use presets::{PRESET_METADATA, PresetMetadata};
pub use reference::{compile_reference, resolve_preset_reference, resolve_variable_value};
pub use registry::{BlockSelectors, FeatureSelector, SelectorRegistry};
pub use utility::emit_utility_classes;

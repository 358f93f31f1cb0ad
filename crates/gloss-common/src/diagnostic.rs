//! Compile diagnostics.
//!
//! Missing data never aborts a compile. Each stage records what it had to
//! skip or guess here, and the caller decides how to surface it. Entries are
//! deduplicated so a token used by fifty blocks is reported once.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

/// Logging target used when diagnostics are mirrored to `tracing`.
pub const DIAGNOSTICS_TARGET: &str = "gloss::diagnostics";

/// A non-fatal problem found while compiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A variable token names a preset that no settings layer defines.
    ///
    /// The compiled text is still emitted so the output stays inspectable.
    #[error("reference '{token}' does not resolve to a known preset")]
    UnresolvedReference {
        /// The token exactly as written in the style tree.
        token: String,
        /// Scope the token was found in, `None` for the root.
        scope: Option<String>,
    },

    /// Styles or settings target a scope the selector registry does not know.
    ///
    /// The scope's nodes are skipped.
    #[error("scope '{scope}' has styles but no selector registry entry")]
    RegistryMismatch {
        /// The scope identifier.
        scope: String,
    },
}

/// Ordered, deduplicated collection of [`Diagnostic`]s for one compile pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, logging it the first time it is seen.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.seen.insert(diagnostic.clone()) {
            tracing::warn!(target: DIAGNOSTICS_TARGET, "{diagnostic}");
            self.entries.push(diagnostic);
        }
    }

    /// Number of distinct diagnostics recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in first-reported order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Consume the collection, keeping first-reported order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

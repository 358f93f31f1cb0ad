use thiserror::Error;

/// Configuration input that cannot be merged or loaded.
///
/// Shape mismatches are never errors; a non-object where an object is
/// expected is read as an empty branch. Only structurally impossible input
/// ends up here.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A subtree nests deeper than [`crate::MAX_MERGE_DEPTH`].
    ///
    /// Owned trees cannot alias, so a self-referencing document surfaces as
    /// unbounded nesting and is reported as circular.
    #[error("configuration is circular or nested too deeply at '{path}' (limit {limit})")]
    NestingTooDeep {
        /// Dotted path of the branch where the limit was hit.
        path: String,
        /// The depth limit that was exceeded.
        limit: usize,
    },

    /// The document is not valid JSON.
    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A style variation was requested that `styles.variations` lacks.
    #[error("style variation '{name}' is not defined")]
    UnknownVariation {
        /// The requested variation name.
        name: String,
    },
}

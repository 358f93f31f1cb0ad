//! [theme.json § Presets](https://developer.wordpress.org/themes/global-settings-and-styles/settings/)
//!
//! "Preset values can come from three sources: the default values provided
//! by core, the values provided by the theme, and the values provided by
//! the user."

use strum_macros::{AsRefStr, Display, EnumString};

/// Provenance tier of a preset catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Origin {
    /// Bundled with the host application.
    Default,
    /// Supplied by the theme author.
    Theme,
    /// Supplied by the end user.
    Custom,
}

/// Emission order of origins. Every emitter iterates presets in this order,
/// so later origins win when two declarations share a name.
pub const ORIGINS: [Origin; 3] = [Origin::Default, Origin::Theme, Origin::Custom];

impl Origin {
    /// Origins from highest to lowest priority, for lookups where the first
    /// match wins.
    #[must_use]
    pub fn by_priority() -> impl Iterator<Item = Self> {
        ORIGINS.into_iter().rev()
    }

    /// Key of this origin's catalog inside a preset category.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Theme => "theme",
            Self::Custom => "custom",
        }
    }
}

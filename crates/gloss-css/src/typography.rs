//! Fluid typography.
//!
//! [theme.json § Fluid typography](https://developer.wordpress.org/themes/global-settings-and-styles/settings/typography/#fluid-typography)
//!
//! "Fluid typography lets font sizes scale smoothly between a minimum and
//! maximum size depending on the viewport width."
//!
//! A fluid size compiles to
//! `clamp(min, minRem + ((1vw - offset) * factor), max)`. The minimum is
//! derived from the preset size with a logarithmic scale factor unless the
//! preset sets `fluid.min` explicitly.

use gloss_tree::get_path;
use serde_json::Value;

/// Viewport width the fluid scale starts at.
const DEFAULT_MINIMUM_VIEWPORT_WIDTH: &str = "320px";
/// Viewport width the fluid scale ends at.
const DEFAULT_MAXIMUM_VIEWPORT_WIDTH: &str = "1600px";
/// Sizes at or below this never become fluid.
const DEFAULT_MINIMUM_FONT_SIZE_LIMIT: &str = "14px";
/// Bounds of the computed minimum-size factor.
const MINIMUM_FONT_SIZE_FACTOR_MIN: f64 = 0.25;
const MINIMUM_FONT_SIZE_FACTOR_MAX: f64 = 0.75;
/// Pixels per `rem`/`em` for unit coercion.
const ROOT_SIZE_PX: f64 = 16.0;

/// Fluid typography options resolved from settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluidTypography {
    /// Whether fluid sizes are enabled globally.
    pub enabled: bool,
    /// Smallest size a fluid value may shrink to.
    pub min_font_size: Option<String>,
    /// Viewport width where scaling starts.
    pub min_viewport_width: Option<String>,
    /// Viewport width where scaling stops.
    pub max_viewport_width: Option<String>,
}

impl FluidTypography {
    /// Options for preset values, read from the full settings tree.
    ///
    /// When fluid typography is on, `layout.wideSize` becomes the default
    /// maximum viewport width.
    #[must_use]
    pub fn from_settings(settings: &Value) -> Self {
        let mut options = get_path(settings, &["typography"]).map_or_else(Self::default, Self::from_typography_settings);
        if options.enabled && options.max_viewport_width.is_none() {
            options.max_viewport_width = get_path(settings, &["layout", "wideSize"])
                .filter(|wide| value_and_unit(wide, None).is_some())
                .and_then(Value::as_str)
                .map(str::to_string);
        }
        options
    }

    /// Options for declaration values, read from `settings.typography`.
    #[must_use]
    pub fn from_typography_settings(typography: &Value) -> Self {
        let fluid = get_path(typography, &["fluid"]);
        let option = |key: &str| {
            fluid
                .and_then(|f| get_path(f, &[key]))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            enabled: fluid.is_some_and(is_fluid_enabled),
            min_font_size: option("minFontSize"),
            min_viewport_width: option("minViewportWidth"),
            max_viewport_width: option("maxViewportWidth"),
        }
    }
}

/// `true`, or an object with at least one key.
fn is_fluid_enabled(fluid: &Value) -> bool {
    match fluid {
        Value::Bool(b) => *b,
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

/// CSS value for a font size, fluid when enabled.
///
/// `preset_fluid` is the `fluid` member of a preset (`false` opts out, an
/// object may carry explicit `min`/`max`). Sizes that cannot be parsed, or
/// are too small to scale, come back unchanged.
#[must_use]
pub fn font_size_value(size: &Value, preset_fluid: Option<&Value>, options: &FluidTypography) -> Option<String> {
    let raw = gloss_tree::scalar_to_css(size)?;
    if raw.is_empty() || raw == "0" || preset_fluid == Some(&Value::Bool(false)) {
        return Some(raw);
    }
    if !options.enabled && !preset_fluid.is_some_and(is_fluid_enabled) {
        return Some(raw);
    }

    let bound = |key: &str| {
        preset_fluid
            .and_then(|f| get_path(f, &[key]))
            .and_then(gloss_tree::scalar_to_css)
    };
    let fluid = FluidSizeInput {
        minimum_font_size: bound("min"),
        maximum_font_size: bound("max"),
        font_size: Some(raw.clone()),
        minimum_viewport_width: options.min_viewport_width.clone(),
        maximum_viewport_width: options.max_viewport_width.clone(),
        minimum_font_size_limit: options.min_font_size.clone(),
    };
    Some(fluid.compute().unwrap_or(raw))
}

/// Inputs to [`FluidSizeInput::compute`].
#[derive(Debug, Clone, Default)]
pub struct FluidSizeInput {
    /// Explicit lower bound.
    pub minimum_font_size: Option<String>,
    /// Explicit upper bound.
    pub maximum_font_size: Option<String>,
    /// Base size the bounds are derived from when absent.
    pub font_size: Option<String>,
    /// Viewport width where scaling starts.
    pub minimum_viewport_width: Option<String>,
    /// Viewport width where scaling stops.
    pub maximum_viewport_width: Option<String>,
    /// Sizes at or below this are never made fluid.
    pub minimum_font_size_limit: Option<String>,
}

impl FluidSizeInput {
    /// Compute the `clamp()` expression, or `None` when the inputs cannot
    /// produce a scale.
    #[must_use]
    pub fn compute(&self) -> Option<String> {
        let limit = self
            .minimum_font_size_limit
            .as_deref()
            .filter(|l| parse_length(l, None).is_some())
            .unwrap_or(DEFAULT_MINIMUM_FONT_SIZE_LIMIT);

        let mut minimum = self.minimum_font_size.clone();
        let mut maximum = self.maximum_font_size.clone();

        if let Some(font_size) = &self.font_size {
            let (size, unit) = parse_length(font_size, None)?;
            let limit = parse_length(limit, Some(unit.as_str()));

            if let Some((limit_value, _)) = limit {
                if minimum.is_none() && maximum.is_none() && size <= limit_value {
                    return None;
                }
            }
            if maximum.is_none() {
                maximum = Some(format!("{size}{unit}"));
            }
            if minimum.is_none() {
                let size_px = if unit == "px" { size } else { size * ROOT_SIZE_PX };
                let factor = (1.0 - 0.075 * size_px.log2())
                    .clamp(MINIMUM_FONT_SIZE_FACTOR_MIN, MINIMUM_FONT_SIZE_FACTOR_MAX);
                let computed = round3(size * factor);
                minimum = Some(match limit {
                    Some((limit_value, limit_unit)) if computed < limit_value => {
                        format!("{limit_value}{limit_unit}")
                    }
                    _ => format!("{computed}{unit}"),
                });
            }
        }

        let minimum = minimum?;
        let maximum = maximum?;
        let (min_value, min_unit) = parse_length(&minimum, None)?;
        let (max_value, _) = parse_length(&maximum, Some(min_unit.as_str()))?;
        let (min_rem, rem_unit) = parse_length(&minimum, Some("rem"))?;

        let max_viewport = self
            .maximum_viewport_width
            .as_deref()
            .unwrap_or(DEFAULT_MAXIMUM_VIEWPORT_WIDTH);
        let min_viewport = self
            .minimum_viewport_width
            .as_deref()
            .unwrap_or(DEFAULT_MINIMUM_VIEWPORT_WIDTH);
        let (max_viewport, _) = parse_length(max_viewport, Some(min_unit.as_str()))?;
        let (min_viewport, _) = parse_length(min_viewport, Some(min_unit.as_str()))?;

        let denominator = max_viewport - min_viewport;
        if denominator.abs() < f64::EPSILON {
            return None;
        }

        let offset = round3(min_viewport / 100.0);
        let mut factor = round3(100.0 * ((max_value - min_value) / denominator));
        if factor.abs() < f64::EPSILON {
            factor = 1.0;
        }

        Some(format!(
            "clamp({minimum}, {min_rem}{rem_unit} + ((1vw - {offset}{min_unit}) * {factor}), {maximum})"
        ))
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Split a `px`, `rem` or `em` length into value and unit, optionally
/// coercing to `coerce_to`. Bare numbers are read as pixels.
fn parse_length(raw: &str, coerce_to: Option<&str>) -> Option<(f64, String)> {
    let raw = raw.trim();
    let (number, mut unit) = if let Some(n) = raw.strip_suffix("rem") {
        (n, "rem")
    } else if let Some(n) = raw.strip_suffix("px") {
        (n, "px")
    } else if let Some(n) = raw.strip_suffix("em") {
        (n, "em")
    } else {
        (raw, "px")
    };
    if !is_plain_number(number) {
        return None;
    }
    let mut value: f64 = number.parse().ok()?;

    match (unit, coerce_to) {
        ("em" | "rem", Some("px")) => {
            value *= ROOT_SIZE_PX;
            unit = "px";
        }
        ("px", Some(target @ ("em" | "rem"))) => {
            value /= ROOT_SIZE_PX;
            unit = target;
        }
        ("em" | "rem", Some(target @ ("em" | "rem"))) => unit = target,
        _ => {}
    }
    Some((round3(value), unit.to_string()))
}

fn value_and_unit(value: &Value, coerce_to: Option<&str>) -> Option<(f64, String)> {
    parse_length(&gloss_tree::scalar_to_css(value)?, coerce_to)
}

/// Digits with at most one decimal point and at least one digit after it.
fn is_plain_number(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        Some(fraction) => digits(whole) && !fraction.is_empty() && digits(fraction),
        None => !whole.is_empty() && digits(whole),
    }
}

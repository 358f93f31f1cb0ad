//! Duotone filter definitions.
//!
//! [theme.json § Duotone](https://developer.wordpress.org/block-editor/reference-guides/theme-json-reference/theme-json-living/#color)
//!
//! Duotone presets compile to `url( '#{id}' )` values pointing at filter
//! effects the host has to provide. This module returns the data for
//! those effects; rendering them (as an SVG filter or anything else) is
//! left to the host.

use gloss_tree::get_path;
use serde::Serialize;
use serde_json::Value;

use crate::color::Rgba;
use crate::presets::{FILTER_ORIGINS, metadata_for_infix};
use crate::text::kebab_case;

/// One color of a duotone gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStop {
    /// The color as written in the preset.
    pub color: String,
    /// Parsed channels, `None` for notations that cannot be parsed.
    pub rgba: Option<Rgba>,
}

/// Data for one duotone filter effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    /// Slug of the duotone preset.
    pub preset_slug: String,
    /// Element id the compiled `url()` value points at.
    pub filter_id: String,
    /// Gradient stops in preset order.
    pub color_stops: Vec<ColorStop>,
}

/// Per-channel lookup tables for a component transfer, each value in
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferTables {
    /// Red channel table.
    pub r: Vec<f64>,
    /// Green channel table.
    pub g: Vec<f64>,
    /// Blue channel table.
    pub b: Vec<f64>,
    /// Alpha channel table.
    pub a: Vec<f64>,
}

impl FilterDescriptor {
    /// Transfer tables built from the parseable stops. Stops that failed
    /// to parse are left out.
    #[must_use]
    pub fn transfer_tables(&self) -> TransferTables {
        let stops: Vec<Rgba> = self.color_stops.iter().filter_map(|stop| stop.rgba).collect();
        let table = |channel: fn(&Rgba) -> u8| -> Vec<f64> {
            stops
                .iter()
                .map(|color| f64::from(channel(color)) / 255.0)
                .collect()
        };
        TransferTables {
            r: table(|c: &Rgba| c.r),
            g: table(|c: &Rgba| c.g),
            b: table(|c: &Rgba| c.b),
            a: table(|c: &Rgba| c.a),
        }
    }
}

/// Filter descriptors for the duotone presets of `merged_settings`.
///
/// Root presets come first, then each scope's in input order. Only the
/// default and theme origins are collected; custom duotone is rendered
/// inline where it is used.
#[must_use]
pub fn collect_filter_definitions(merged_settings: &Value, namespace: &str) -> Vec<FilterDescriptor> {
    let mut sources = vec![merged_settings];
    if let Some(blocks) = get_path(merged_settings, &["blocks"]).and_then(Value::as_object) {
        sources.extend(blocks.values());
    }
    sources
        .into_iter()
        .flat_map(|settings| duotone_filters(settings, namespace))
        .collect()
}

fn duotone_filters(settings: &Value, namespace: &str) -> Vec<FilterDescriptor> {
    let Some(metadata) = metadata_for_infix("duotone") else {
        return Vec::new();
    };
    let mut filters = Vec::new();
    for &origin in FILTER_ORIGINS {
        let Some(items) = metadata.catalog(settings, origin) else {
            continue;
        };
        for item in items {
            let Some(slug) = item.get("slug").and_then(Value::as_str) else {
                continue;
            };
            let color_stops = item
                .get(metadata.value_key)
                .and_then(Value::as_array)
                .map(|colors| {
                    colors
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|color| ColorStop {
                            color: color.to_string(),
                            rgba: Rgba::parse(color),
                        })
                        .collect()
                })
                .unwrap_or_default();
            filters.push(FilterDescriptor {
                preset_slug: slug.to_string(),
                filter_id: format!("{namespace}-duotone-{}", kebab_case(slug)),
                color_stops,
            });
        }
    }
    filters
}

mod anchor;
pub(crate) mod label_placement;
mod placement;
mod rings;
mod text;
pub(crate) mod types;

pub use types::*;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::LayoutConfig;
use crate::ir::{Driver, MapVariant, Maturity, Polarity, SignalSet};
use crate::theme::Theme;

use anchor::text_position;
use placement::{bucket_by_driver, point_on_ring, spread_angles, Arc};
use rings::ring_radius;
use text::measure_label;

const TITLE_FONT_SCALE: f32 = 1.3;
const RING_LABEL_GAP: f32 = 6.0;
const HEMISPHERE_LABEL_GAP: f32 = 26.0;

/// Derive the whole map layout from a signal set.
///
/// Pure and deterministic: the same set, theme, and config always produce
/// the same layout. Nothing is cached here; see [`LayoutCache`] for the
/// call-site memoization wrapper.
pub fn compute_layout(set: &SignalSet, theme: &Theme, config: &LayoutConfig) -> Layout {
    let ring_counts: Vec<(Maturity, usize)> = Maturity::ALL
        .iter()
        .map(|ring| (*ring, set.in_ring(*ring).count()))
        .collect();

    let max_radius = ring_counts
        .iter()
        .map(|(ring, count)| ring_radius(*ring, *count, &config.rings))
        .fold(0.0, f32::max);

    let title = set.title.as_ref().map(|text| {
        let title_theme = Theme {
            font_size: theme.font_size * TITLE_FONT_SCALE,
            ..theme.clone()
        };
        measure_label(text, &title_theme, &config.label)
    });
    let title_height = title
        .as_ref()
        .map(|block| block.height + config.canvas_padding * 0.3)
        .unwrap_or(0.0);

    let center = (
        config.canvas_padding + max_radius,
        title_height + config.canvas_padding + max_radius,
    );

    let mut layout = Layout {
        variant: set.variant,
        center,
        rings: Vec::new(),
        signals: Vec::new(),
        legend: Vec::new(),
        title: None,
        hemisphere_labels: Vec::new(),
        width: 2.0 * (max_radius + config.canvas_padding),
        height: title_height + 2.0 * (max_radius + config.canvas_padding),
    };

    for (ring, count) in &ring_counts {
        let radius = ring_radius(*ring, *count, &config.rings);
        let label = measure_label(ring.label(), theme, &config.label);
        layout.rings.push(RingLayout {
            ring: *ring,
            radius,
            count: *count,
            label_x: center.0,
            label_y: center.1 - radius - RING_LABEL_GAP,
            label,
        });

        let in_ring: Vec<_> = set.in_ring(*ring).collect();
        match set.variant {
            MapVariant::Full => {
                place_scope(&mut layout, &in_ring, radius, Arc::FULL, theme, config);
            }
            MapVariant::Split => {
                for polarity in [Polarity::Opportunity, Polarity::Risk] {
                    let scope: Vec<_> = in_ring
                        .iter()
                        .copied()
                        .filter(|s| s.polarity == polarity)
                        .collect();
                    let arc = Arc::hemisphere(polarity);
                    place_scope(&mut layout, &scope, radius, arc, theme, config);
                }
            }
        }
    }

    layout.title = title.map(|text| TitleLayout {
        x: center.0,
        y: title_height * 0.5,
        text,
    });

    if set.variant == MapVariant::Split {
        for polarity in [Polarity::Opportunity, Polarity::Risk] {
            let label = measure_label(polarity.label(), theme, &config.label);
            let x = match polarity {
                Polarity::Opportunity => center.0 + max_radius * 0.5,
                Polarity::Risk => center.0 - max_radius * 0.5,
            };
            layout.hemisphere_labels.push(HemisphereLabel {
                polarity,
                x,
                y: center.1 - max_radius - HEMISPHERE_LABEL_GAP,
                label,
            });
        }
    }

    build_legend(&mut layout, set, theme, config, max_radius);

    label_placement::resolve_label_collisions(&mut layout, theme, &config.collision);

    layout
}

fn place_scope(
    layout: &mut Layout,
    scope: &[&crate::ir::Signal],
    radius: f32,
    arc: Arc,
    theme: &Theme,
    config: &LayoutConfig,
) {
    let ordered = bucket_by_driver(scope);
    let angles = spread_angles(ordered.len(), arc);
    for (signal, angle) in ordered.into_iter().zip(angles) {
        let (x, y) = point_on_ring(layout.center, radius, angle);
        let placement = text_position((x, y), layout.center, &signal.name, theme, &config.label);
        layout.signals.push(SignalLayout {
            id: signal.id.clone(),
            ring: signal.maturity,
            driver: signal.driver,
            polarity: signal.polarity,
            x,
            y,
            angle,
            text_x: placement.x,
            text_y: placement.y,
            anchor: placement.anchor,
            label: placement.block,
            color: theme.driver_color(signal.driver).to_string(),
        });
    }
}

/// One legend row per driver present in the set, in bucket order, stacked
/// to the right of the map.
fn build_legend(
    layout: &mut Layout,
    set: &SignalSet,
    theme: &Theme,
    config: &LayoutConfig,
    max_radius: f32,
) {
    let present: Vec<Driver> = Driver::ORDER
        .into_iter()
        .filter(|driver| set.signals.iter().any(|s| s.driver == *driver))
        .collect();
    if present.is_empty() {
        return;
    }

    let row_height = config.legend_marker_size + config.legend_spacing;
    let legend_x = layout.center.0 + max_radius + config.canvas_padding * 0.6;
    let legend_top = layout.center.1 - row_height * present.len() as f32 / 2.0;

    let mut widest: f32 = 0.0;
    for (idx, driver) in present.into_iter().enumerate() {
        let label = measure_label(driver.label(), theme, &config.label);
        widest = widest.max(label.width);
        layout.legend.push(LegendItem {
            driver,
            color: theme.driver_color(driver).to_string(),
            x: legend_x,
            y: legend_top + idx as f32 * row_height,
            label,
        });
    }

    let legend_right = legend_x
        + config.legend_marker_size
        + config.legend_spacing
        + widest
        + config.canvas_padding * 0.4;
    layout.width = layout.width.max(legend_right);
}

/// Call-site memoization for the pure layout derivation: the layout is
/// recomputed only when the signal set or the parameters change.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<u64>,
    cached: Option<Layout>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout_for(&mut self, set: &SignalSet, theme: &Theme, config: &LayoutConfig) -> &Layout {
        let key = fingerprint(set, theme, config);
        if self.key != Some(key) {
            self.cached = None;
            self.key = Some(key);
        }
        self.cached
            .get_or_insert_with(|| compute_layout(set, theme, config))
    }
}

fn fingerprint(set: &SignalSet, theme: &Theme, config: &LayoutConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    set.variant.hash(&mut hasher);
    set.title.hash(&mut hasher);
    for signal in &set.signals {
        signal.id.hash(&mut hasher);
        signal.name.hash(&mut hasher);
        signal.maturity.hash(&mut hasher);
        signal.driver.hash(&mut hasher);
        signal.polarity.hash(&mut hasher);
    }
    // Themes and configs are plain data; their serialized form is a
    // stable identity for cache purposes.
    serde_json::to_string(theme).unwrap_or_default().hash(&mut hasher);
    serde_json::to_string(config).unwrap_or_default().hash(&mut hasher);
    hasher.finish()
}

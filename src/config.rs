use crate::ir::Maturity;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ring radius sizing (base radius per ring, density growth, ceiling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingSizingConfig {
    /// Base radius of the innermost ring.
    pub inner_radius: f32,
    /// Nominal gap between consecutive ring bands.
    pub ring_gap: f32,
    /// Signal count above which a ring starts to widen.
    pub crowding_threshold: usize,
    /// Radius added per signal beyond the threshold.
    pub growth_per_signal: f32,
    /// Ceiling on the density growth for one ring.
    pub max_growth: f32,
}

impl Default for RingSizingConfig {
    fn default() -> Self {
        Self {
            inner_radius: 90.0,
            ring_gap: 70.0,
            crowding_threshold: 8,
            growth_per_signal: 4.0,
            max_growth: 42.0,
        }
    }
}

impl RingSizingConfig {
    /// Nominal radius of a ring before density growth.
    pub fn base_radius(&self, ring: Maturity) -> f32 {
        let index = Maturity::ALL
            .iter()
            .position(|r| *r == ring)
            .unwrap_or(Maturity::ALL.len() - 1);
        self.inner_radius + index as f32 * self.ring_gap
    }
}

/// Label geometry around a positioned dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Push-out distance from the dot along the center ray.
    pub offset: f32,
    pub line_height: f32,
    /// Half-angle (radians) of the top/bottom sectors that anchor
    /// `middle` and may wrap to two lines.
    pub vertical_sector: f32,
    /// Labels longer than this (chars) wrap in the vertical sectors.
    pub split_threshold_chars: usize,
    /// Skip font queries and use the per-char heuristic only.
    pub fast_text_metrics: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            offset: 14.0,
            line_height: 1.35,
            vertical_sector: std::f32::consts::PI / 5.0,
            split_threshold_chars: 14,
            fast_text_metrics: true,
        }
    }
}

/// Single-pass label collision mitigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Padding margin added around each estimated label box.
    pub padding: f32,
    /// Hard cap on total displacement for one label, in pixels at the
    /// reference font size; scaled by `font_size / 13`.
    pub max_nudge: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            padding: 2.0,
            max_nudge: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub rings: RingSizingConfig,
    pub label: LabelConfig,
    pub collision: CollisionConfig,
    /// Dot radius for signal markers.
    pub marker_radius: f32,
    /// Padding between the outermost ring and the canvas edge.
    pub canvas_padding: f32,
    pub legend_marker_size: f32,
    pub legend_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rings: RingSizingConfig::default(),
            label: LabelConfig::default(),
            collision: CollisionConfig::default(),
            marker_radius: 5.0,
            canvas_padding: 90.0,
            legend_marker_size: 11.0,
            legend_spacing: 6.0,
        }
    }
}

/// Zoom/pan gesture handling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Discrete levels continuous zoom snaps to after a gesture ends.
    pub zoom_levels: Vec<f32>,
    /// Multiplicative zoom factor per wheel notch.
    pub wheel_step: f32,
    /// Maximum pan magnitude per axis.
    pub max_pan: f32,
    /// Pointer travel below this is still a click.
    pub click_slop: f32,
    /// Single- vs double-click disambiguation window, ms.
    pub click_delay_ms: u64,
    /// Delay after the last continuous zoom change before snapping, ms.
    pub snap_delay_ms: u64,
    /// Zoom factor applied by double-click.
    pub double_click_zoom: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_levels: vec![0.5, 0.75, 1.0, 1.5, 2.0, 3.0],
            wheel_step: 1.1,
            max_pan: 1200.0,
            click_slop: 4.0,
            click_delay_ms: 250,
            snap_delay_ms: 180,
            double_click_zoom: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 900.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::light();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            render,
        }
    }
}

/// On-disk config overlay. Every field is optional; present values
/// override the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    inner_radius: Option<f32>,
    ring_gap: Option<f32>,
    crowding_threshold: Option<usize>,
    growth_per_signal: Option<f32>,
    max_growth: Option<f32>,
    label_offset: Option<f32>,
    marker_radius: Option<f32>,
    fast_text_metrics: Option<bool>,
    min_zoom: Option<f32>,
    max_zoom: Option<f32>,
    zoom_levels: Option<Vec<f32>>,
    max_pan: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    driver_colors: Option<DriverColorOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriverColorOverrides {
    social: Option<String>,
    technological: Option<String>,
    economic: Option<String>,
    environmental: Option<String>,
    political: Option<String>,
    unclassified: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
            config.render.background = config.theme.background.clone();
        } else if theme_name == "light" || theme_name == "default" {
            config.theme = Theme::light();
            config.render.background = config.theme.background.clone();
        }
    }

    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.font_size {
        config.theme.font_size = v;
    }
    if let Some(v) = parsed.background {
        config.theme.background = v.clone();
        config.render.background = v;
    }
    if let Some(v) = parsed.inner_radius {
        config.layout.rings.inner_radius = v;
    }
    if let Some(v) = parsed.ring_gap {
        config.layout.rings.ring_gap = v;
    }
    if let Some(v) = parsed.crowding_threshold {
        config.layout.rings.crowding_threshold = v;
    }
    if let Some(v) = parsed.growth_per_signal {
        config.layout.rings.growth_per_signal = v;
    }
    if let Some(v) = parsed.max_growth {
        config.layout.rings.max_growth = v;
    }
    if let Some(v) = parsed.label_offset {
        config.layout.label.offset = v;
    }
    if let Some(v) = parsed.marker_radius {
        config.layout.marker_radius = v;
    }
    if let Some(v) = parsed.fast_text_metrics {
        config.layout.label.fast_text_metrics = v;
    }
    if let Some(v) = parsed.min_zoom {
        config.viewport.min_zoom = v;
    }
    if let Some(v) = parsed.max_zoom {
        config.viewport.max_zoom = v;
    }
    if let Some(v) = parsed.zoom_levels {
        if !v.is_empty() {
            config.viewport.zoom_levels = v;
        }
    }
    if let Some(v) = parsed.max_pan {
        config.viewport.max_pan = v;
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }
    if let Some(colors) = parsed.driver_colors {
        let table = &mut config.theme.driver_colors;
        if let Some(v) = colors.social {
            table.social = v;
        }
        if let Some(v) = colors.technological {
            table.technological = v;
        }
        if let Some(v) = colors.economic {
            table.economic = v;
        }
        if let Some(v) = colors.environmental {
            table.environmental = v;
        }
        if let Some(v) = colors.political {
            table.political = v;
        }
        if let Some(v) = colors.unclassified {
            table.unclassified = v;
        }
    }

    Ok(config)
}

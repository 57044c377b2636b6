use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::MapVariant;
use crate::layout::{Layout, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const RING_LABEL_FONT_SCALE: f32 = 0.85;
const TITLE_FONT_SCALE: f32 = 1.3;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    render_svg_with_view(layout, theme, config, 1.0, (0.0, 0.0))
}

/// Render under a view transform supplied by the gesture state machine:
/// map content pans then scales, the background stays put.
pub fn render_svg_with_view(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    zoom: f32,
    pan: (f32, f32),
) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);
    let (cx, cy) = layout.center;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<g transform=\"translate({:.2} {:.2}) scale({zoom})\">",
        pan.0, pan.1
    ));

    // Guide circles, outer first so inner strokes stay on top.
    for ring in layout.rings.iter().rev() {
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.2\"/>",
            ring.radius, theme.ring_stroke
        ));
    }
    for ring in &layout.rings {
        svg.push_str(&text_svg(
            ring.label_x,
            ring.label_y,
            &ring.label,
            "middle",
            &theme.ring_label_color,
            theme.font_size * RING_LABEL_FONT_SCALE,
            theme,
            config,
        ));
    }

    if layout.variant == MapVariant::Split {
        let outer = layout.rings.iter().map(|r| r.radius).fold(0.0, f32::max);
        if outer > 0.0 {
            svg.push_str(&format!(
                "<line x1=\"{cx:.2}\" y1=\"{:.2}\" x2=\"{cx:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1.0\" stroke-dasharray=\"6 4\"/>",
                cy - outer,
                cy + outer,
                theme.divider_color
            ));
        }
        for hemisphere in &layout.hemisphere_labels {
            svg.push_str(&text_svg(
                hemisphere.x,
                hemisphere.y,
                &hemisphere.label,
                "middle",
                &theme.ring_label_color,
                theme.font_size,
                theme,
                config,
            ));
        }
    }

    for signal in &layout.signals {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            signal.x, signal.y, config.marker_radius, signal.color
        ));
        svg.push_str(&text_svg(
            signal.text_x,
            signal.text_y,
            &signal.label,
            signal.anchor.as_svg(),
            &theme.label_color,
            theme.font_size,
            theme,
            config,
        ));
    }

    for item in &layout.legend {
        let size = config.legend_marker_size;
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{size:.2}\" height=\"{size:.2}\" rx=\"2\" fill=\"{}\"/>",
            item.x,
            item.y - size / 2.0,
            item.color
        ));
        svg.push_str(&text_svg(
            item.x + size + config.legend_spacing,
            item.y,
            &item.label,
            "start",
            &theme.label_color,
            theme.font_size,
            theme,
            config,
        ));
    }

    if let Some(title) = &layout.title {
        svg.push_str(&text_svg(
            title.x,
            title.y,
            &title.text,
            "middle",
            &theme.title_color,
            theme.font_size * TITLE_FONT_SCALE,
            theme,
            config,
        ));
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

#[allow(clippy::too_many_arguments)]
fn text_svg(
    x: f32,
    y: f32,
    block: &TextBlock,
    anchor: &str,
    fill: &str,
    font_size: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let line_height = font_size * config.label.line_height;
    let total_height = block.lines.len() as f32 * line_height;
    // Vertically center the block on y; the first baseline sits a bit
    // below the block top.
    let start_y = y - total_height / 2.0 + font_size * 0.85;

    let mut text = format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\">",
        theme.font_family
    );
    for (idx, line) in block.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

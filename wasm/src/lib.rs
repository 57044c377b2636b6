use serde::Deserialize;
use signal_radar::ir::MapVariant;
use signal_radar::{compute_layout, parse_signals, render_svg_with_view, LayoutConfig, Theme};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    variant: Option<String>,
    zoom: Option<f32>,
    pan_x: Option<f32>,
    pan_y: Option<f32>,
}

fn build_theme(options: &RadarRenderOptions) -> Theme {
    let mut theme = if options.theme.as_deref() == Some("dark") {
        Theme::dark()
    } else {
        Theme::light()
    };
    if let Some(font_family) = &options.font_family {
        theme.font_family = font_family.clone();
    }
    if let Some(font_size) = options.font_size {
        theme.font_size = font_size;
    }
    theme
}

#[wasm_bindgen]
pub fn layout_signals_svg(document: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw) = options_json {
        serde_json::from_str::<RadarRenderOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        RadarRenderOptions::default()
    };

    let mut set =
        parse_signals(document).map_err(|error| JsValue::from_str(&error.to_string()))?;
    if let Some(token) = options.variant.as_deref() {
        set.variant = MapVariant::from_token(token)
            .ok_or_else(|| JsValue::from_str(&format!("unknown variant `{token}`")))?;
    }

    let theme = build_theme(&options);
    // Browser embeddings have no font database; stick to the heuristic
    // metrics for deterministic output.
    let mut config = LayoutConfig::default();
    config.label.fast_text_metrics = true;

    let layout = compute_layout(&set, &theme, &config);
    let zoom = options.zoom.unwrap_or(1.0);
    let pan = (options.pan_x.unwrap_or(0.0), options.pan_y.unwrap_or(0.0));
    Ok(render_svg_with_view(&layout, &theme, &config, zoom, pan))
}

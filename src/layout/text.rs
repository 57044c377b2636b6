use crate::config::LabelConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

/// Measure a single-line label. Wrapping decisions belong to the anchor
/// pass, which knows where on the map the label sits.
pub(super) fn measure_label(text: &str, theme: &Theme, config: &LabelConfig) -> TextBlock {
    measure_block(vec![text.trim().to_string()], theme, config)
}

/// Measure an already-split set of lines.
pub(super) fn measure_block(lines: Vec<String>, theme: &Theme, config: &LabelConfig) -> TextBlock {
    let mut lines = lines;
    if lines.is_empty() {
        lines.push(String::new());
    }
    let width = lines
        .iter()
        .map(|line| text_width(line, theme, config))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * theme.font_size * config.line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}

/// Split a multi-word label into two lines with roughly balanced width.
/// Single-word labels come back unchanged.
pub(super) fn split_balanced(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return vec![text.trim().to_string()];
    }

    let mut best_break = 1;
    let mut best_diff = f32::MAX;
    for brk in 1..words.len() {
        let first: usize = words[..brk].iter().map(|w| w.chars().count() + 1).sum();
        let second: usize = words[brk..].iter().map(|w| w.chars().count() + 1).sum();
        let diff = (first as f32 - second as f32).abs();
        if diff < best_diff {
            best_diff = diff;
            best_break = brk;
        }
    }

    vec![words[..best_break].join(" "), words[best_break..].join(" ")]
}

pub(super) fn text_width(text: &str, theme: &Theme, config: &LabelConfig) -> f32 {
    if config.fast_text_metrics && text.is_ascii() {
        return heuristic_width(text, theme.font_size);
    }
    text_metrics::measure_text_width(text, theme.font_size, theme.font_family.as_str())
        .unwrap_or_else(|| heuristic_width(text, theme.font_size))
}

fn heuristic_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Coarse per-character width classes, as a fraction of the font size.
/// Close enough for bounding-box estimation when no font face is
/// available.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.30,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.26,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' => 0.90,
        'A'..='Z' | '0'..='9' => 0.64,
        _ => 0.56,
    }
}

//! Label anchor placement: push the label outward from its dot along the
//! center ray and pick the anchor side that makes text read away from the
//! map instead of across it.

use std::f32::consts::FRAC_PI_2;

use crate::config::LabelConfig;
use crate::theme::Theme;

use super::text::{measure_block, measure_label, split_balanced};
use super::{TextAnchor, TextBlock};

#[derive(Debug, Clone)]
pub(super) struct TextPlacement {
    pub x: f32,
    pub y: f32,
    pub anchor: TextAnchor,
    pub block: TextBlock,
}

/// Geometry-only label placement for one positioned dot. Collision
/// handling happens later, over all placements at once.
pub(super) fn text_position(
    point: (f32, f32),
    center: (f32, f32),
    name: &str,
    theme: &Theme,
    config: &LabelConfig,
) -> TextPlacement {
    let dx = point.0 - center.0;
    let dy = point.1 - center.1;
    let dist = (dx * dx + dy * dy).sqrt();

    // Dot at the exact center: hang the label below it.
    let (ux, uy) = if dist > f32::EPSILON {
        (dx / dist, dy / dist)
    } else {
        (0.0, 1.0)
    };

    let x = point.0 + ux * config.offset;
    let y = point.1 + uy * config.offset;

    let anchor = anchor_for(dx, dy, config.vertical_sector);
    let block = if anchor == TextAnchor::Middle && name.chars().count() > config.split_threshold_chars
    {
        // Cramped top/bottom region: wrap long names onto two balanced
        // lines. Side labels keep one line; there is horizontal room.
        measure_block(split_balanced(name), theme, config)
    } else {
        measure_label(name, theme, config)
    };

    TextPlacement { x, y, anchor, block }
}

/// Anchor side from the dot's direction off center. Within the vertical
/// sectors around straight up/down the text centers on the point;
/// otherwise it extends away from the map.
fn anchor_for(dx: f32, dy: f32, vertical_sector: f32) -> TextAnchor {
    let angle = dy.atan2(dx);
    let off_vertical = (angle.abs() - FRAC_PI_2).abs();
    if off_vertical <= vertical_sector {
        TextAnchor::Middle
    } else if dx < 0.0 {
        TextAnchor::End
    } else {
        TextAnchor::Start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;

    fn config() -> LabelConfig {
        LabelConfig::default()
    }

    #[test]
    fn right_side_anchors_start() {
        let placement = text_position((300.0, 200.0), (200.0, 200.0), "AI", &Theme::light(), &config());
        assert_eq!(placement.anchor, TextAnchor::Start);
        assert!(placement.x > 300.0, "label should push outward to the right");
    }

    #[test]
    fn left_side_anchors_end() {
        let placement = text_position((100.0, 200.0), (200.0, 200.0), "AI", &Theme::light(), &config());
        assert_eq!(placement.anchor, TextAnchor::End);
        assert!(placement.x < 100.0);
    }

    #[test]
    fn top_anchors_middle() {
        let placement = text_position((200.0, 80.0), (200.0, 200.0), "AI", &Theme::light(), &config());
        assert_eq!(placement.anchor, TextAnchor::Middle);
        assert!(placement.y < 80.0, "label should push further up");
    }

    #[test]
    fn long_vertical_labels_wrap_to_two_lines() {
        let placement = text_position(
            (200.0, 80.0),
            (200.0, 200.0),
            "Distributed energy storage markets",
            &Theme::light(),
            &config(),
        );
        assert_eq!(placement.block.lines.len(), 2);
    }

    #[test]
    fn long_side_labels_stay_single_line() {
        let placement = text_position(
            (340.0, 200.0),
            (200.0, 200.0),
            "Distributed energy storage markets",
            &Theme::light(),
            &config(),
        );
        assert_eq!(placement.block.lines.len(), 1);
    }

    #[test]
    fn center_dot_hangs_below() {
        let placement = text_position((200.0, 200.0), (200.0, 200.0), "X", &Theme::light(), &config());
        assert!(placement.y > 200.0);
        assert!(placement.y.is_finite() && placement.x.is_finite());
    }
}

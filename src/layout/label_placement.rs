//! Label collision mitigation.
//!
//! The angular pass guarantees the dots never share an angle, but label
//! text has width, and two-line wrapping near the vertical extremes gives
//! it height. This pass estimates each label's box and nudges the later
//! label of an overlapping pair vertically, away from the map's vertical
//! center, by a small bounded amount. One forward sweep over all pairs;
//! residual overlap in dense clusters is accepted.

use crate::config::CollisionConfig;
use crate::theme::Theme;

use super::{Layout, SignalLayout, TextAnchor};

/// Reference font size the nudge cap is calibrated against.
const CAP_REFERENCE_FONT_SIZE: f32 = 13.0;

pub(super) fn resolve_label_collisions(
    layout: &mut Layout,
    theme: &Theme,
    config: &CollisionConfig,
) {
    let center_y = layout.center.1;
    let cap = config.max_nudge * (theme.font_size / CAP_REFERENCE_FONT_SIZE).max(0.1);
    let count = layout.signals.len();

    let mut displacement = vec![0.0f32; count];
    for i in 0..count {
        for j in (i + 1)..count {
            let a = padded_box(&layout.signals[i], displacement[i], config.padding);
            let b = padded_box(&layout.signals[j], displacement[j], config.padding);
            if !overlaps(a, b) {
                continue;
            }
            // Move the later label just far enough to clear the padded
            // boxes, outward, never toward the center band.
            let depth = a.3.min(b.3) - a.1.max(b.1);
            let direction = if layout.signals[j].text_y + displacement[j] >= center_y {
                1.0
            } else {
                -1.0
            };
            let next = displacement[j] + direction * depth;
            displacement[j] = next.clamp(-cap, cap);
        }
    }

    for (signal, dy) in layout.signals.iter_mut().zip(displacement) {
        signal.text_y += dy;
    }
}

type Aabb = (f32, f32, f32, f32); // min_x, min_y, max_x, max_y

/// Estimated label bounds. Horizontal extent depends on the anchor side;
/// the block is vertically centered on its anchor point.
fn padded_box(signal: &SignalLayout, dy: f32, padding: f32) -> Aabb {
    let width = signal.label.width;
    let height = signal.label.height;
    let (min_x, max_x) = match signal.anchor {
        TextAnchor::Start => (signal.text_x, signal.text_x + width),
        TextAnchor::End => (signal.text_x - width, signal.text_x),
        TextAnchor::Middle => (signal.text_x - width / 2.0, signal.text_x + width / 2.0),
    };
    let y = signal.text_y + dy;
    (
        min_x - padding,
        y - height / 2.0 - padding,
        max_x + padding,
        y + height / 2.0 + padding,
    )
}

fn overlaps(a: Aabb, b: Aabb) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CollisionConfig, LayoutConfig};
    use crate::ir::{Driver, MapVariant, Maturity, Polarity};
    use crate::layout::TextBlock;

    fn label_at(id: &str, x: f32, y: f32, width: f32, height: f32) -> SignalLayout {
        SignalLayout {
            id: id.to_string(),
            ring: Maturity::Established,
            driver: Driver::Social,
            polarity: Polarity::Opportunity,
            x,
            y,
            angle: 0.0,
            text_x: x,
            text_y: y,
            anchor: TextAnchor::Start,
            label: TextBlock {
                lines: vec![id.to_string()],
                width,
                height,
            },
            color: "#6366f1".to_string(),
        }
    }

    fn layout_with(signals: Vec<SignalLayout>) -> Layout {
        Layout {
            variant: MapVariant::Full,
            center: (200.0, 200.0),
            rings: Vec::new(),
            signals,
            legend: Vec::new(),
            title: None,
            hemisphere_labels: Vec::new(),
            width: 400.0,
            height: 400.0,
        }
    }

    #[test]
    fn overlapping_pair_pushes_the_second_label_outward() {
        let mut layout = layout_with(vec![
            label_at("first", 250.0, 250.0, 80.0, 16.0),
            label_at("second", 255.0, 254.0, 80.0, 16.0),
        ]);
        let before = layout.signals[1].text_y;
        resolve_label_collisions(&mut layout, &Theme::light(), &CollisionConfig::default());
        let after = layout.signals[1].text_y;
        assert!(after > before, "below-center label should move down");
        assert_eq!(layout.signals[0].text_y, 250.0, "first label stays put");
    }

    #[test]
    fn above_center_labels_move_up() {
        let mut layout = layout_with(vec![
            label_at("first", 250.0, 120.0, 80.0, 16.0),
            label_at("second", 255.0, 124.0, 80.0, 16.0),
        ]);
        resolve_label_collisions(&mut layout, &Theme::light(), &CollisionConfig::default());
        assert!(layout.signals[1].text_y < 124.0);
    }

    #[test]
    fn displacement_never_exceeds_the_cap() {
        let config = CollisionConfig::default();
        // A pile of labels on the same spot keeps colliding; the cap must
        // still hold for every one of them.
        let signals: Vec<SignalLayout> = (0..12)
            .map(|i| label_at(&format!("s{i}"), 250.0, 250.0, 120.0, 18.0))
            .collect();
        let original: Vec<f32> = signals.iter().map(|s| s.text_y).collect();
        let mut layout = layout_with(signals);
        let theme = Theme::light();
        resolve_label_collisions(&mut layout, &theme, &config);
        let cap = config.max_nudge * (theme.font_size / CAP_REFERENCE_FONT_SIZE);
        for (signal, before) in layout.signals.iter().zip(original) {
            assert!(
                (signal.text_y - before).abs() <= cap + 1e-4,
                "{} displaced {}px, cap {}",
                signal.id,
                (signal.text_y - before).abs(),
                cap
            );
        }
    }

    #[test]
    fn nudge_moves_no_further_than_needed() {
        let config = CollisionConfig::default();
        // Padded boxes overlap by 2px vertically, well under the 8px cap.
        let mut layout = layout_with(vec![
            label_at("first", 250.0, 250.0, 80.0, 16.0),
            label_at("second", 255.0, 268.0, 80.0, 16.0),
        ]);
        resolve_label_collisions(&mut layout, &Theme::light(), &config);
        assert!((layout.signals[1].text_y - 270.0).abs() < 1e-4);
    }

    #[test]
    fn disjoint_labels_are_untouched() {
        let mut layout = layout_with(vec![
            label_at("a", 100.0, 100.0, 40.0, 16.0),
            label_at("b", 300.0, 300.0, 40.0, 16.0),
        ]);
        resolve_label_collisions(&mut layout, &Theme::light(), &CollisionConfig::default());
        assert_eq!(layout.signals[0].text_y, 100.0);
        assert_eq!(layout.signals[1].text_y, 300.0);
    }

    #[test]
    fn anchor_side_shapes_the_estimated_box() {
        let mut end_anchored = label_at("a", 100.0, 100.0, 60.0, 16.0);
        end_anchored.anchor = TextAnchor::End;
        let bbox = padded_box(&end_anchored, 0.0, 0.0);
        assert_eq!(bbox.0, 40.0);
        assert_eq!(bbox.2, 100.0);
    }

    #[test]
    fn collision_pass_runs_inside_compute_layout() {
        // Smoke check wiring via the public pipeline: dense same-ring set.
        use crate::ir::{Signal, SignalSet};
        let mut set = SignalSet::new(MapVariant::Full);
        for i in 0..14 {
            set.signals.push(Signal {
                id: format!("s{i}"),
                name: format!("Signal number {i}"),
                maturity: Maturity::Emerging,
                driver: Driver::Technological,
                polarity: Polarity::Opportunity,
            });
        }
        let layout = crate::layout::compute_layout(
            &set,
            &Theme::light(),
            &LayoutConfig::default(),
        );
        assert_eq!(layout.signals.len(), 14);
    }
}

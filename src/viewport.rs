//! Zoom/pan/gesture state machine for the interactive map view.
//!
//! Strictly sequential: one logical pointer owns drag state, and pinch
//! state exists only while exactly two touch points are down. Time comes
//! from the caller as milliseconds; deferred work (click disambiguation,
//! zoom snapping) is held in single `Option` deadlines that each new
//! event replaces, so at most one of each is ever pending. `tick` fires
//! whatever has expired.

use crate::config::ViewportConfig;

/// Current gesture, as observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Panning,
    Pinching,
}

/// What an interaction asks the embedding view to do. Data out, no
/// callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportAction {
    None,
    /// A single click on empty space survived the double-click window.
    Deselect,
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Idle,
    Panning {
        origin: (f32, f32),
        last: (f32, f32),
        moved: bool,
        on_background: bool,
    },
    Pinching {
        last_distance: f32,
        last_center: (f32, f32),
    },
}

#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    zoom: f32,
    pan: (f32, f32),
    gesture: Gesture,
    /// Deadline (ms) after which a held single click commits.
    pending_click: Option<u64>,
    /// Deadline (ms) after which continuous zoom snaps to a level.
    pending_snap: Option<u64>,
    /// Anchor the next snap preserves on screen.
    snap_anchor: (f32, f32),
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            zoom: 1.0,
            pan: (0.0, 0.0),
            gesture: Gesture::Idle,
            pending_click: None,
            pending_snap: None,
            snap_anchor: (0.0, 0.0),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    pub fn gesture(&self) -> GestureState {
        match self.gesture {
            Gesture::Idle => GestureState::Idle,
            Gesture::Panning { .. } => GestureState::Panning,
            Gesture::Pinching { .. } => GestureState::Pinching,
        }
    }

    /// Screen point -> map coordinates under the current transform.
    pub fn to_map(&self, screen: (f32, f32)) -> (f32, f32) {
        (
            (screen.0 - self.pan.0) / self.zoom,
            (screen.1 - self.pan.1) / self.zoom,
        )
    }

    /// Nearest configured zoom level. Idempotent: every level maps to
    /// itself.
    pub fn snap_to_level(&self, zoom: f32) -> f32 {
        let clamped = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.config
            .zoom_levels
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - clamped)
                    .abs()
                    .partial_cmp(&(b - clamped).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(clamped)
    }

    pub fn pointer_down(&mut self, pos: (f32, f32), on_background: bool) -> ViewportAction {
        // A fresh press supersedes any held click.
        self.pending_click = None;
        self.gesture = Gesture::Panning {
            origin: pos,
            last: pos,
            moved: false,
            on_background,
        };
        ViewportAction::None
    }

    pub fn pointer_move(&mut self, pos: (f32, f32)) -> ViewportAction {
        if let Gesture::Panning {
            origin,
            last,
            moved,
            on_background,
        } = self.gesture
        {
            let slop = self.config.click_slop;
            let strayed = (pos.0 - origin.0).abs() > slop || (pos.1 - origin.1).abs() > slop;
            self.set_pan((
                self.pan.0 + pos.0 - last.0,
                self.pan.1 + pos.1 - last.1,
            ));
            self.gesture = Gesture::Panning {
                origin,
                last: pos,
                moved: moved || strayed,
                on_background,
            };
        }
        ViewportAction::None
    }

    pub fn pointer_up(&mut self, now: u64) -> ViewportAction {
        if let Gesture::Panning {
            moved,
            on_background,
            ..
        } = self.gesture
        {
            self.gesture = Gesture::Idle;
            if !moved && on_background {
                // Hold the deselect until the double-click window closes.
                self.pending_click = Some(now + self.config.click_delay_ms);
            }
        }
        ViewportAction::None
    }

    pub fn double_click(&mut self, pos: (f32, f32)) -> ViewportAction {
        // The second click undoes the first click's held deselect.
        self.pending_click = None;
        self.pending_snap = None;
        let target = self.snap_to_level(self.zoom * self.config.double_click_zoom);
        self.apply_zoom(target, pos);
        ViewportAction::None
    }

    pub fn wheel(&mut self, notches: f32, cursor: (f32, f32), now: u64) -> ViewportAction {
        let factor = self.config.wheel_step.powf(notches);
        self.apply_zoom(self.zoom * factor, cursor);
        self.pending_snap = Some(now + self.config.snap_delay_ms);
        ViewportAction::None
    }

    pub fn touch_start(&mut self, touches: &[(f32, f32)]) -> ViewportAction {
        self.pending_click = None;
        match touches {
            [] => self.gesture = Gesture::Idle,
            [single] => {
                self.gesture = Gesture::Panning {
                    origin: *single,
                    last: *single,
                    moved: false,
                    on_background: true,
                };
            }
            [a, b, ..] => {
                self.gesture = Gesture::Pinching {
                    last_distance: distance(*a, *b).max(1.0),
                    last_center: midpoint(*a, *b),
                };
            }
        }
        ViewportAction::None
    }

    pub fn touch_move(&mut self, touches: &[(f32, f32)]) -> ViewportAction {
        match (self.gesture, touches) {
            (Gesture::Panning { .. }, [single]) => self.pointer_move(*single),
            (
                Gesture::Pinching {
                    last_distance,
                    last_center,
                },
                [a, b, ..],
            ) => {
                let dist = distance(*a, *b).max(1.0);
                let center = midpoint(*a, *b);
                self.apply_zoom(self.zoom * dist / last_distance, center);
                self.set_pan((
                    self.pan.0 + center.0 - last_center.0,
                    self.pan.1 + center.1 - last_center.1,
                ));
                self.gesture = Gesture::Pinching {
                    last_distance: dist,
                    last_center: center,
                };
                ViewportAction::None
            }
            _ => ViewportAction::None,
        }
    }

    pub fn touch_end(&mut self, remaining: &[(f32, f32)], now: u64) -> ViewportAction {
        let was_pinching = matches!(self.gesture, Gesture::Pinching { .. });
        match remaining {
            [] => self.gesture = Gesture::Idle,
            [single] => {
                self.gesture = Gesture::Panning {
                    origin: *single,
                    last: *single,
                    moved: was_pinching,
                    on_background: true,
                };
            }
            [a, b, ..] => {
                self.gesture = Gesture::Pinching {
                    last_distance: distance(*a, *b).max(1.0),
                    last_center: midpoint(*a, *b),
                };
            }
        }
        if was_pinching {
            self.pending_snap = Some(now + self.config.snap_delay_ms);
        }
        ViewportAction::None
    }

    /// Fire expired deadlines. Call from the embedding event loop.
    pub fn tick(&mut self, now: u64) -> ViewportAction {
        if let Some(deadline) = self.pending_snap {
            if now >= deadline {
                self.pending_snap = None;
                let snapped = self.snap_to_level(self.zoom);
                self.apply_zoom(snapped, self.snap_anchor);
            }
        }
        if let Some(deadline) = self.pending_click {
            if now >= deadline {
                self.pending_click = None;
                return ViewportAction::Deselect;
            }
        }
        ViewportAction::None
    }

    /// Zoom so the map point under `anchor` stays under it.
    fn apply_zoom(&mut self, target: f32, anchor: (f32, f32)) {
        let next = target.clamp(self.config.min_zoom, self.config.max_zoom);
        let ratio = next / self.zoom;
        self.set_pan((
            anchor.0 - (anchor.0 - self.pan.0) * ratio,
            anchor.1 - (anchor.1 - self.pan.1) * ratio,
        ));
        self.zoom = next;
        self.snap_anchor = anchor;
    }

    fn set_pan(&mut self, pan: (f32, f32)) {
        let bound = self.config.max_pan;
        self.pan = (pan.0.clamp(-bound, bound), pan.1.clamp(-bound, bound));
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(ViewportConfig::default())
    }

    #[test]
    fn snap_is_idempotent_across_the_range() {
        let vp = viewport();
        let mut z = vp.config.min_zoom;
        while z <= vp.config.max_zoom {
            let once = vp.snap_to_level(z);
            assert_eq!(vp.snap_to_level(once), once, "snap not idempotent at {z}");
            z += 0.07;
        }
    }

    #[test]
    fn wheel_zoom_snaps_to_nearest_level_after_the_delay() {
        let mut vp = viewport();
        // Five notches of 1.1: continuous zoom lands near 1.61.
        for i in 0..5 {
            vp.wheel(1.0, (400.0, 300.0), 100 + i);
        }
        assert!((vp.zoom() - 1.61).abs() < 0.01);
        vp.tick(104 + vp.config.snap_delay_ms);
        assert_eq!(vp.zoom(), 1.5);
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut vp = viewport();
        vp.wheel(100.0, (0.0, 0.0), 0);
        assert_eq!(vp.zoom(), vp.config.max_zoom);
        vp.wheel(-300.0, (0.0, 0.0), 1);
        assert_eq!(vp.zoom(), vp.config.min_zoom);
    }

    #[test]
    fn zoom_keeps_the_point_under_the_cursor_fixed() {
        let mut vp = viewport();
        vp.pointer_down((10.0, 10.0), true);
        vp.pointer_move((90.0, 50.0));
        vp.pointer_up(0);
        let cursor = (420.0, 260.0);
        let before = vp.to_map(cursor);
        vp.wheel(2.0, cursor, 10);
        let after = vp.to_map(cursor);
        assert!((before.0 - after.0).abs() < 1e-3);
        assert!((before.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn pan_is_bounded_on_both_axes() {
        let mut vp = viewport();
        vp.pointer_down((0.0, 0.0), true);
        for step in 1..200 {
            vp.pointer_move((step as f32 * 50.0, step as f32 * -50.0));
        }
        let bound = vp.config.max_pan;
        assert!(vp.pan().0 <= bound && vp.pan().0 >= -bound);
        assert!(vp.pan().1 <= bound && vp.pan().1 >= -bound);
        assert_eq!(vp.pan(), (bound, -bound));
    }

    #[test]
    fn still_click_commits_a_deselect_after_the_window() {
        let mut vp = viewport();
        vp.pointer_down((100.0, 100.0), true);
        vp.pointer_up(1_000);
        assert_eq!(vp.tick(1_100), ViewportAction::None);
        assert_eq!(vp.tick(1_000 + vp.config.click_delay_ms), ViewportAction::Deselect);
        // One-shot: the deadline is consumed.
        assert_eq!(vp.tick(5_000), ViewportAction::None);
    }

    #[test]
    fn drag_does_not_commit_a_click() {
        let mut vp = viewport();
        vp.pointer_down((100.0, 100.0), true);
        vp.pointer_move((160.0, 100.0));
        vp.pointer_up(1_000);
        assert_eq!(vp.tick(10_000), ViewportAction::None);
        assert_eq!(vp.pan().0, 60.0);
    }

    #[test]
    fn double_click_cancels_the_held_deselect_and_zooms_in() {
        let mut vp = viewport();
        vp.pointer_down((200.0, 200.0), true);
        vp.pointer_up(1_000);
        vp.pointer_down((200.0, 200.0), true);
        vp.pointer_up(1_080);
        vp.double_click((200.0, 200.0));
        assert!(vp.zoom() > 1.0);
        assert_eq!(vp.tick(10_000), ViewportAction::None, "deselect must not fire");
    }

    #[test]
    fn at_most_one_click_deadline_is_pending() {
        let mut vp = viewport();
        vp.pointer_down((0.0, 0.0), true);
        vp.pointer_up(100);
        vp.pointer_down((0.0, 0.0), true);
        vp.pointer_up(200);
        // The first deadline (100 + window) was replaced, not stacked.
        assert_eq!(vp.tick(100 + vp.config.click_delay_ms), ViewportAction::None);
        assert_eq!(vp.tick(200 + vp.config.click_delay_ms), ViewportAction::Deselect);
    }

    #[test]
    fn second_touch_enters_pinch_and_release_leaves_it() {
        let mut vp = viewport();
        vp.touch_start(&[(100.0, 100.0)]);
        assert_eq!(vp.gesture(), GestureState::Panning);
        vp.touch_start(&[(100.0, 100.0), (200.0, 100.0)]);
        assert_eq!(vp.gesture(), GestureState::Pinching);
        vp.touch_end(&[(100.0, 100.0)], 500);
        assert_eq!(vp.gesture(), GestureState::Panning);
        vp.touch_end(&[], 600);
        assert_eq!(vp.gesture(), GestureState::Idle);
    }

    #[test]
    fn pinch_spread_zooms_in() {
        let mut vp = viewport();
        vp.touch_start(&[(300.0, 300.0), (340.0, 300.0)]);
        vp.touch_move(&[(280.0, 300.0), (360.0, 300.0)]);
        assert!(vp.zoom() > 1.0);
        vp.touch_end(&[], 1_000);
        vp.tick(1_000 + vp.config.snap_delay_ms);
        let snapped = vp.zoom();
        assert!(vp.config.zoom_levels.contains(&snapped));
    }

    #[test]
    fn click_on_a_signal_never_schedules_a_deselect() {
        let mut vp = viewport();
        vp.pointer_down((50.0, 50.0), false);
        vp.pointer_up(100);
        assert_eq!(vp.tick(10_000), ViewportAction::None);
    }
}

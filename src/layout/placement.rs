//! Angular placement of a ring's signals.
//!
//! Signals are bucketed by driver in the fixed STEEP order so related
//! signals sit contiguously on the ring, then spread evenly over the
//! ring's usable arc. Placement is a pure function of the ordered list.

use std::f32::consts::PI;

use crate::ir::{Driver, Polarity, Signal};

/// Usable arc for one ring scope: start angle and swept span, radians.
/// Angles follow screen convention (y down); `-PI/2` is the top of the
/// map and `0` points right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Arc {
    pub start: f32,
    pub span: f32,
}

impl Arc {
    pub const FULL: Arc = Arc {
        start: -PI / 2.0,
        span: 2.0 * PI,
    };

    /// Right half for opportunities, left half for risks.
    pub fn hemisphere(polarity: Polarity) -> Arc {
        match polarity {
            Polarity::Opportunity => Arc {
                start: -PI / 2.0,
                span: PI,
            },
            Polarity::Risk => Arc {
                start: PI / 2.0,
                span: PI,
            },
        }
    }
}

/// Stable driver-bucketed ordering: concatenate the ring's signals bucket
/// by bucket in `Driver::ORDER`, preserving input order inside a bucket.
pub(super) fn bucket_by_driver<'a>(signals: &[&'a Signal]) -> Vec<&'a Signal> {
    let mut ordered = Vec::with_capacity(signals.len());
    for driver in Driver::ORDER {
        ordered.extend(signals.iter().copied().filter(|s| s.driver == driver));
    }
    ordered
}

/// Evenly spaced angles over the arc. The first signal sits at the arc
/// start; the step is `span / count`, so a lone signal lands at the start
/// with no `count - 1` division anywhere.
pub(super) fn spread_angles(count: usize, arc: Arc) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = arc.span / count as f32;
    (0..count).map(|i| arc.start + i as f32 * step).collect()
}

/// Point on the ring circle for one angle.
pub(super) fn point_on_ring(center: (f32, f32), radius: f32, angle: f32) -> (f32, f32) {
    (
        center.0 + radius * angle.cos(),
        center.1 + radius * angle.sin(),
    )
}

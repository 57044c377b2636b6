use crate::config::RingSizingConfig;
use crate::ir::Maturity;

/// Radius of a ring given how many signals it carries.
///
/// Pure in (ring, count): the base radius keeps the ring's visual order,
/// and crowded rings widen linearly above the threshold so markers keep
/// breathing room. Growth is clamped so outer rings stay distinct.
pub(super) fn ring_radius(ring: Maturity, count: usize, config: &RingSizingConfig) -> f32 {
    let base = config.base_radius(ring);
    let over = count.saturating_sub(config.crowding_threshold);
    let growth = (over as f32 * config.growth_per_signal).min(config.max_growth);
    base + growth
}

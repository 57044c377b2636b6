use serde::{Deserialize, Serialize};

use crate::ir::Driver;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub ring_stroke: String,
    pub ring_label_color: String,
    pub label_color: String,
    pub title_color: String,
    pub divider_color: String,
    pub driver_colors: DriverColors,
}

/// Fixed driver -> color lookup. Hand-authored configuration data, not
/// computed; `unclassified` doubles as the fallback for anything outside
/// the STEEP list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverColors {
    pub social: String,
    pub technological: String,
    pub economic: String,
    pub environmental: String,
    pub political: String,
    pub unclassified: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            ring_stroke: "#D7E0F0".to_string(),
            ring_label_color: "#7A8AA6".to_string(),
            label_color: "#1C2430".to_string(),
            title_color: "#1C2430".to_string(),
            divider_color: "#C7D2E5".to_string(),
            driver_colors: DriverColors {
                social: "#6366f1".to_string(),        // indigo
                technological: "#06b6d4".to_string(), // cyan
                economic: "#f59e0b".to_string(),      // amber
                environmental: "#10b981".to_string(), // emerald
                political: "#ef4444".to_string(),     // red
                unclassified: "#94a3b8".to_string(),  // slate
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#0F172A".to_string(),
            ring_stroke: "#334155".to_string(),
            ring_label_color: "#64748B".to_string(),
            label_color: "#E2E8F0".to_string(),
            title_color: "#F1F5F9".to_string(),
            divider_color: "#475569".to_string(),
            driver_colors: DriverColors {
                social: "#818cf8".to_string(),
                technological: "#22d3ee".to_string(),
                economic: "#fbbf24".to_string(),
                environmental: "#34d399".to_string(),
                political: "#f87171".to_string(),
                unclassified: "#64748b".to_string(),
            },
        }
    }

    pub fn driver_color(&self, driver: Driver) -> &str {
        match driver {
            Driver::Social => &self.driver_colors.social,
            Driver::Technological => &self.driver_colors.technological,
            Driver::Economic => &self.driver_colors.economic,
            Driver::Environmental => &self.driver_colors.environmental,
            Driver::Political => &self.driver_colors.political,
            Driver::Unclassified => &self.driver_colors.unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_driver_resolves_to_a_color() {
        let theme = Theme::light();
        for driver in Driver::ORDER {
            assert!(theme.driver_color(driver).starts_with('#'));
        }
    }

    #[test]
    fn unclassified_uses_the_fallback_color() {
        let theme = Theme::light();
        assert_eq!(
            theme.driver_color(Driver::from_token("something-new")),
            theme.driver_colors.unclassified
        );
    }
}

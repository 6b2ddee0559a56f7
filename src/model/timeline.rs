use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

const MIN_DAY_WIDTH: f32 = 8.0;
const MAX_DAY_WIDTH: f32 = 120.0;
const MAX_MONTHS_VISIBLE: i32 = 120;

/// Geometry constants shared by every layout stage.
///
/// `daily_hour_limit` must match the limit the upstream scheduler used when it
/// produced `start_hour_offset`, otherwise bars drift inside their day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels per calendar day.
    pub day_width: f32,
    /// Working hours that fill one day column.
    pub daily_hour_limit: f32,
    pub resource_header_height: f32,
    pub item_row_height: f32,
    pub days_per_month: i32,
    pub months_visible: i32,
    /// Narrowest bar drawn, so tiny segments stay clickable.
    pub minimum_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_width: 30.0,
            daily_hour_limit: 8.0,
            resource_header_height: 36.0,
            item_row_height: 28.0,
            days_per_month: 30,
            months_visible: 12,
            minimum_width: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Number of days in the configured planning horizon.
    pub fn horizon_days(&self) -> i32 {
        self.months_visible.saturating_mul(self.days_per_month).max(1)
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.day_width = (self.day_width * 1.2).min(MAX_DAY_WIDTH);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.day_width = (self.day_width / 1.2).max(MIN_DAY_WIDTH);
    }

    /// Copy with every constant pulled back into a range the layout stages can
    /// divide by and allocate from. Non-finite values fall back to defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };
        Self {
            day_width: finite_or(self.day_width, defaults.day_width)
                .clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH),
            daily_hour_limit: Some(self.daily_hour_limit)
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(defaults.daily_hour_limit),
            resource_header_height: finite_or(
                self.resource_header_height,
                defaults.resource_header_height,
            )
            .max(0.0),
            item_row_height: finite_or(self.item_row_height, defaults.item_row_height).max(0.0),
            days_per_month: self.days_per_month.max(1),
            months_visible: self.months_visible.clamp(1, MAX_MONTHS_VISIBLE),
            minimum_width: finite_or(self.minimum_width, defaults.minimum_width).max(0.0),
        }
    }

    /// Convert an x-pixel offset back to the 1-based day under it.
    pub fn x_to_day(&self, x: f32) -> i32 {
        (x / self.day_width).floor() as i32 + 1
    }
}

impl Hash for LayoutConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day_width.to_bits().hash(state);
        self.daily_hour_limit.to_bits().hash(state);
        self.resource_header_height.to_bits().hash(state);
        self.item_row_height.to_bits().hash(state);
        self.days_per_month.hash(state);
        self.months_visible.hash(state);
        self.minimum_width.to_bits().hash(state);
    }
}

/// Which weekend days of the synthetic 7-day cycle are worked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkWeek {
    pub work_on_saturday: bool,
    pub work_on_sunday: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut config = LayoutConfig::default();
        for _ in 0..50 {
            config.zoom_in();
        }
        assert_eq!(config.day_width, MAX_DAY_WIDTH);
        for _ in 0..50 {
            config.zoom_out();
        }
        assert_eq!(config.day_width, MIN_DAY_WIDTH);
    }

    #[test]
    fn test_x_to_day() {
        let config = LayoutConfig::default();
        assert_eq!(config.x_to_day(0.0), 1);
        assert_eq!(config.x_to_day(29.9), 1);
        assert_eq!(config.x_to_day(30.0), 2);
    }

    #[test]
    fn test_sanitized_repairs_unusable_constants() {
        let broken: LayoutConfig = serde_json::from_str(
            r#"{"days_per_month": 0, "daily_hour_limit": -2.0, "day_width": 0.0,
                "item_row_height": -10.0, "minimum_width": -1.0, "months_visible": 0}"#,
        )
        .unwrap();
        let config = broken.sanitized();
        assert_eq!(config.days_per_month, 1);
        assert_eq!(config.daily_hour_limit, 8.0);
        assert_eq!(config.day_width, MIN_DAY_WIDTH);
        assert_eq!(config.item_row_height, 0.0);
        assert_eq!(config.minimum_width, 0.0);
        assert_eq!(config.months_visible, 1);
        assert_eq!(config.resource_header_height, 36.0);

        let nan = LayoutConfig {
            day_width: f32::NAN,
            daily_hour_limit: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(nan.sanitized(), LayoutConfig::default());
    }

    #[test]
    fn test_sane_config_is_unchanged() {
        let mut config = LayoutConfig::default();
        config.zoom_in();
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"day_width": 40.0}"#).unwrap();
        assert_eq!(config.day_width, 40.0);
        assert_eq!(config.daily_hour_limit, 8.0);
        assert_eq!(config.horizon_days(), 360);
    }
}

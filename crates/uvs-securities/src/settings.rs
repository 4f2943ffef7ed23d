//! Universe-wide defaults applied to every security created by selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uvs_schemas::{Resolution, MICROS_SCALE};

/// Settings the factory applies to each newly admitted security.
///
/// Loaded from JSON by operator tooling; field defaults are the
/// conservative engine-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseSettings {
    /// Resolution every universe subscription is created at.
    #[serde(default = "default_resolution")]
    pub resolution: Resolution,
    /// Account leverage in micros (2_000_000 = 2.0x).
    #[serde(default = "default_leverage_micros")]
    pub leverage_micros: i64,
    /// Fill forward missing data points.
    #[serde(default = "default_fill_forward")]
    pub fill_forward: bool,
    /// Receive data outside regular trading hours.
    #[serde(default)]
    pub extended_market_hours: bool,
    /// Subscriptions created by selection are scheduled through this date.
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
}

fn default_resolution() -> Resolution {
    Resolution::Minute
}

fn default_leverage_micros() -> i64 {
    2 * MICROS_SCALE
}

fn default_fill_forward() -> bool {
    true
}

fn default_end_date() -> NaiveDate {
    // Open-ended deployments: effectively "until the algorithm stops".
    NaiveDate::from_ymd_opt(2100, 1, 1).unwrap()
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            leverage_micros: default_leverage_micros(),
            fill_forward: default_fill_forward(),
            extended_market_hours: false,
            end_date: default_end_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_minute_two_x_fill_forward() {
        let s = UniverseSettings::default();
        assert_eq!(s.resolution, Resolution::Minute);
        assert_eq!(s.leverage_micros, 2_000_000);
        assert!(s.fill_forward);
        assert!(!s.extended_market_hours);
    }

    #[test]
    fn partial_json_uses_field_defaults() {
        let s: UniverseSettings = serde_json::from_str(r#"{"resolution":"daily"}"#).unwrap();
        assert_eq!(s.resolution, Resolution::Daily);
        assert_eq!(s.leverage_micros, 2_000_000);
        assert!(s.fill_forward);
    }
}

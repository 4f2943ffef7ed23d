use serde::{Deserialize, Serialize};
use uvs_schemas::Resolution;

/// Per-resolution ceilings on concurrently active subscriptions.
///
/// Capacity reflects engine-wide subscription-processing cost, scaled by
/// resolution verbosity: tick data is far more expensive per symbol than
/// daily data. Hour and daily feeds carry no special ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionLimits {
    #[serde(default = "default_tick")]
    pub tick: usize,
    #[serde(default = "default_second")]
    pub second: usize,
    #[serde(default = "default_minute")]
    pub minute: usize,
}

fn default_tick() -> usize {
    40
}

fn default_second() -> usize {
    50
}

fn default_minute() -> usize {
    240
}

impl Default for SubscriptionLimits {
    fn default() -> Self {
        Self {
            tick: default_tick(),
            second: default_second(),
            minute: default_minute(),
        }
    }
}

impl SubscriptionLimits {
    /// Configured ceiling for `resolution`; `None` means unbounded.
    pub fn ceiling(&self, resolution: Resolution) -> Option<usize> {
        match resolution {
            Resolution::Tick => Some(self.tick),
            Resolution::Second => Some(self.second),
            Resolution::Minute => Some(self.minute),
            Resolution::Hour | Resolution::Daily => None,
        }
    }

    /// How many new subscriptions may be admitted this pass, after the
    /// `pinned` securities at this resolution have reserved their slots.
    /// `None` means unbounded. A bounded result of zero means the pass
    /// must not proceed.
    pub fn effective_limit(&self, resolution: Resolution, pinned: usize) -> Option<usize> {
        self.ceiling(resolution)
            .map(|ceiling| ceiling.saturating_sub(pinned))
    }
}

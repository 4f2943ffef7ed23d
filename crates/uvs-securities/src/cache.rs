//! Bounded per-security data cache.
//!
//! Holds the most recent data points delivered to a security so strategy
//! code can warm up without refetching. The universe engine resets this
//! cache exactly when a security's subscription is fully torn down.

/// A single cached data point (close-of-period price).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePoint {
    /// Period end timestamp as UTC epoch seconds.
    pub end_ts: i64,
    /// Price in micros (1/1_000_000 of the base currency unit).
    pub price_micros: i64,
}

impl CachePoint {
    pub fn new(end_ts: i64, price_micros: i64) -> Self {
        Self {
            end_ts,
            price_micros,
        }
    }
}

/// Bounded window of recent data points, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCache {
    max_len: usize,
    points: Vec<CachePoint>,
}

impl DataCache {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            points: Vec::new(),
        }
    }

    /// Append a point, dropping the oldest beyond `max_len`.
    pub fn push(&mut self, point: CachePoint) {
        self.points.push(point);
        if self.points.len() > self.max_len {
            let start = self.points.len() - self.max_len;
            self.points = self.points.split_off(start);
        }
    }

    /// Clear all cached points. Capacity configuration is kept.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[CachePoint] {
        &self.points
    }
}

impl Default for DataCache {
    fn default() -> Self {
        // Matches the engine-wide default bar history window.
        Self::new(256)
    }
}

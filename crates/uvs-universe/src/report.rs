use serde::Serialize;
use uvs_schemas::{InstrumentKey, Resolution};

/// The additions/removals delta produced by one selection pass.
///
/// Ordered: `added` follows the selection function's output order,
/// `removed` follows subscription-registry order. The two sequences are
/// disjoint by construction. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityChanges {
    pub added: Vec<InstrumentKey>,
    pub removed: Vec<InstrumentKey>,
}

impl SecurityChanges {
    /// The canonical no-change value. `Vec::new` is const and does not
    /// allocate, so callers can compare against this cheaply.
    pub const NONE: SecurityChanges = SecurityChanges {
        added: Vec::new(),
        removed: Vec::new(),
    };

    pub fn is_none(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn count(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Why a pass deliberately produced no effect. Ordinary control flow,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The algorithm supplied no selection function; absence of a
    /// selector is a valid steady state.
    NoSelectionFunction,
    /// All capacity at this resolution is reserved by pinned securities.
    NoCapacity { resolution: Resolution, pinned: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoSelectionFunction => write!(f, "no selection function configured"),
            SkipReason::NoCapacity { resolution, pinned } => write!(
                f,
                "no capacity available at {} resolution ({} pinned securities)",
                resolution.as_str(),
                pinned
            ),
        }
    }
}

/// A per-instrument failure during a pass. Never aborts the remainder
/// of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PassError {
    /// The security factory could not construct a security.
    FactoryFailure { key: InstrumentKey, message: String },
    /// The data feed rejected an add request.
    FeedRejectedAdd { key: InstrumentKey, message: String },
    /// The data feed rejected a remove request.
    FeedRejectedRemove { key: InstrumentKey, message: String },
    /// "Holds position" / "has open orders" could not be evaluated; the
    /// subscription was retained (fail-closed).
    ProtectionCheckFailed { key: InstrumentKey, message: String },
}

impl PassError {
    pub fn key(&self) -> &InstrumentKey {
        match self {
            PassError::FactoryFailure { key, .. }
            | PassError::FeedRejectedAdd { key, .. }
            | PassError::FeedRejectedRemove { key, .. }
            | PassError::ProtectionCheckFailed { key, .. } => key,
        }
    }
}

impl std::fmt::Display for PassError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassError::FactoryFailure { key, message } => {
                write!(f, "security factory failed for {key}: {message}")
            }
            PassError::FeedRejectedAdd { key, message } => {
                write!(f, "feed rejected add for {key}: {message}")
            }
            PassError::FeedRejectedRemove { key, message } => {
                write!(f, "feed rejected remove for {key}: {message}")
            }
            PassError::ProtectionCheckFailed { key, message } => {
                write!(f, "protection check failed for {key} (retained): {message}")
            }
        }
    }
}

/// Full outcome of one selection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub changes: SecurityChanges,
    /// Set when the pass was a deliberate no-op.
    pub skipped: Option<SkipReason>,
    /// Per-instrument failures; the pass itself still completed.
    pub errors: Vec<PassError>,
}

impl SelectionReport {
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            changes: SecurityChanges::NONE,
            skipped: Some(reason),
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_none_is_empty() {
        assert!(SecurityChanges::NONE.is_none());
        assert_eq!(SecurityChanges::NONE.count(), 0);
    }

    #[test]
    fn skipped_report_carries_no_changes() {
        let report = SelectionReport::skipped(SkipReason::NoSelectionFunction);
        assert_eq!(report.changes, SecurityChanges::NONE);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn skip_reason_display() {
        let r = SkipReason::NoCapacity {
            resolution: Resolution::Tick,
            pinned: 40,
        };
        assert_eq!(
            r.to_string(),
            "no capacity available at tick resolution (40 pinned securities)"
        );
    }
}

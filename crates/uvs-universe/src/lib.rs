//! uvs-universe
//!
//! The universe-selection core: admission control and reconciliation of
//! the live subscription set against a caller-supplied selection.
//!
//! Architectural decisions:
//! - Per-resolution admission limits; pinned (held) securities reserve
//!   capacity first.
//! - Selection is a pluggable function value, not an inheritance seam.
//! - A subscription whose security holds a position or has an open order
//!   is reported as removed but never physically torn down.
//! - "No selector" and "no capacity" are ordinary no-op outcomes, not
//!   errors.
//!
//! Deterministic, pure logic. No IO. No internal locking: callers must
//! invoke a pass only while the data-consumption path is quiesced.

mod engine;
mod limits;
mod report;
mod selection;

pub use engine::{NoOpenOrders, OpenOrderSource, OrderQueryError, SelectionEngine};
pub use limits::SubscriptionLimits;
pub use report::{PassError, SecurityChanges, SelectionReport, SkipReason};
pub use selection::{SelectionFunction, TopDollarVolume};

//! uvs-securities
//!
//! The algorithm-side security registry.
//!
//! Architectural decisions:
//! - Securities are created lazily on first admission and never destroyed
//!   by the universe subsystem; only their feed linkage comes and goes.
//! - The registry owns `Security` values keyed by `InstrumentKey`;
//!   subscriptions refer to securities by key, never by shared pointer.
//! - Held quantity is a signed i64; leverage is integer micros.
//!
//! Deterministic, pure state. No IO.

mod cache;
mod registry;
mod settings;

pub use cache::{CachePoint, DataCache};
pub use registry::{RegistryError, Security, SecurityRegistry};
pub use settings::UniverseSettings;

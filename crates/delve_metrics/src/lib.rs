//! Delve Metrics - event counters for asset and service instrumentation
//!
//! Counters completely vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use delve_metrics::Counter;
//!
//! let mut counter = Counter::new();
//! counter.increment("cache_hit", 1);
//! println!("hits: {}", counter.get("cache_hit"));
//! ```
//!
//! Without the `metrics` feature every call is a no-op and every read
//! returns zero.

#[cfg(feature = "metrics")]
mod counter;

#[cfg(feature = "metrics")]
pub use counter::Counter;

/// Whether counters are compiled in.
pub const ENABLED: bool = cfg!(feature = "metrics");

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self { Self }
    pub fn increment(&mut self, _name: &'static str, _value: usize) {}
    pub fn get(&self, _name: &str) -> usize { 0 }
}

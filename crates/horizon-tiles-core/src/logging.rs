//! Logging facilities for Horizon Tiles.
//!
//! Horizon Tiles uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_tiles::diff=debug")
//!     .init();
//! ```
//!
//! Decoding fallbacks are logged at `trace`, diff outcomes and cache hits at
//! `debug`, and cache failures that are recovered from at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Component model marshalling target.
    pub const MODEL: &str = "horizon_tiles::model";
    /// Difference classification target.
    pub const DIFF: &str = "horizon_tiles::diff";
    /// State cache target.
    pub const CACHE: &str = "horizon_tiles::cache";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Useful for timing a marshalling or diffing pass over a large page.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_tiles::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros that take the target first.
#[macro_export]
macro_rules! tiles_trace {
    ($target:expr, $($arg:tt)*) => {
        ::tracing::trace!(target: $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! tiles_debug {
    ($target:expr, $($arg:tt)*) => {
        ::tracing::debug!(target: $target, $($arg)*)
    };
}

#[macro_export]
macro_rules! tiles_warn {
    ($target:expr, $($arg:tt)*) => {
        ::tracing::warn!(target: $target, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Entering and dropping a span must not panic without a subscriber.
        let _span = PerfSpan::new("marshal_page");
    }

    #[test]
    fn test_macros_expand() {
        tiles_trace!(targets::MODEL, key = "span", "fallback");
        tiles_debug!(targets::DIFF, outcome = "items", "classified");
        tiles_warn!(targets::CACHE, "cache unreadable");
    }
}

//! Zero-cost tracing helpers.
//!
//! When the `tracing` feature is enabled these macros forward to the
//! `tracing` crate; otherwise they compile to no-ops. They are used on
//! the insertion slow paths only (split publication, lost CAS) so the
//! uncontended hot path never pays for instrumentation.
//!
//! ```bash
//! # Normal build - no tracing overhead
//! cargo build --release
//!
//! # Run the stress tests with tracing enabled
//! RUST_LOG=radixmap=trace cargo test --features tracing --test stress_tests
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level logging. Compiles to no-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level logging. Compiles to no-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

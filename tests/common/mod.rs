//! Common test utilities: tracing setup.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ...
//! }
//! ```
//!
//! Filtering follows `RUST_LOG` (e.g. `RUST_LOG=radixmap=trace`); the
//! default level is `info`. Pair with the crate's `tracing` feature to
//! see the insertion slow-path events:
//!
//! ```bash
//! RUST_LOG=radixmap=trace cargo test --features tracing --test stress_tests
//! ```

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with console logging.
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_ids(true)
            .with_target(true)
            .compact()
            .try_init();
    });
}

#![allow(dead_code)]

pub mod models;
pub mod tracker;

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once per test binary. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=bond_rust=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! Shared test utilities for `boruvka-core`.

use proptest::test_runner::Config as ProptestConfig;

/// Builds a proptest configuration whose case count can be overridden via
/// the `BORUVKA_PBT_CASES` environment variable.
///
/// Keeping the property suites on one knob makes it easy to crank the case
/// count locally while CI stays on the defaults.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = std::env::var("BORUVKA_PBT_CASES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default_cases);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

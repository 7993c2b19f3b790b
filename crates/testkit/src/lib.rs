//! # formcheck-testkit
//!
//! Test helpers: port doubles and the shared fixture harness.
//! This crate depends on `ports` and `shared`.

pub mod doubles;
pub mod fixtures;

pub use doubles::{FixedClock, NoopLogger, RecordingLogger};
pub use fixtures::{
    FixtureError, FormScenario, FormScenarioFixtures, env_fixture, fixture_path, fixture_root,
    fixture_text, form_scenarios, load_json_fixture,
};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_ports::ports_crate_version;
    use formcheck_shared::shared_crate_version;

    #[test]
    fn testkit_crate_compiles() {
        let version = testkit_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn testkit_can_use_ports_and_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn doubles_are_available() {
        let _ = NoopLogger;
        assert!(RecordingLogger::new().events().is_empty());
    }
}

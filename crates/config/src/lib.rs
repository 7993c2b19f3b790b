//! # formcheck-config
//!
//! Configuration schema, loading, and validation for the form rules.
//! This crate depends on `shared` and `validators` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_MINIMUM_AGE, ENV_QUANTITY_MAX, ENV_QUANTITY_MIN, EnvParseError, FormEnv,
    apply_env_overrides,
};
pub use load::{
    load_form_config_from_path, load_form_config_from_sources, load_form_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, DEFAULT_MINIMUM_AGE, DEFAULT_QUANTITY_MAX,
    DEFAULT_QUANTITY_MIN, FormConfig, MinimumAgeYears, QuantityConfig, ValidatedFormConfig,
    parse_form_config_json, parse_form_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_shared::shared_crate_version;
    use formcheck_validators::validators_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_shared_and_validators() {
        assert!(!shared_crate_version().is_empty());
        assert!(!validators_crate_version().is_empty());
    }
}

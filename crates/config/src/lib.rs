//! # stats-client-config
//!
//! Configuration schema, validation, and env overrides for building a stats
//! client. This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_STATS_BACKEND, ENV_STATS_ENABLED, ENV_STATS_LEVEL, ENV_STATS_PREFIXES, ENV_STATS_TAGS,
    EnvParseError, StatsEnv, apply_env_overrides,
};
pub use load::{
    load_stats_config_from_path, load_stats_config_std_env, to_pretty_json, to_pretty_toml,
};
pub use schema::{
    BackendKind, CURRENT_CONFIG_VERSION, ConfigSchemaError, LevelName, StatsConfig,
    ValidatedStatsConfig, parse_stats_config_json, parse_stats_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats_client_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        assert!(!config_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn config_depends_on_shared_only() {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let internal: Vec<&str> = cargo_toml
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("stats-client"))
            .filter_map(|line| line.split('.').next())
            .collect();

        assert_eq!(internal, vec!["stats-client-shared"]);
    }
}

//! # stats-client
//!
//! Facade for consumers. Re-exports the metrics port, the decorators and the
//! config types, and wires a validated config into a ready-to-use client.
//!
//! ```
//! use stats_client::{StatsClient, bump_sum};
//!
//! let client: Option<&dyn StatsClient> = None;
//! bump_sum(client, "requests", 1.0, &["route:/health"]);
//! ```

pub use stats_client_adapters::{
    EventLevel, MultiEnd, NoopStats, PrefixClient, TaggedClient, TracingStats,
};
pub use stats_client_config::{
    BackendKind, LevelName, StatsConfig, StatsEnv, ValidatedStatsConfig,
    load_stats_config_from_path, load_stats_config_std_env, parse_stats_config_json,
    parse_stats_config_toml,
};
pub use stats_client_ports::{
    NO_OP_END, NoOpEnd, StatsClient, TimerEnd, bump_avg, bump_histogram, bump_sum, bump_time,
    no_op_end,
};
pub use stats_client_shared::{ErrorEnvelope, Result};

use std::path::Path;
use std::sync::Arc;

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build a client from a validated config.
///
/// Returns `None` when the config is disabled. Otherwise the configured
/// backend is decorated with [`decorate`].
#[must_use]
pub fn build_client(config: &ValidatedStatsConfig) -> Option<Arc<dyn StatsClient>> {
    if !config.enabled() {
        tracing::debug!("stats disabled; no client built");
        return None;
    }

    let backend: Arc<dyn StatsClient> = match config.backend() {
        BackendKind::Tracing => {
            Arc::new(TracingStats::new().with_level(event_level(config.level())))
        },
        BackendKind::None => Arc::new(NoopStats),
    };

    tracing::debug!(
        backend = config.backend().as_str(),
        prefixes = config.prefixes().len(),
        tags = config.tags().len(),
        "stats client built"
    );
    Some(decorate(config, backend))
}

/// Wrap any backend with the configured tags and prefixes.
///
/// The backend is wrapped in a [`TaggedClient`] when base tags are set, and
/// the result in a [`PrefixClient`] when prefixes are set, so every prefixed
/// call carries the base tags. The `enabled` flag is not consulted.
pub fn decorate(
    config: &ValidatedStatsConfig,
    backend: Arc<dyn StatsClient>,
) -> Arc<dyn StatsClient> {
    let mut client = backend;
    if !config.tags().is_empty() {
        client = Arc::new(TaggedClient::new(client, config.tags().iter().cloned()));
    }
    if !config.prefixes().is_empty() {
        client = Arc::new(PrefixClient::new(config.prefixes().iter().cloned(), client));
    }
    client
}

/// Load the config from the process env and an optional file, then build a client.
pub fn build_client_std_env(config_path: Option<&Path>) -> Result<Option<Arc<dyn StatsClient>>> {
    let config = load_stats_config_std_env(config_path)?;
    Ok(build_client(&config))
}

const fn event_level(level: LevelName) -> EventLevel {
    match level {
        LevelName::Trace => EventLevel::Trace,
        LevelName::Debug => EventLevel::Debug,
        LevelName::Info => EventLevel::Info,
        LevelName::Warn => EventLevel::Warn,
        LevelName::Error => EventLevel::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn enabled(config: StatsConfig) -> Result<ValidatedStatsConfig, Box<dyn Error>> {
        Ok(StatsConfig {
            enabled: true,
            ..config
        }
        .validate_and_normalize()?)
    }

    #[test]
    fn disabled_config_builds_nothing() -> Result<(), Box<dyn Error>> {
        let config = StatsConfig::default().validate_and_normalize()?;
        assert!(build_client(&config).is_none());
        Ok(())
    }

    #[test]
    fn none_backend_builds_an_inert_client() -> Result<(), Box<dyn Error>> {
        let config = enabled(StatsConfig {
            backend: BackendKind::None,
            prefixes: vec!["svc.".into()],
            ..StatsConfig::default()
        })?;

        let client = build_client(&config).ok_or("expected a client")?;
        client.bump_sum("requests", 1.0, &[]);
        client.bump_time("job", &[]).end();
        Ok(())
    }

    #[test]
    fn levels_map_one_to_one() {
        assert_eq!(event_level(LevelName::Trace), EventLevel::Trace);
        assert_eq!(event_level(LevelName::Debug), EventLevel::Debug);
        assert_eq!(event_level(LevelName::Info), EventLevel::Info);
        assert_eq!(event_level(LevelName::Warn), EventLevel::Warn);
        assert_eq!(event_level(LevelName::Error), EventLevel::Error);
    }

    #[test]
    fn facade_crate_compiles() {
        assert!(!facade_crate_version().is_empty());
    }
}

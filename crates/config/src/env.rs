//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - order-preserving (CSV lists keep their order; prefix order is fan-out order)
//! - safe (secret values are redacted in error metadata)

use crate::schema::{BackendKind, LevelName, StatsConfig, ValidatedStatsConfig};
use stats_client_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;

/// Env var: build a client at all (`true`/`false`).
pub const ENV_STATS_ENABLED: &str = "STATS_ENABLED";
/// Env var: backend name (`tracing` | `none`).
pub const ENV_STATS_BACKEND: &str = "STATS_BACKEND";
/// Env var: tracing backend event level.
pub const ENV_STATS_LEVEL: &str = "STATS_LEVEL";
/// Env var: key prefixes as CSV, in fan-out order.
pub const ENV_STATS_PREFIXES: &str = "STATS_PREFIXES";
/// Env var: base tags as CSV.
pub const ENV_STATS_TAGS: &str = "STATS_TAGS";

const ENV_VARS: [&str; 5] = [
    ENV_STATS_ENABLED,
    ENV_STATS_BACKEND,
    ENV_STATS_LEVEL,
    ENV_STATS_PREFIXES,
    ENV_STATS_TAGS,
];

const MAX_CSV_ITEMS: usize = 64;

/// Parsed env overrides. `None` leaves the config value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsEnv {
    /// Override for `enabled`.
    pub enabled: Option<bool>,
    /// Override for `backend`.
    pub backend: Option<BackendKind>,
    /// Override for `level`.
    pub level: Option<LevelName>,
    /// Override for `prefixes`. `Some(empty)` clears the list.
    pub prefixes: Option<Vec<String>>,
    /// Override for `tags`. `Some(empty)` clears the list.
    pub tags: Option<Vec<String>>,
}

impl StatsEnv {
    /// Parse env overrides from a map (tests and embedding hosts).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            enabled: parse_optional_bool(map, ENV_STATS_ENABLED)?,
            backend: parse_optional_enum(map, ENV_STATS_BACKEND, BackendKind::parse)?,
            level: parse_optional_enum(map, ENV_STATS_LEVEL, LevelName::parse)?,
            prefixes: parse_optional_csv(map, ENV_STATS_PREFIXES)?,
            tags: parse_optional_csv(map, ENV_STATS_TAGS)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Whether no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.backend.is_none()
            && self.level.is_none()
            && self.prefixes.is_none()
            && self.tags.is_none()
    }
}

/// Apply env overrides onto a config, then validate and normalize the result.
pub fn apply_env_overrides(
    mut config: StatsConfig,
    env: &StatsEnv,
) -> Result<ValidatedStatsConfig, ErrorEnvelope> {
    if let Some(enabled) = env.enabled {
        config.enabled = enabled;
    }
    if let Some(backend) = env.backend {
        config.backend = backend;
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(prefixes) = &env.prefixes {
        config.prefixes.clone_from(prefixes);
    }
    if let Some(tags) = &env.tags {
        config.tags.clone_from(tags);
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// CSV list exceeds a safety limit.
    #[error("{var} is too large ({len} items, max {max})")]
    CsvTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of parsed items.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::CsvTooLarge { .. } => ErrorCode::new("config", "invalid_env_csv"),
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", redact_if_secret(var, &value)),
            EnvParseError::CsvTooLarge { var, len, max } => envelope
                .with_metadata("env_var", var)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    parse(raw).map(Some).ok_or_else(|| EnvParseError::InvalidEnum {
        var,
        value: raw.clone(),
    })
}

fn parse_optional_csv(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Some(Vec::new()));
    }

    // Empty items are kept: an empty prefix is a valid fan-out slot, and an
    // empty tag is rejected by config validation.
    let items: Vec<String> = trimmed.split(',').map(str::trim).map(str::to_string).collect();

    if items.len() > MAX_CSV_ITEMS {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: items.len(),
            max: MAX_CSV_ITEMS,
        });
    }

    Ok(Some(items))
}

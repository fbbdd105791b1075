//! Stats configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (TOML or JSON).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - List fields keep their configured order; prefix order is fan-out order.

use serde::{Deserialize, Serialize};
use stats_client_shared::{ErrorCode, ErrorEnvelope};

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

pub(crate) const PREFIXES_MAX: usize = 64;
pub(crate) const TAGS_MAX: usize = 64;

/// Backend that receives the (decorated) calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Report every bump as a `tracing` event.
    #[default]
    Tracing,
    /// Accept calls and record nothing.
    None,
}

impl BackendKind {
    /// Parse a backend name, ignoring ASCII case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "tracing" => Some(Self::Tracing),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Canonical config name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tracing => "tracing",
            Self::None => "none",
        }
    }
}

/// Event level used by the tracing backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelName {
    /// `trace`.
    Trace,
    /// `debug`.
    #[default]
    Debug,
    /// `info`.
    Info,
    /// `warn`.
    Warn,
    /// `error`.
    Error,
}

impl LevelName {
    /// Parse a level name, ignoring ASCII case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Canonical config name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Top-level stats configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct StatsConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Whether a client is built at all.
    pub enabled: bool,
    /// Backend receiving the calls.
    pub backend: BackendKind,
    /// Event level for the tracing backend.
    pub level: LevelName,
    /// Key prefixes, in fan-out order. Empty means keys are not prefixed.
    pub prefixes: Vec<String>,
    /// Tags appended to every call, in order.
    pub tags: Vec<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            enabled: false,
            backend: BackendKind::default(),
            level: LevelName::default(),
            prefixes: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl StatsConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedStatsConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.normalize();
        self.validate_prefixes()?;
        self.validate_tags()?;
        Ok(ValidatedStatsConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn normalize(&mut self) {
        for prefix in &mut self.prefixes {
            *prefix = prefix.trim().to_string();
        }
        for tag in &mut self.tags {
            *tag = tag.trim().to_string();
        }
    }

    fn validate_prefixes(&self) -> Result<(), ConfigSchemaError> {
        if self.prefixes.len() > PREFIXES_MAX {
            return Err(ConfigSchemaError::ListTooLarge {
                field: "prefixes",
                len: self.prefixes.len(),
                max: PREFIXES_MAX,
            });
        }
        for (index, prefix) in self.prefixes.iter().enumerate() {
            if prefix.chars().any(char::is_whitespace) {
                return Err(ConfigSchemaError::InvalidPrefix {
                    index,
                    prefix: prefix.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_tags(&self) -> Result<(), ConfigSchemaError> {
        if self.tags.len() > TAGS_MAX {
            return Err(ConfigSchemaError::ListTooLarge {
                field: "tags",
                len: self.tags.len(),
                max: TAGS_MAX,
            });
        }
        for (index, tag) in self.tags.iter().enumerate() {
            if tag.is_empty() || tag.chars().any(char::is_control) {
                return Err(ConfigSchemaError::InvalidTag {
                    index,
                    tag: tag.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStatsConfig {
    raw: StatsConfig,
}

impl ValidatedStatsConfig {
    /// Whether a client should be built.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.raw.enabled
    }

    /// Configured backend.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.raw.backend
    }

    /// Configured event level.
    #[must_use]
    pub const fn level(&self) -> LevelName {
        self.raw.level
    }

    /// Prefixes in fan-out order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.raw.prefixes
    }

    /// Base tags in order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.raw.tags
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> StatsConfig {
        self.raw
    }
}

/// Parse a stats config from a JSON string, applying validation and normalization.
pub fn parse_stats_config_json(input: &str) -> Result<ValidatedStatsConfig, ErrorEnvelope> {
    let config: StatsConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a stats config from a TOML string, applying validation and normalization.
pub fn parse_stats_config_toml(input: &str) -> Result<ValidatedStatsConfig, ErrorEnvelope> {
    let config: StatsConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this crate.
    #[error("unsupported config version: {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A list field exceeds the maximum allowed size.
    #[error("{field} must have at most {max} entries (got {len})")]
    ListTooLarge {
        /// Field name in the config file.
        field: &'static str,
        /// Number of entries.
        len: usize,
        /// Maximum allowed number of entries.
        max: usize,
    },
    /// A prefix entry contains whitespace.
    #[error("prefixes[{index}] must not contain whitespace")]
    InvalidPrefix {
        /// Position in the prefix list.
        index: usize,
        /// Offending prefix.
        prefix: String,
    },
    /// A tag entry is empty or contains control characters.
    #[error("tags[{index}] must be non-empty printable text")]
    InvalidTag {
        /// Position in the tag list.
        index: usize,
        /// Offending tag.
        tag: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::ListTooLarge { .. } => ErrorCode::new("config", "list_too_large"),
            Self::InvalidPrefix { .. } => ErrorCode::new("config", "invalid_prefix"),
            Self::InvalidTag { .. } => ErrorCode::new("config", "invalid_tag"),
        }
    }
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::ListTooLarge { field, len, max } => envelope
                .with_metadata("field", field)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::InvalidPrefix { index, prefix } => envelope
                .with_metadata("field", "prefixes")
                .with_metadata("index", index.to_string())
                .with_metadata("value", prefix),
            ConfigSchemaError::InvalidTag { index, tag } => envelope
                .with_metadata("field", "tags")
                .with_metadata("index", index.to_string())
                .with_metadata("value", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_disabled() -> Result<(), ConfigSchemaError> {
        let config = StatsConfig::default().validate_and_normalize()?;
        assert!(!config.enabled());
        assert_eq!(config.backend(), BackendKind::Tracing);
        assert_eq!(config.level(), LevelName::Debug);
        assert!(config.prefixes().is_empty());
        Ok(())
    }

    #[test]
    fn entries_are_trimmed_and_keep_order() -> Result<(), ConfigSchemaError> {
        let config = StatsConfig {
            prefixes: vec![" svc. ".into(), "env.prod.".into(), String::new()],
            tags: vec!["b:2 ".into(), " a:1".into()],
            ..StatsConfig::default()
        }
        .validate_and_normalize()?;

        assert_eq!(config.prefixes(), ["svc.", "env.prod.", ""]);
        assert_eq!(config.tags(), ["b:2", "a:1"]);
        Ok(())
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let error = StatsConfig {
            version: 7,
            ..StatsConfig::default()
        }
        .validate_and_normalize()
        .err();
        assert_eq!(
            error,
            Some(ConfigSchemaError::UnsupportedVersion {
                found: 7,
                supported: CURRENT_CONFIG_VERSION,
            })
        );
    }

    #[test]
    fn prefix_with_inner_whitespace_is_rejected() {
        let error = StatsConfig {
            prefixes: vec!["svc. env.".into()],
            ..StatsConfig::default()
        }
        .validate_and_normalize()
        .err();
        assert!(matches!(
            error,
            Some(ConfigSchemaError::InvalidPrefix { index: 0, .. })
        ));
    }

    #[test]
    fn empty_tag_maps_to_envelope_code() {
        let error = StatsConfig {
            tags: vec!["ok".into(), "   ".into()],
            ..StatsConfig::default()
        }
        .validate_and_normalize()
        .err()
        .map(ErrorEnvelope::from);

        let error = error.map(|error| (error.code.to_string(), error.metadata.get("index").cloned()));
        assert_eq!(
            error,
            Some(("config:invalid_tag".to_string(), Some("1".to_string())))
        );
    }

    #[test]
    fn oversized_prefix_list_is_rejected() {
        let error = StatsConfig {
            prefixes: (0..=PREFIXES_MAX).map(|index| format!("p{index}.")).collect(),
            ..StatsConfig::default()
        }
        .validate_and_normalize()
        .err();
        assert!(matches!(
            error,
            Some(ConfigSchemaError::ListTooLarge {
                field: "prefixes",
                ..
            })
        ));
    }

    #[test]
    fn level_and_backend_parse_case_insensitively() {
        assert_eq!(LevelName::parse("INFO"), Some(LevelName::Info));
        assert_eq!(LevelName::parse("Warning"), Some(LevelName::Warn));
        assert_eq!(LevelName::parse("verbose"), None);
        assert_eq!(BackendKind::parse(" None "), Some(BackendKind::None));
        assert_eq!(BackendKind::Tracing.as_str(), "tracing");
        assert_eq!(LevelName::Error.as_str(), "error");
    }
}

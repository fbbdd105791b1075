//! # stats-client-ports
//!
//! Port traits for recording application metrics.
//!
//! This crate defines the [`StatsClient`] contract every backend implements,
//! the [`TimerEnd`] capability returned when a timer starts, and free
//! functions that accept an optional client so components never have to
//! check for one themselves. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod optional;
pub mod stats;

pub use optional::*;
pub use stats::*;

#[cfg(test)]
mod tests {
    use super::*;
    use stats_client_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if !in_deps {
                continue;
            }
            if line.starts_with("stats-client") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_shared() {
        let deps = workspace_deps();
        assert_eq!(deps, vec!["stats-client-shared".to_string()]);
    }

    #[test]
    fn ports_crate_compiles() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}

//! Configuration loading for the route service

use std::path::{Path, PathBuf};

use evacroute_core::{HazardConfig, SearchConfig, SearchStrategy};
use serde::Deserialize;

use crate::error::ServerError;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub hazard: HazardConfig,
    #[serde(default)]
    pub floors: Vec<FloorEntry>,
}

/// Network and request handling settings
#[derive(Clone, Debug, Deserialize)]
pub struct ListenConfig {
    /// Socket address to listen on (default: 127.0.0.1:8080)
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Requests handled at the same time (default: 64)
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

/// Search engine settings
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct SearchSection {
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Expanded node cap per goal search; unbounded when absent
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

/// A floor dataset served under `id`
#[derive(Clone, Debug, Deserialize)]
pub struct FloorEntry {
    pub id: String,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    /// Dataset file, relative to the configuration file
    pub path: PathBuf,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_concurrency_limit() -> usize {
    64
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file. Floor paths are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let contents = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&contents, base_dir)
    }

    pub fn from_toml_str(contents: &str, base_dir: &Path) -> Result<Self, ServerError> {
        let mut config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        for floor in &mut config.floors {
            if floor.path.is_relative() {
                floor.path = base_dir.join(&floor.path);
            }
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.server.concurrency_limit == 0 {
            return Err(ServerError::Config(
                "server.concurrency_limit must be positive".into(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "server.request_timeout_secs must be positive".into(),
            ));
        }

        self.hazard
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let mut ids: Vec<&str> = self.floors.iter().map(|floor| floor.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ServerError::Config(format!(
                "floor id {} is configured twice",
                pair[0]
            )));
        }
        Ok(())
    }

    /// Engine settings shared by every request
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            strategy: self.search.strategy,
            max_expansions: self.search.max_expansions,
            hazard: self.hazard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::from_toml_str("", Path::new(".")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.concurrency_limit, 64);
        assert!(config.floors.is_empty());
        assert_eq!(config.search_config(), SearchConfig::default());
    }

    #[test]
    fn sections_are_parsed_and_paths_resolved() {
        let toml = r#"
            [server]
            bind = "0.0.0.0:9000"

            [search]
            strategy = "single_sweep"
            max_expansions = 5000

            [hazard]
            proximity_radius = 25.0

            [[floors]]
            id = "main_ground"
            building = "Main block"
            level = 0
            path = "floors/main_block_ground.json"
        "#;
        let config = ServerConfig::from_toml_str(toml, Path::new("/srv/evacroute")).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.request_timeout_secs, 10);
        let search = config.search_config();
        assert_eq!(search.strategy, SearchStrategy::SingleSweep);
        assert_eq!(search.max_expansions, Some(5000));
        assert_eq!(search.hazard.proximity_radius, 25.0);
        assert_eq!(
            search.hazard.intersect_penalty,
            HazardConfig::default().intersect_penalty
        );
        assert_eq!(
            config.floors[0].path,
            Path::new("/srv/evacroute/floors/main_block_ground.json")
        );
    }

    #[test]
    fn duplicate_floor_ids_are_rejected() {
        let toml = r#"
            [[floors]]
            id = "a"
            path = "a.json"

            [[floors]]
            id = "a"
            path = "b.json"
        "#;
        let err = ServerConfig::from_toml_str(toml, Path::new(".")).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn non_finite_hazard_tuning_is_rejected() {
        for toml in [
            "[hazard]\nproximity_radius = nan\n",
            "[hazard]\nintersect_penalty = nan\n",
            "[hazard]\nproximity_penalty = inf\n",
            "[hazard]\nintersect_penalty = -1.0\n",
        ] {
            let err = ServerConfig::from_toml_str(toml, Path::new(".")).unwrap_err();
            assert!(matches!(err, ServerError::Config(_)), "{toml}");
        }
    }

    #[test]
    fn shipped_config_bounds_the_search() {
        let config =
            ServerConfig::from_toml_str(include_str!("../../evacroute.toml"), Path::new("."))
                .unwrap();
        assert!(config.search_config().max_expansions.is_some());
        assert_eq!(config.floors[0].id, "main_ground");
    }

    #[test]
    fn zero_limits_are_rejected() {
        let toml = "[server]\nconcurrency_limit = 0\n";
        assert!(ServerConfig::from_toml_str(toml, Path::new(".")).is_err());
    }
}

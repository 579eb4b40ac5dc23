use evergreen::{SceneControls, SparkleConfig, TreeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names a JSON file overriding the playground defaults.
pub const CONFIG_ENV_VAR: &str = "EVERGREEN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config {path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config {path:?}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Everything the playground can be started with. Missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
	pub seed: Option<u64>,
	pub controls: SceneControls,
	pub tree: TreeConfig,
	pub sparkles: SparkleConfig,
}

impl PlaygroundConfig {
	pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
		let mut config: Self = serde_json::from_str(json)
			.map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
		// deserialization bypasses the speed sanitizing in the constructor
		config.controls =
			SceneControls::new(config.controls.illumination, config.controls.rotation_speed());
		Ok(config)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let json = std::fs::read_to_string(path)
			.map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
		Self::from_json(path, &json)
	}

	/// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when it is unset.
	pub fn load_from_env() -> Result<Self, ConfigError> {
		match std::env::var_os(CONFIG_ENV_VAR) {
			Some(path) => {
				let path = PathBuf::from(path);
				log::info!("Loading playground config from {:?}", path);
				Self::load(&path)
			}
			None => Ok(Self::default()),
		}
	}

	/// The command line seed wins, then the configured seed, then a fresh random one.
	pub fn resolve_seed(&self, arg: Option<&str>) -> u64 {
		let from_arg = arg.and_then(|arg| match arg.parse::<u64>() {
			Ok(seed) => Some(seed),
			Err(err) => {
				log::warn!("Ignoring seed argument {:?}: {}", arg, err);
				None
			}
		});

		from_arg.or(self.seed).unwrap_or_else(rand::random)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_json_keeps_defaults() {
		let config = PlaygroundConfig::from_json(
			Path::new("inline.json"),
			r#"{ "seed": 7, "tree": { "ornament_count": 40 } }"#,
		)
		.unwrap();

		assert_eq!(config.seed, Some(7));
		assert_eq!(config.tree.ornament_count, 40);
		assert_eq!(config.tree.layers.len(), 4);
		assert_eq!(config.controls, SceneControls::default());
	}

	#[test]
	fn test_empty_json_is_default() {
		let config = PlaygroundConfig::from_json(Path::new("inline.json"), "{}").unwrap();
		assert_eq!(config, PlaygroundConfig::default());
	}

	#[test]
	fn test_negative_speed_is_paused() {
		let config = PlaygroundConfig::from_json(
			Path::new("inline.json"),
			r#"{ "controls": { "illumination": false, "rotation_speed": -3.0 } }"#,
		)
		.unwrap();
		assert!(!config.controls.illumination);
		assert_eq!(config.controls.rotation_speed(), 0.0);
	}

	#[test]
	fn test_malformed_json_is_a_parse_error() {
		let err = PlaygroundConfig::from_json(Path::new("broken.json"), "{ seed: ").unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
		assert!(err.to_string().contains("broken.json"));
	}

	#[test]
	fn test_missing_file_is_an_io_error() {
		let err = PlaygroundConfig::load(Path::new("/nonexistent/evergreen.json")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn test_seed_precedence() {
		let config = PlaygroundConfig { seed: Some(5), ..Default::default() };
		assert_eq!(config.resolve_seed(Some("9")), 9);
		assert_eq!(config.resolve_seed(None), 5);
		assert_eq!(config.resolve_seed(Some("not-a-seed")), 5);
	}
}

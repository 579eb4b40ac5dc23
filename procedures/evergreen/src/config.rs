use crate::envelope::ConicEnvelope;
use crate::garland::GarlandConfig;
use crate::layers::{reference_layers, LayerSpec};
use crate::tree::meshes::trunk::Trunk;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything that shapes the generated tree. Defaults reproduce the reference tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
	/// Cone the ornaments are scattered over.
	pub envelope: ConicEnvelope,
	pub ornament_count: usize,
	/// Authored shells, base to apex.
	pub layers: Vec<LayerSpec>,
	/// Radial segments of each shell cone.
	pub shell_segments: u32,
	pub garland: GarlandConfig,
	pub trunk: Trunk,
	pub star_position: Vec3,
	pub star_radius: f32,
	pub star_glow_radius: f32,
	/// Reach of the light inside the star.
	pub star_light_range: f32,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			envelope: ConicEnvelope::default(),
			ornament_count: 120,
			layers: reference_layers(),
			shell_segments: 8,
			garland: GarlandConfig::default(),
			trunk: Trunk::default(),
			star_position: Vec3::new(0.0, 5.8, 0.0),
			star_radius: 0.4,
			star_glow_radius: 0.45,
			star_light_range: 5.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reference_defaults() {
		let config = TreeConfig::default();
		assert_eq!(config.ornament_count, 120);
		assert_eq!(config.envelope, ConicEnvelope::new(2.5, 7.0));
		assert_eq!(config.layers.len(), 4);
		assert_eq!(config.garland.turns, 3.5);
		assert_eq!(config.garland.sample_count, 100);
	}
}

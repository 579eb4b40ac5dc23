use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

pub const CONE_RADIUS_FACTOR: f32 = 1.8;
pub const CONE_HEIGHT_FACTOR: f32 = 2.0;
pub const TRIM_RING_RADIUS_FACTOR: f32 = 1.75;
pub const TRIM_RING_TUBE_FACTOR: f32 = 0.04;
/// Raises the trim ring just above the base of its shell.
pub const TRIM_RING_LIFT: f32 = 0.05;

/// One authored layer of the tree silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
	pub position: Vec3,
	pub scale: f32,
	pub rotation_rad: f32,
}

impl LayerSpec {
	pub fn new(position: Vec3, scale: f32, rotation_rad: f32) -> Self {
		Self { position, scale, rotation_rad }
	}
}

/// The four shells of the reference tree, base to apex.
pub fn reference_layers() -> Vec<LayerSpec> {
	vec![
		LayerSpec::new(Vec3::new(0.0, 1.0, 0.0), 1.4, 0.0),
		LayerSpec::new(Vec3::new(0.0, 2.5, 0.0), 1.1, FRAC_PI_4),
		LayerSpec::new(Vec3::new(0.0, 3.8, 0.0), 0.8, 0.0),
		LayerSpec::new(Vec3::new(0.0, 4.8, 0.0), 0.5, FRAC_PI_4),
	]
}

/// A conic shell and the trim ring around its base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellDescriptor {
	pub cone_radius: f32,
	pub cone_height: f32,
	pub position: Vec3,
	pub rotation_rad: f32,
	pub trim_ring_radius: f32,
	pub trim_ring_tube_radius: f32,
	/// Absolute height of the trim ring.
	pub trim_ring_height: f32,
}

impl ShellDescriptor {
	pub fn from_spec(spec: &LayerSpec) -> Self {
		Self {
			cone_radius: CONE_RADIUS_FACTOR * spec.scale,
			cone_height: CONE_HEIGHT_FACTOR * spec.scale,
			position: spec.position,
			rotation_rad: spec.rotation_rad,
			trim_ring_radius: TRIM_RING_RADIUS_FACTOR * spec.scale,
			trim_ring_tube_radius: TRIM_RING_TUBE_FACTOR * spec.scale,
			trim_ring_height: spec.position.y - spec.scale + TRIM_RING_LIFT,
		}
	}

	pub fn cone_transform(&self) -> Transform {
		Transform::from_translation(self.position)
			.with_rotation(Quat::from_rotation_y(self.rotation_rad))
	}

	pub fn trim_ring_transform(&self) -> Transform {
		Transform::from_xyz(self.position.x, self.trim_ring_height, self.position.z)
			.with_rotation(Quat::from_rotation_y(self.rotation_rad))
	}
}

/// One shell per spec, in order. Overlap and monotonicity are the caller's concern.
pub fn build_layers(specs: &[LayerSpec]) -> Vec<ShellDescriptor> {
	specs.iter().map(ShellDescriptor::from_spec).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_one_shell_per_spec_in_order() {
		let specs = reference_layers();
		let shells = build_layers(&specs);

		assert_eq!(shells.len(), specs.len());
		for (spec, shell) in specs.iter().zip(&shells) {
			assert_eq!(shell.position, spec.position);
			assert_eq!(shell.rotation_rad, spec.rotation_rad);
			assert_eq!(shell.cone_radius, 1.8 * spec.scale);
			assert_eq!(shell.trim_ring_radius, 1.75 * spec.scale);
			assert_eq!(shell.cone_height, 2.0 * spec.scale);
		}
	}

	#[test]
	fn test_trim_ring_sits_at_shell_base() {
		let shell = ShellDescriptor::from_spec(&LayerSpec::new(Vec3::new(0.0, 1.0, 0.0), 1.4, 0.0));
		assert!((shell.trim_ring_height - (1.0 - 1.4 + 0.05)).abs() < 1e-6);
		assert!((shell.trim_ring_transform().translation.y - shell.trim_ring_height).abs() < 1e-6);
	}

	#[test]
	fn test_empty_and_unordered_specs_pass_through() {
		assert!(build_layers(&[]).is_empty());

		// growing scales are not rejected
		let specs = [
			LayerSpec::new(Vec3::ZERO, 0.5, 0.0),
			LayerSpec::new(Vec3::Y, 2.0, 1.0),
		];
		let shells = build_layers(&specs);
		assert_eq!(shells[0].cone_radius, 0.9);
		assert_eq!(shells[1].cone_radius, 3.6);
	}

	#[test]
	fn test_reference_layers_taper() {
		let specs = reference_layers();
		assert_eq!(specs.len(), 4);
		for pair in specs.windows(2) {
			assert!(pair[1].scale < pair[0].scale);
			assert!(pair[1].position.y > pair[0].position.y);
		}
	}
}

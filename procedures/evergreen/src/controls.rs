use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The two externally adjustable scene parameters.
///
/// Written by the UI, read by the per-frame systems. Generators never read it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneControls {
	pub illumination: bool,
	rotation_speed: f32,
}

impl SceneControls {
	pub fn new(illumination: bool, rotation_speed: f32) -> Self {
		Self { illumination, rotation_speed: sanitize_speed(rotation_speed) }
	}

	pub fn rotation_speed(&self) -> f32 {
		self.rotation_speed
	}

	/// Accepts any speed; negative and non-finite speeds are treated as paused.
	pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
		self.rotation_speed = sanitize_speed(rotation_speed);
	}

	pub fn toggle_illumination(&mut self) {
		self.illumination = !self.illumination;
	}

	/// The preset matching the current speed, if any.
	pub fn preset(&self) -> Option<RotationPreset> {
		RotationPreset::ALL.into_iter().find(|preset| preset.speed() == self.rotation_speed)
	}
}

impl Default for SceneControls {
	fn default() -> Self {
		Self { illumination: true, rotation_speed: RotationPreset::Slow.speed() }
	}
}

fn sanitize_speed(speed: f32) -> f32 {
	if speed.is_finite() {
		speed.max(0.0)
	} else {
		0.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationPreset {
	Paused,
	Slow,
	Fast,
}

impl RotationPreset {
	pub const ALL: [RotationPreset; 3] =
		[RotationPreset::Paused, RotationPreset::Slow, RotationPreset::Fast];

	pub fn speed(&self) -> f32 {
		match self {
			RotationPreset::Paused => 0.0,
			RotationPreset::Slow => 0.5,
			RotationPreset::Fast => 2.0,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			RotationPreset::Paused => "Pause",
			RotationPreset::Slow => "Slow",
			RotationPreset::Fast => "Fast",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let controls = SceneControls::default();
		assert!(controls.illumination);
		assert_eq!(controls.rotation_speed(), 0.5);
		assert_eq!(controls.preset(), Some(RotationPreset::Slow));
	}

	#[test]
	fn test_any_non_negative_speed_is_accepted() {
		let mut controls = SceneControls::default();
		controls.set_rotation_speed(1.25);
		assert_eq!(controls.rotation_speed(), 1.25);
		assert_eq!(controls.preset(), None);

		controls.set_rotation_speed(-3.0);
		assert_eq!(controls.rotation_speed(), 0.0);
		assert_eq!(controls.preset(), Some(RotationPreset::Paused));

		controls.set_rotation_speed(f32::NAN);
		assert_eq!(controls.rotation_speed(), 0.0);
	}

	#[test]
	fn test_toggle() {
		let mut controls = SceneControls::new(false, 2.0);
		controls.toggle_illumination();
		assert!(controls.illumination);
		assert_eq!(controls.preset(), Some(RotationPreset::Fast));
	}
}

use bevy::prelude::*;
use rand::Rng;

/// Upper bound of the random time offset that desynchronises hovering objects.
pub const MAX_TIME_OFFSET: f32 = 10_000.0;

/// Gentle bobbing and swaying of an object around its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverMotion {
	pub speed: f32,
	pub rotation_intensity: f32,
	pub float_intensity: f32,
	/// Vertical range before `float_intensity` is applied.
	pub floating_range: (f32, f32),
	pub time_offset: f32,
}

impl Default for HoverMotion {
	fn default() -> Self {
		Self {
			speed: 1.5,
			rotation_intensity: 0.1,
			float_intensity: 0.2,
			floating_range: (-0.1, 0.1),
			time_offset: 0.0,
		}
	}
}

impl HoverMotion {
	pub fn with_random_offset<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
		self.time_offset = rng.gen::<f32>() * MAX_TIME_OFFSET;
		self
	}

	/// Offset from the anchor at `elapsed` seconds.
	pub fn offset_at(&self, elapsed: f32) -> Transform {
		let phase = (self.time_offset + elapsed) / 4.0 * self.speed;
		let (sin, cos) = phase.sin_cos();

		let rotation = Quat::from_euler(
			EulerRot::XYZ,
			cos / 8.0 * self.rotation_intensity,
			sin / 8.0 * self.rotation_intensity,
			sin / 20.0 * self.rotation_intensity,
		);

		let (low, high) = self.floating_range;
		let y = remap(sin / 10.0, -0.1, 0.1, low, high) * self.float_intensity;

		Transform::from_xyz(0.0, y, 0.0).with_rotation(rotation)
	}
}

fn remap(value: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
	to_low + (value - from_low) * (to_high - to_low) / (from_high - from_low)
}

/// Hovers an entity around `anchor`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hover {
	pub motion: HoverMotion,
	pub anchor: Transform,
}

pub fn apply_hover(time: Res<Time>, mut query: Query<(&Hover, &mut Transform)>) {
	let elapsed = time.elapsed_secs();
	for (hover, mut transform) in &mut query {
		*transform = hover.anchor.mul_transform(hover.motion.offset_at(elapsed));
	}
}

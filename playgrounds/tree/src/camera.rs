use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use evergreen::SceneControls;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

pub const MIN_POLAR: f32 = FRAC_PI_3;
pub const MAX_POLAR: f32 = PI / 1.8;
pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 15.0;

/// Camera height oscillates around this.
pub const BREATHING_BASE: f32 = 2.0;
pub const BREATHING_AMPLITUDE: f32 = 0.5;
pub const BREATHING_RATE: f32 = 0.1;

/// Orbit around a fixed target, driven by auto-rotation, mouse drag and wheel zoom.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
	pub target: Vec3,
	/// Angle around the vertical axis, in radians.
	pub azimuth: f32,
	/// Angle down from the vertical axis, in radians.
	pub polar: f32,
	pub distance: f32,
	pub sensitivity: f32,
	pub zoom_step: f32,
}

impl Default for OrbitCamera {
	fn default() -> Self {
		Self {
			target: Vec3::new(0.0, 1.5, 0.0),
			azimuth: 0.0,
			polar: FRAC_PI_2,
			distance: 10.0,
			sensitivity: 0.005,
			zoom_step: 0.5,
		}
	}
}

impl OrbitCamera {
	/// Radians per second of auto-rotation; one full turn takes a minute at speed 1.
	pub fn auto_rotate_rate(speed: f32) -> f32 {
		speed * TAU / 60.0
	}

	pub fn auto_rotate(&mut self, speed: f32, delta_secs: f32) {
		self.azimuth = (self.azimuth + Self::auto_rotate_rate(speed) * delta_secs).rem_euclid(TAU);
	}

	pub fn orbit(&mut self, drag: Vec2) {
		self.azimuth = (self.azimuth - drag.x * self.sensitivity).rem_euclid(TAU);
		self.polar = (self.polar - drag.y * self.sensitivity).clamp(MIN_POLAR, MAX_POLAR);
	}

	/// Positive scroll moves closer.
	pub fn zoom(&mut self, scroll: f32) {
		self.distance = (self.distance - scroll * self.zoom_step).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	pub fn orbit_position(&self) -> Vec3 {
		let (sin_polar, cos_polar) = self.polar.sin_cos();
		let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
		self.target
			+ Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth) * self.distance
	}

	/// Camera height at `elapsed` seconds.
	pub fn breathing_height(elapsed: f32) -> f32 {
		BREATHING_BASE + (elapsed * BREATHING_RATE).sin() * BREATHING_AMPLITUDE
	}

	/// The orbit position with its height replaced by the breathing height, facing the target.
	pub fn transform_at(&self, elapsed: f32) -> Transform {
		let mut position = self.orbit_position();
		position.y = Self::breathing_height(elapsed);
		Transform::from_translation(position).looking_at(self.target, Vec3::Y)
	}
}

pub fn setup_camera(mut commands: Commands) {
	let orbit = OrbitCamera::default();
	let transform = orbit.transform_at(0.0);

	log::info!("Setting up camera at {:?}, orbiting {:?}", transform.translation, orbit.target);

	commands.spawn((
		Camera3d::default(),
		transform,
		Projection::Perspective(PerspectiveProjection {
			fov: 45.0_f32.to_radians(),
			near: 0.1,
			far: 200.0,
			..default()
		}),
		orbit,
	));
}

pub fn orbit_camera(
	time: Res<Time>,
	controls: Res<SceneControls>,
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mouse_motion: Res<AccumulatedMouseMotion>,
	mouse_scroll: Res<AccumulatedMouseScroll>,
	mut query: Query<(&mut Transform, &mut OrbitCamera), With<Camera3d>>,
) {
	let Ok((mut transform, mut orbit)) = query.single_mut() else {
		return;
	};

	orbit.auto_rotate(controls.rotation_speed(), time.delta_secs());
	if mouse_buttons.pressed(MouseButton::Left) {
		orbit.orbit(mouse_motion.delta);
	}
	if mouse_scroll.delta.y != 0.0 {
		orbit.zoom(mouse_scroll.delta.y);
	}

	*transform = orbit.transform_at(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_auto_rotate_rate() {
		assert_eq!(OrbitCamera::auto_rotate_rate(0.0), 0.0);
		assert!((OrbitCamera::auto_rotate_rate(1.0) * 60.0 - TAU).abs() < 1e-5);

		let mut orbit = OrbitCamera::default();
		orbit.auto_rotate(2.0, 15.0);
		assert!((orbit.azimuth - PI).abs() < 1e-4);

		let mut paused = OrbitCamera::default();
		paused.auto_rotate(0.0, 100.0);
		assert_eq!(paused.azimuth, 0.0);
	}

	#[test]
	fn test_polar_is_clamped() {
		let mut orbit = OrbitCamera::default();
		orbit.orbit(Vec2::new(0.0, 10_000.0));
		assert_eq!(orbit.polar, MIN_POLAR);
		orbit.orbit(Vec2::new(0.0, -10_000.0));
		assert_eq!(orbit.polar, MAX_POLAR);
	}

	#[test]
	fn test_zoom_is_clamped() {
		let mut orbit = OrbitCamera::default();
		orbit.zoom(1_000.0);
		assert_eq!(orbit.distance, MIN_DISTANCE);
		orbit.zoom(-1_000.0);
		assert_eq!(orbit.distance, MAX_DISTANCE);
	}

	#[test]
	fn test_default_orbit_looks_at_tree_from_front() {
		let orbit = OrbitCamera::default();
		let position = orbit.orbit_position();
		assert!((position - Vec3::new(0.0, 1.5, 10.0)).length() < 1e-4);
	}

	#[test]
	fn test_breathing_height() {
		assert_eq!(OrbitCamera::breathing_height(0.0), 2.0);
		for t in [0.0, 3.0, 15.7, 100.0, 5_000.0] {
			let y = OrbitCamera::breathing_height(t);
			assert!((1.5..=2.5).contains(&y));
			assert_eq!(OrbitCamera::default().transform_at(t).translation.y, y);
		}
	}
}

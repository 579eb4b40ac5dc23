use crate::controls::SceneControls;
use bevy::prelude::*;
use rand::Rng;

pub const TWINKLE_BASELINE: f32 = 0.8;
pub const TWINKLE_AMPLITUDE: f32 = 0.4;

pub const PHASE_OFFSET_RANGE: f32 = 100.0;
pub const MIN_ANGULAR_SPEED: f32 = 0.5;
/// Angular speeds are drawn from `[MIN_ANGULAR_SPEED, MIN_ANGULAR_SPEED + ANGULAR_SPEED_SPREAD)`.
pub const ANGULAR_SPEED_SPREAD: f32 = 1.0;

/// Per-light oscillation parameters, drawn once when the light is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinkleState {
	pub phase_offset: f32,
	pub angular_speed: f32,
}

impl TwinkleState {
	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::resolve(None, None, rng)
	}

	/// Fills in whichever parameter is missing with a fresh draw.
	pub fn resolve<R: Rng + ?Sized>(
		phase_offset: Option<f32>,
		angular_speed: Option<f32>,
		rng: &mut R,
	) -> Self {
		let angular_speed = angular_speed
			.unwrap_or_else(|| MIN_ANGULAR_SPEED + rng.gen::<f32>() * ANGULAR_SPEED_SPREAD);
		let phase_offset =
			phase_offset.unwrap_or_else(|| rng.gen::<f32>() * PHASE_OFFSET_RANGE);
		Self { phase_offset, angular_speed }
	}
}

/// Scale of a light at `elapsed` seconds.
///
/// Illuminated lights pulse between 0.4 and 1.2 times their base size. Dark lights
/// sit at exactly their base size.
pub fn twinkle_scale(base_size: f32, state: &TwinkleState, elapsed: f32, illuminated: bool) -> f32 {
	if !illuminated {
		return base_size;
	}

	let wave = (elapsed * state.angular_speed + state.phase_offset).sin();
	base_size * (TWINKLE_BASELINE + wave * TWINKLE_AMPLITUDE)
}

/// Marks a light instance and carries what it needs to twinkle.
#[derive(Component, Debug, Clone, Copy)]
pub struct Twinkle {
	pub state: TwinkleState,
	pub base_size: f32,
}

impl Twinkle {
	pub fn scale_at(&self, elapsed: f32, illuminated: bool) -> f32 {
		twinkle_scale(self.base_size, &self.state, elapsed, illuminated)
	}
}

pub fn animate_twinkles(
	time: Res<Time>,
	controls: Res<SceneControls>,
	mut query: Query<(&Twinkle, &mut Transform)>,
) {
	let elapsed = time.elapsed_secs();
	for (twinkle, mut transform) in &mut query {
		transform.scale = Vec3::splat(twinkle.scale_at(elapsed, controls.illumination));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	#[test]
	fn test_dark_lights_hold_base_size() {
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..100 {
			let state = TwinkleState::random(&mut rng);
			for t in [0.0, 0.016, 1.0, 37.5, 10_000.0] {
				assert_eq!(twinkle_scale(0.08, &state, t, false), 0.08);
			}
		}
	}

	#[test]
	fn test_lit_lights_stay_in_band() {
		let mut rng = StdRng::seed_from_u64(12);
		let base = 0.08;
		for _ in 0..200 {
			let state = TwinkleState::random(&mut rng);
			for step in 0..500 {
				let scale = twinkle_scale(base, &state, step as f32 * 0.05, true);
				assert!(scale >= 0.4 * base - 1e-6, "{} below band", scale);
				assert!(scale <= 1.2 * base + 1e-6, "{} above band", scale);
			}
		}
	}

	#[test]
	fn test_random_state_ranges() {
		let mut rng = StdRng::seed_from_u64(13);
		for _ in 0..1_000 {
			let state = TwinkleState::random(&mut rng);
			assert!((0.0..100.0).contains(&state.phase_offset));
			assert!((0.5..1.5).contains(&state.angular_speed));
		}
	}

	#[test]
	fn test_resolve_keeps_given_values() {
		let mut rng = StdRng::seed_from_u64(14);
		let state = TwinkleState::resolve(Some(3.0), Some(0.75), &mut rng);
		assert_eq!(state, TwinkleState { phase_offset: 3.0, angular_speed: 0.75 });

		let partial = TwinkleState::resolve(Some(3.0), None, &mut rng);
		assert_eq!(partial.phase_offset, 3.0);
		assert!((0.5..1.5).contains(&partial.angular_speed));
	}

	#[test]
	fn test_known_phase() {
		// sin(π/2) = 1 puts the light at its peak
		let state =
			TwinkleState { phase_offset: std::f32::consts::FRAC_PI_2, angular_speed: 1.0 };
		assert!((twinkle_scale(1.0, &state, 0.0, true) - 1.2).abs() < 1e-6);
	}

	#[test]
	fn test_animate_twinkles_system() {
		let mut app = App::new();
		app.insert_resource(Time::<()>::default());
		app.insert_resource(SceneControls::new(false, 0.5));
		app.add_systems(Update, animate_twinkles);

		let state = TwinkleState { phase_offset: 1.0, angular_speed: 1.0 };
		let light = app
			.world_mut()
			.spawn((Twinkle { state, base_size: 0.08 }, Transform::from_scale(Vec3::splat(0.5))))
			.id();

		app.update();

		let transform = app.world().get::<Transform>(light).unwrap();
		assert_eq!(transform.scale, Vec3::splat(0.08));
	}
}

use bevy::prelude::*;
use evergreen::SceneControls;

/// Converts the rig's authored intensities into Bevy lumens.
pub const LUMENS_PER_UNIT: f32 = 10_000.0;

pub const KEY_INTENSITY_ON: f32 = 200.0;
pub const KEY_INTENSITY_OFF: f32 = 50.0;
pub const FILL_INTENSITY: f32 = 100.0;
pub const RIM_INTENSITY: f32 = 10.0;

/// The warm spot light whose strength follows the illumination flag.
#[derive(Component, Debug, Clone, Copy)]
pub struct KeyLight;

pub fn key_intensity(illuminated: bool) -> f32 {
	let intensity = if illuminated { KEY_INTENSITY_ON } else { KEY_INTENSITY_OFF };
	intensity * LUMENS_PER_UNIT
}

pub fn setup_lighting(mut commands: Commands, controls: Res<SceneControls>) {
	log::info!("Setting up lighting rig");

	// dim emerald fill everywhere
	commands.insert_resource(AmbientLight {
		color: Color::srgb_u8(0x00, 0x1a, 0x0f),
		brightness: 100.0,
		affects_lightmapped_meshes: true,
	});

	// warm gold key
	commands.spawn((
		SpotLight {
			intensity: key_intensity(controls.illumination),
			color: Color::srgb_u8(0xff, 0xf0, 0xd6),
			range: 40.0,
			outer_angle: 0.25,
			inner_angle: 0.0,
			shadows_enabled: true,
			..default()
		},
		Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
		KeyLight,
	));

	// cool emerald fill from behind
	commands.spawn((
		SpotLight {
			intensity: FILL_INTENSITY * LUMENS_PER_UNIT,
			color: Color::srgb_u8(0x00, 0x42, 0x25),
			range: 40.0,
			outer_angle: 0.5,
			inner_angle: 0.0,
			..default()
		},
		Transform::from_xyz(-10.0, 5.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
	));

	// rim for the metal edges
	commands.spawn((
		PointLight {
			intensity: RIM_INTENSITY * LUMENS_PER_UNIT,
			color: Color::srgb_u8(0xbc, 0xe6, 0xeb),
			..default()
		},
		Transform::from_xyz(0.0, -2.0, 5.0),
	));
}

pub fn apply_key_light(
	controls: Res<SceneControls>,
	mut query: Query<&mut SpotLight, With<KeyLight>>,
) {
	if !controls.is_changed() {
		return;
	}

	for mut light in &mut query {
		light.intensity = key_intensity(controls.illumination);
	}
}

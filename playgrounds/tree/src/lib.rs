use bevy::prelude::*;

pub mod camera;
pub mod config;
mod lighting;
pub mod scene;
pub mod ui;

use evergreen::{
	hover::apply_hover, sparkles::drift_sparkles, tree::apply_illumination,
	twinkle::animate_twinkles, ChristmasTree, SparkleField,
};
use render_item::dispatch_render_items;

pub use camera::OrbitCamera;
pub use config::{ConfigError, PlaygroundConfig};
pub use scene::SceneSetup;

pub struct TreePlugin {
	pub config: PlaygroundConfig,
	pub seed: u64,
}

impl Plugin for TreePlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(ClearColor(Color::srgb_u8(0x02, 0x04, 0x03)))
			.insert_resource(self.config.controls)
			.insert_resource(ui::WishInput::default())
			.insert_resource(SceneSetup::generate(&self.config, self.seed))
			.add_systems(
				Startup,
				(camera::setup_camera, lighting::setup_lighting, ui::setup_ui, scene::setup_scene),
			)
			.add_systems(
				Update,
				(
					(ui::handle_illumination_button, ui::handle_preset_buttons, ui::handle_wish_input),
					(
						camera::orbit_camera,
						lighting::apply_key_light,
						ui::update_controls_display,
						ui::update_wish_display,
						dispatch_render_items::<ChristmasTree>,
						dispatch_render_items::<SparkleField>,
					),
					(animate_twinkles, apply_illumination, apply_hover, drift_sparkles),
				)
					.chain(),
			);
	}
}

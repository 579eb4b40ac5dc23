use crate::config::PlaygroundConfig;
use bevy::prelude::*;
use evergreen::{ChristmasTree, ChristmasTreeBuilder, Hover, HoverMotion, SparkleField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use render_item::DispatchRenderItem;

/// Where the tree stands in the scene.
pub const TREE_ANCHOR: Vec3 = Vec3::new(0.0, -2.0, 0.0);

/// Everything generated up front for one run, consumed by [`setup_scene`].
#[derive(Resource, Clone)]
pub struct SceneSetup {
	pub seed: u64,
	pub tree: ChristmasTree,
	pub sparkles: SparkleField,
	pub hover: HoverMotion,
}

impl SceneSetup {
	pub fn generate(config: &PlaygroundConfig, seed: u64) -> Self {
		let tree = ChristmasTreeBuilder::new(config.tree.clone()).with_seed(Some(seed)).build();

		// scene dressing gets its own stream so it never shifts the tree
		let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
		let sparkles = SparkleField::new(config.sparkles, &mut rng);
		let hover = HoverMotion::default().with_random_offset(&mut rng);

		Self { seed, tree, sparkles, hover }
	}
}

pub fn setup_scene(mut commands: Commands, setup: Res<SceneSetup>) {
	log::info!("Spawning scene for seed {}", setup.seed);

	let anchor = Transform::from_translation(TREE_ANCHOR);
	commands.spawn((
		DispatchRenderItem::new(setup.tree.clone()),
		anchor,
		Visibility::default(),
		Hover { motion: setup.hover, anchor },
	));

	commands.insert_resource(setup.sparkles.clone());
	commands.spawn((
		DispatchRenderItem::new(setup.sparkles.clone()),
		Transform::default(),
		Visibility::default(),
	));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generation_is_seeded() {
		let config = PlaygroundConfig::default();
		let a = SceneSetup::generate(&config, 12345);
		let b = SceneSetup::generate(&config, 12345);

		assert_eq!(a.tree.ornaments(), b.tree.ornaments());
		assert_eq!(a.sparkles.anchors(), b.sparkles.anchors());
		assert_eq!(a.hover, b.hover);
	}

	#[test]
	fn test_scene_spawns_tree_and_sparkles() {
		let mut app = App::new();
		app.insert_resource(SceneSetup::generate(&PlaygroundConfig::default(), 1));
		app.add_systems(Startup, setup_scene);
		app.update();

		let world = app.world_mut();
		let trees = world.query::<(&DispatchRenderItem<ChristmasTree>, &Hover)>().iter(world).count();
		let fields = world.query::<&DispatchRenderItem<SparkleField>>().iter(world).count();
		assert_eq!(trees, 1);
		assert_eq!(fields, 1);
		assert!(world.get_resource::<SparkleField>().is_some());
	}
}

pub mod meshes;

use crate::config::TreeConfig;
use crate::controls::SceneControls;
use crate::layers::{build_layers, ShellDescriptor};
use crate::ornaments::{DecorationInstance, OrnamentCache, OrnamentCategory};
use crate::style::{Palette, SurfaceStyle, LIGHT_EMISSIVE_ON};
use crate::twinkle::{Twinkle, TwinkleState};
use bevy::prelude::*;
use meshes::{
	bauble::Bauble,
	garland::GarlandTube,
	shell::{ShellCone, TrimRing},
	trunk::Trunk,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use render_item::{
	mesh::{cache::handle::map::HandleMap, handle::MeshHandle, MeshFetcher},
	RenderItem,
};
use std::sync::Arc;

/// Decorrelates the twinkle draws from the scatter draws of the same seed.
const TWINKLE_SEED_SALT: u64 = 0x7457_696e_6b6c_65;

/// Luminous power of the light inside the star while illuminated.
pub const STAR_LIGHT_INTENSITY: f32 = 200_000.0;

/// Category of a spawned ornament.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ornament {
	pub category: OrnamentCategory,
}

/// A light bulb whose glow follows the illumination flag.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bulb {
	pub glow: SurfaceStyle,
}

/// The light inside the star; dark while illumination is off.
#[derive(Component, Debug, Clone, Copy)]
pub struct StarLight;

pub struct ChristmasTreeBuilder {
	config: TreeConfig,
	palette: Palette,
	seed: Option<u64>,
	ornament_cache: OrnamentCache,
}

impl ChristmasTreeBuilder {
	pub fn new(config: TreeConfig) -> Self {
		Self { config, palette: Palette::default(), seed: None, ornament_cache: OrnamentCache::new() }
	}

	pub fn with_palette(mut self, palette: Palette) -> Self {
		self.palette = palette;
		self
	}

	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_ornament_cache(mut self, ornament_cache: OrnamentCache) -> Self {
		self.ornament_cache = ornament_cache;
		self
	}

	pub fn build(&self) -> ChristmasTree {
		let shells = build_layers(&self.config.layers);
		let ornaments = self.ornament_cache.scatter(
			self.config.ornament_count,
			&self.config.envelope,
			self.seed,
		);

		let mut rng = match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed ^ TWINKLE_SEED_SALT),
			None => StdRng::from_entropy(),
		};
		let twinkles = ornaments
			.iter()
			.filter(|instance| instance.category == OrnamentCategory::Light)
			.map(|_| TwinkleState::random(&mut rng))
			.collect();

		log::info!(
			"Built tree with {} shells and {} ornaments (seed {:?})",
			shells.len(),
			ornaments.len(),
			self.seed
		);

		ChristmasTree {
			config: self.config.clone(),
			palette: self.palette,
			shells,
			ornaments,
			twinkles,
			bauble_cache: HandleMap::new(),
			shell_cache: HandleMap::new(),
			ring_cache: HandleMap::new(),
			garland_cache: HandleMap::new(),
			trunk_cache: HandleMap::new(),
		}
	}
}

/// The generated tree, ready to be spawned.
#[derive(Component, Clone)]
pub struct ChristmasTree {
	config: TreeConfig,
	palette: Palette,
	shells: Vec<ShellDescriptor>,
	ornaments: Arc<Vec<DecorationInstance>>,
	/// One per light, in scatter order.
	twinkles: Vec<TwinkleState>,
	bauble_cache: HandleMap<Bauble>,
	shell_cache: HandleMap<ShellCone>,
	ring_cache: HandleMap<TrimRing>,
	garland_cache: HandleMap<GarlandTube>,
	trunk_cache: HandleMap<Trunk>,
}

impl ChristmasTree {
	pub fn config(&self) -> &TreeConfig {
		&self.config
	}

	pub fn shells(&self) -> &[ShellDescriptor] {
		&self.shells
	}

	pub fn ornaments(&self) -> &[DecorationInstance] {
		&self.ornaments
	}

	/// Each light paired with its twinkle parameters.
	pub fn lights(&self) -> impl Iterator<Item = (&DecorationInstance, &TwinkleState)> {
		self.ornaments
			.iter()
			.filter(|instance| instance.category == OrnamentCategory::Light)
			.zip(self.twinkles.iter())
	}

	fn fetch_bauble(&self, bauble: Bauble, meshes: &mut Assets<Mesh>) -> Option<Handle<Mesh>> {
		MeshHandle::new(bauble).with_handle_cache(self.bauble_cache.clone()).fetch_mesh(meshes)
	}

	pub fn spawn_shells(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		emerald: &Handle<StandardMaterial>,
		gold: &Handle<StandardMaterial>,
	) -> Vec<Entity> {
		let mut entities = Vec::new();
		for shell in &self.shells {
			let cone = MeshHandle::new(ShellCone::from_descriptor(shell, self.config.shell_segments))
				.with_handle_cache(self.shell_cache.clone());
			if let Some(mesh) = cone.fetch_mesh(meshes) {
				entities.push(
					commands
						.spawn((Mesh3d(mesh), MeshMaterial3d(emerald.clone()), shell.cone_transform()))
						.id(),
				);
			}

			let ring = MeshHandle::new(TrimRing::from_descriptor(shell))
				.with_handle_cache(self.ring_cache.clone());
			if let Some(mesh) = ring.fetch_mesh(meshes) {
				entities.push(
					commands
						.spawn((Mesh3d(mesh), MeshMaterial3d(gold.clone()), shell.trim_ring_transform()))
						.id(),
				);
			}
		}
		entities
	}

	pub fn spawn_ornaments(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Vec<Entity> {
		let mut entities = Vec::with_capacity(self.ornaments.len());

		// one shared material per category
		let gold = materials.add(self.palette.ornament(OrnamentCategory::Gold).standard_material());
		let red = materials.add(self.palette.ornament(OrnamentCategory::Red).standard_material());
		let light = materials.add(self.palette.ornament(OrnamentCategory::Light).standard_material());

		if let Some(mesh) = self.fetch_bauble(Bauble::ornament(), meshes) {
			for instance in self.ornaments.iter() {
				let material = match instance.category {
					OrnamentCategory::Gold => &gold,
					OrnamentCategory::Red => &red,
					OrnamentCategory::Light => continue,
				};
				entities.push(
					commands
						.spawn((
							Mesh3d(mesh.clone()),
							MeshMaterial3d(material.clone()),
							Transform::from_translation(instance.position)
								.with_scale(Vec3::splat(instance.size)),
							Ornament { category: instance.category },
						))
						.id(),
				);
			}
		}

		if let Some(mesh) = self.fetch_bauble(Bauble::light(), meshes) {
			for (instance, state) in self.lights() {
				entities.push(
					commands
						.spawn((
							Mesh3d(mesh.clone()),
							MeshMaterial3d(light.clone()),
							Transform::from_translation(instance.position)
								.with_scale(Vec3::splat(instance.size)),
							Ornament { category: instance.category },
							Twinkle { state: *state, base_size: instance.size },
							Bulb { glow: self.palette.light },
						))
						.id(),
				);
			}
		}

		entities
	}

	pub fn spawn_garland(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		gold: &Handle<StandardMaterial>,
	) -> Option<Entity> {
		let mesh = MeshHandle::new(GarlandTube::new(self.config.garland))
			.with_handle_cache(self.garland_cache.clone())
			.fetch_mesh(meshes)?;

		Some(
			commands
				.spawn((
					Mesh3d(mesh),
					MeshMaterial3d(gold.clone()),
					Transform::from_xyz(0.0, self.config.garland.lift, 0.0),
				))
				.id(),
		)
	}

	pub fn spawn_star(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
		gold: &Handle<StandardMaterial>,
	) -> Vec<Entity> {
		let mut entities = Vec::new();
		let position = self.config.star_position;

		if let Some(mesh) = self.fetch_bauble(Bauble::faceted(), meshes) {
			let glow = materials.add(self.palette.star_glow.standard_material());
			entities.push(
				commands
					.spawn((
						Mesh3d(mesh.clone()),
						MeshMaterial3d(gold.clone()),
						Transform::from_translation(position)
							.with_scale(Vec3::splat(self.config.star_radius)),
					))
					.id(),
			);
			entities.push(
				commands
					.spawn((
						Mesh3d(mesh),
						MeshMaterial3d(glow),
						Transform::from_translation(position)
							.with_scale(Vec3::splat(self.config.star_glow_radius)),
					))
					.id(),
			);
		}

		entities.push(
			commands
				.spawn((
					PointLight {
						intensity: STAR_LIGHT_INTENSITY,
						range: self.config.star_light_range,
						color: Color::srgb_u8(0xff, 0xaa, 0x00),
						..default()
					},
					Transform::from_translation(position),
					StarLight,
				))
				.id(),
		);

		entities
	}

	pub fn spawn_trunk(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Option<Entity> {
		let mesh = MeshHandle::new(self.config.trunk)
			.with_handle_cache(self.trunk_cache.clone())
			.fetch_mesh(meshes)?;
		let material = materials.add(self.palette.trunk.standard_material());

		Some(commands.spawn((Mesh3d(mesh), MeshMaterial3d(material), Transform::default())).id())
	}
}

impl RenderItem for ChristmasTree {
	fn spawn_render_items(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Vec<Entity> {
		log::info!("Spawning tree");

		let emerald = materials.add(self.palette.emerald.standard_material());
		let gold = materials.add(self.palette.gold.standard_material());

		let mut entities = self.spawn_shells(commands, meshes, &emerald, &gold);
		entities.extend(self.spawn_ornaments(commands, meshes, materials));
		entities.extend(self.spawn_garland(commands, meshes, &gold));
		entities.extend(self.spawn_star(commands, meshes, materials, &gold));
		entities.extend(self.spawn_trunk(commands, meshes, materials));
		entities
	}
}

/// Brings bulb glow and the star light in line with the illumination flag.
///
/// Runs whenever the flag changes or new bulbs appear.
pub fn apply_illumination(
	controls: Res<SceneControls>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	bulbs: Query<(&Bulb, &MeshMaterial3d<StandardMaterial>)>,
	added: Query<(), Added<Bulb>>,
	mut star_lights: Query<&mut PointLight, With<StarLight>>,
) {
	if !controls.is_changed() && added.is_empty() {
		return;
	}

	let intensity = if controls.illumination { LIGHT_EMISSIVE_ON } else { 0.0 };
	for (bulb, material) in &bulbs {
		if let Some(material) = materials.get_mut(&material.0) {
			material.emissive = bulb.glow.emissive_at(intensity);
		}
	}

	for mut light in &mut star_lights {
		light.intensity = if controls.illumination { STAR_LIGHT_INTENSITY } else { 0.0 };
	}

	log::debug!("Illumination {}", if controls.illumination { "on" } else { "off" });
}

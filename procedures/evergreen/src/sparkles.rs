use crate::style::{Palette, SurfaceStyle};
use crate::tree::meshes::bauble::Bauble;
use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use render_item::{
	mesh::{cache::handle::map::HandleMap, handle::MeshHandle, MeshFetcher},
	RenderItem,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Spacing between the noise lanes of the three drift axes.
const AXIS_LANE: f64 = 31.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
	pub count: usize,
	/// Edge of the cube the anchors are spread over.
	pub scale: f32,
	pub center: Vec3,
	/// Time scale of the drift.
	pub speed: f32,
	/// Radius of each mote.
	pub size: f32,
	/// Furthest a mote strays from its anchor along any axis.
	pub drift: f32,
	pub noise_frequency: f32,
}

impl Default for SparkleConfig {
	fn default() -> Self {
		Self {
			count: 200,
			scale: 12.0,
			center: Vec3::new(0.0, 2.0, 0.0),
			speed: 0.4,
			size: 0.03,
			drift: 0.35,
			noise_frequency: 0.25,
		}
	}
}

/// Marks one mote; its index points into the field's anchors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sparkle {
	pub index: usize,
}

/// Motes scattered in a cube around the tree, each wandering about a fixed anchor.
#[derive(Resource, Component, Clone)]
pub struct SparkleField {
	config: SparkleConfig,
	anchors: Arc<Vec<Vec3>>,
	noise: Perlin,
	style: SurfaceStyle,
	mesh_cache: HandleMap<Bauble>,
}

impl SparkleField {
	pub fn new<R: Rng + ?Sized>(config: SparkleConfig, rng: &mut R) -> Self {
		let half = config.scale.max(0.0) * 0.5;
		let anchors: Vec<Vec3> = (0..config.count)
			.map(|_| {
				let offset = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
				config.center + (offset * 2.0 - Vec3::ONE) * half
			})
			.collect();
		let noise = Perlin::new(rng.gen::<u32>());

		log::debug!("Placed {} sparkles", anchors.len());

		Self {
			config,
			anchors: Arc::new(anchors),
			noise,
			style: Palette::default().sparkle,
			mesh_cache: HandleMap::new(),
		}
	}

	pub fn seeded(config: SparkleConfig, seed: u64) -> Self {
		Self::new(config, &mut StdRng::seed_from_u64(seed))
	}

	pub fn with_style(mut self, style: SurfaceStyle) -> Self {
		self.style = style;
		self
	}

	pub fn config(&self) -> &SparkleConfig {
		&self.config
	}

	pub fn anchors(&self) -> &[Vec3] {
		&self.anchors
	}

	pub fn len(&self) -> usize {
		self.anchors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.anchors.is_empty()
	}

	/// Drift of the mote at `index` away from its anchor, each axis within `[-drift, drift]`.
	pub fn drift_at(&self, index: usize, elapsed: f32) -> Option<Vec3> {
		let anchor = self.anchors.get(index)?;
		let frequency = self.config.noise_frequency as f64;
		let t = (elapsed * self.config.speed) as f64;
		let base = [
			anchor.x as f64 * frequency,
			anchor.y as f64 * frequency,
			anchor.z as f64 * frequency,
		];

		let axis = |lane: f64| {
			let value = self.noise.get([base[0] + lane, base[1], base[2], t]);
			value.clamp(-1.0, 1.0) as f32 * self.config.drift
		};

		Some(Vec3::new(axis(0.0), axis(AXIS_LANE), axis(2.0 * AXIS_LANE)))
	}

	pub fn position_at(&self, index: usize, elapsed: f32) -> Option<Vec3> {
		Some(self.anchors.get(index)? + self.drift_at(index, elapsed)?)
	}
}

impl RenderItem for SparkleField {
	fn spawn_render_items(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Vec<Entity> {
		let Some(mesh) =
			MeshHandle::new(Bauble::light()).with_handle_cache(self.mesh_cache.clone()).fetch_mesh(meshes)
		else {
			return Vec::new();
		};
		let material = materials.add(self.style.standard_material());

		log::info!("Spawning {} sparkles", self.anchors.len());

		self.anchors
			.iter()
			.enumerate()
			.map(|(index, anchor)| {
				commands
					.spawn((
						Mesh3d(mesh.clone()),
						MeshMaterial3d(material.clone()),
						Transform::from_translation(*anchor).with_scale(Vec3::splat(self.config.size)),
						Sparkle { index },
					))
					.id()
			})
			.collect()
	}
}

pub fn drift_sparkles(
	time: Res<Time>,
	field: Option<Res<SparkleField>>,
	mut query: Query<(&Sparkle, &mut Transform)>,
) {
	let Some(field) = field else {
		return;
	};

	let elapsed = time.elapsed_secs();
	for (sparkle, mut transform) in &mut query {
		if let Some(position) = field.position_at(sparkle.index, elapsed) {
			transform.translation = position;
		}
	}
}

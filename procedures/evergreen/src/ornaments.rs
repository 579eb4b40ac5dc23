use crate::envelope::ConicEnvelope;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use render_item::cache::MemoCache;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Offset added to the cone radius so ornaments stay off the axis near the apex.
pub const RADIUS_OFFSET: f32 = 0.2;
/// Pulls ornaments slightly inside the envelope so they nestle into the shells.
pub const NESTLE_FACTOR: f32 = 0.85;
/// Lifts the scatter volume to line up with the stacked shells.
pub const VERTICAL_OFFSET: f32 = 0.5;

pub const LIGHT_SIZE: f32 = 0.08;
pub const BAUBLE_MIN_SIZE: f32 = 0.15;
pub const BAUBLE_SIZE_SPREAD: f32 = 0.1;

/// Rolls above this are lights.
const LIGHT_THRESHOLD: f32 = 0.7;
/// Rolls above this (and not lights) are gold.
const GOLD_THRESHOLD: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrnamentCategory {
	Gold,
	Red,
	Light,
}

impl OrnamentCategory {
	pub const ALL: [OrnamentCategory; 3] =
		[OrnamentCategory::Gold, OrnamentCategory::Red, OrnamentCategory::Light];

	/// Maps a uniform roll in [0, 1) onto a category: 30% lights, 30% gold, 40% red.
	pub fn from_roll(roll: f32) -> Self {
		if roll > LIGHT_THRESHOLD {
			OrnamentCategory::Light
		} else if roll > GOLD_THRESHOLD {
			OrnamentCategory::Gold
		} else {
			OrnamentCategory::Red
		}
	}

	/// Lights are small and fixed; baubles draw a size from their band.
	pub fn draw_size<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
		match self {
			OrnamentCategory::Light => LIGHT_SIZE,
			OrnamentCategory::Gold | OrnamentCategory::Red => {
				BAUBLE_MIN_SIZE + rng.gen::<f32>() * BAUBLE_SIZE_SPREAD
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationInstance {
	pub position: Vec3,
	pub size: f32,
	pub category: OrnamentCategory,
}

/// Draws a single decoration: height, angle, category roll and, for baubles, a size.
pub fn scatter_one<R: Rng + ?Sized>(envelope: &ConicEnvelope, rng: &mut R) -> DecorationInstance {
	let y = rng.gen::<f32>() * envelope.height;
	let r = envelope.radius_at(y) + RADIUS_OFFSET;

	let angle = rng.gen::<f32>() * TAU;
	let position = Vec3::new(
		angle.cos() * r * NESTLE_FACTOR,
		y + VERTICAL_OFFSET,
		angle.sin() * r * NESTLE_FACTOR,
	);

	let category = OrnamentCategory::from_roll(rng.gen::<f32>());
	let size = category.draw_size(rng);

	DecorationInstance { position, size, category }
}

/// Scatters `count` decorations over the conic envelope using the given random source.
pub fn scatter_ornaments<R: Rng + ?Sized>(
	count: usize,
	envelope: &ConicEnvelope,
	rng: &mut R,
) -> Vec<DecorationInstance> {
	let instances: Vec<DecorationInstance> =
		(0..count).map(|_| scatter_one(envelope, rng)).collect();
	log::debug!("Scattered {} ornaments over {:?}", instances.len(), envelope);
	instances
}

/// Reproducible scatter: the same seed always yields the same instances.
pub fn scatter_ornaments_seeded(
	count: usize,
	envelope: &ConicEnvelope,
	seed: u64,
) -> Vec<DecorationInstance> {
	let mut rng = StdRng::seed_from_u64(seed);
	scatter_ornaments(count, envelope, &mut rng)
}

pub fn scatter_ornaments_unseeded(
	count: usize,
	envelope: &ConicEnvelope,
) -> Vec<DecorationInstance> {
	scatter_ornaments(count, envelope, &mut rand::thread_rng())
}

/// Parameters a scatter is memoized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrnamentKey {
	count: usize,
	envelope_bits: (u32, u32),
	seed: Option<u64>,
}

impl OrnamentKey {
	pub fn new(count: usize, envelope: &ConicEnvelope, seed: Option<u64>) -> Self {
		Self { count, envelope_bits: envelope.key_bits(), seed }
	}
}

/// Memoizes scatters so they are regenerated only when their parameters change.
#[derive(Debug, Clone, Default)]
pub struct OrnamentCache {
	cache: MemoCache<OrnamentKey, Arc<Vec<DecorationInstance>>>,
}

impl OrnamentCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the memoized scatter for these parameters, scattering on a miss.
	///
	/// Unseeded requests draw from the thread RNG once and are then fixed for this cache.
	pub fn scatter(
		&self,
		count: usize,
		envelope: &ConicEnvelope,
		seed: Option<u64>,
	) -> Arc<Vec<DecorationInstance>> {
		let key = OrnamentKey::new(count, envelope, seed);
		self.cache.get_or_insert_with(key, || {
			let instances = match seed {
				Some(seed) => scatter_ornaments_seeded(count, envelope, seed),
				None => scatter_ornaments_unseeded(count, envelope),
			};
			Arc::new(instances)
		})
	}

	pub fn len(&self) -> usize {
		self.cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}
}

/// Per-category tallies of a scatter.
pub fn category_counts(instances: &[DecorationInstance]) -> [(OrnamentCategory, usize); 3] {
	OrnamentCategory::ALL.map(|category| {
		(category, instances.iter().filter(|instance| instance.category == category).count())
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scatter_count() {
		let envelope = ConicEnvelope::default();
		let mut rng = StdRng::seed_from_u64(7);
		for count in [0, 1, 5, 120, 1000] {
			assert_eq!(scatter_ornaments(count, &envelope, &mut rng).len(), count);
		}
	}

	#[test]
	fn test_zero_count_is_empty() {
		assert!(scatter_ornaments_seeded(0, &ConicEnvelope::default(), 1).is_empty());
		assert!(scatter_ornaments_unseeded(0, &ConicEnvelope::default()).is_empty());
	}

	#[test]
	fn test_category_thresholds() {
		assert_eq!(OrnamentCategory::from_roll(0.0), OrnamentCategory::Red);
		assert_eq!(OrnamentCategory::from_roll(0.4), OrnamentCategory::Red);
		assert_eq!(OrnamentCategory::from_roll(0.41), OrnamentCategory::Gold);
		assert_eq!(OrnamentCategory::from_roll(0.7), OrnamentCategory::Gold);
		assert_eq!(OrnamentCategory::from_roll(0.71), OrnamentCategory::Light);
		assert_eq!(OrnamentCategory::from_roll(0.999), OrnamentCategory::Light);
	}

	#[test]
	fn test_category_proportions_converge() {
		let instances = scatter_ornaments_seeded(100_000, &ConicEnvelope::default(), 2024);
		let total = instances.len() as f32;

		for (category, count) in category_counts(&instances) {
			let share = count as f32 / total;
			let expected = match category {
				OrnamentCategory::Light => 0.3,
				OrnamentCategory::Gold => 0.3,
				OrnamentCategory::Red => 0.4,
			};
			assert!((share - expected).abs() < 0.02, "{:?} share {} off {}", category, share, expected);
		}
	}

	#[test]
	fn test_sizes_follow_category() {
		let instances = scatter_ornaments_seeded(5_000, &ConicEnvelope::default(), 99);
		for instance in instances {
			match instance.category {
				OrnamentCategory::Light => assert_eq!(instance.size, LIGHT_SIZE),
				OrnamentCategory::Gold | OrnamentCategory::Red => {
					assert!(instance.size >= 0.15);
					assert!(instance.size < 0.25 + f32::EPSILON);
				}
			}
		}
	}

	#[test]
	fn test_positions_stay_within_envelope() {
		let envelope = ConicEnvelope::new(2.5, 7.0);
		let instances = scatter_ornaments_seeded(2_000, &envelope, 3);
		for instance in instances {
			let y = instance.position.y - VERTICAL_OFFSET;
			assert!((0.0..=envelope.height).contains(&y));

			let expected = (envelope.depth_fraction(y) * envelope.base_radius + RADIUS_OFFSET)
				* NESTLE_FACTOR;
			let horizontal = Vec2::new(instance.position.x, instance.position.z).length();
			assert!((horizontal - expected).abs() < 1e-3);
		}
	}

	#[test]
	fn test_seeded_scatter_is_reproducible() {
		let envelope = ConicEnvelope::new(2.5, 7.0);
		let a = scatter_ornaments_seeded(1, &envelope, 42);
		let b = scatter_ornaments_seeded(1, &envelope, 42);

		assert_eq!(a.len(), 1);
		assert_eq!(a[0].position.x.to_bits(), b[0].position.x.to_bits());
		assert_eq!(a[0].position.y.to_bits(), b[0].position.y.to_bits());
		assert_eq!(a[0].position.z.to_bits(), b[0].position.z.to_bits());
		assert_eq!(a[0].size.to_bits(), b[0].size.to_bits());
		assert_eq!(a[0].category, b[0].category);
	}

	#[test]
	fn test_different_seeds_differ() {
		let envelope = ConicEnvelope::default();
		assert_ne!(
			scatter_ornaments_seeded(16, &envelope, 1),
			scatter_ornaments_seeded(16, &envelope, 2)
		);
	}

	#[test]
	fn test_degenerate_envelopes_do_not_produce_nan() {
		for envelope in [ConicEnvelope::new(2.5, 0.0), ConicEnvelope::new(0.0, 7.0)] {
			for instance in scatter_ornaments_seeded(200, &envelope, 5) {
				assert!(instance.position.is_finite());
			}
		}

		// a flat envelope puts everything on the lifted base ring
		for instance in scatter_ornaments_seeded(50, &ConicEnvelope::new(2.5, 0.0), 5) {
			assert_eq!(instance.position.y, VERTICAL_OFFSET);
		}
	}

	#[test]
	fn test_cache_memoizes_by_parameters() {
		let cache = OrnamentCache::new();
		let envelope = ConicEnvelope::default();

		let first = cache.scatter(120, &envelope, None);
		let again = cache.scatter(120, &envelope, None);
		assert!(Arc::ptr_eq(&first, &again));
		assert_eq!(cache.len(), 1);

		let more = cache.scatter(121, &envelope, None);
		assert_eq!(more.len(), 121);
		assert_eq!(cache.len(), 2);

		let seeded = cache.scatter(120, &envelope, Some(42));
		assert_eq!(*seeded, scatter_ornaments_seeded(120, &envelope, 42));
		assert_eq!(cache.len(), 3);
	}
}

use serde::{Deserialize, Serialize};

/// The implicit cone that bounds ornament placement.
///
/// Degenerate envelopes (zero height or radius) are accepted; they collapse
/// placements onto a line or point instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConicEnvelope {
	pub base_radius: f32,
	pub height: f32,
}

impl ConicEnvelope {
	pub fn new(base_radius: f32, height: f32) -> Self {
		Self { base_radius, height }
	}

	/// Fraction of the way down from the apex at height `y`: 0 at the apex, 1 at the base.
	///
	/// A non-positive height has no apex, so every height maps onto the base.
	pub fn depth_fraction(&self, y: f32) -> f32 {
		if self.height > 0.0 {
			1.0 - y / self.height
		} else {
			1.0
		}
	}

	/// Radius of the cone at height `y`.
	pub fn radius_at(&self, y: f32) -> f32 {
		self.depth_fraction(y) * self.base_radius
	}

	/// Bit pattern of the envelope, for use in hash keys.
	pub fn key_bits(&self) -> (u32, u32) {
		(self.base_radius.to_bits(), self.height.to_bits())
	}
}

impl Default for ConicEnvelope {
	fn default() -> Self {
		Self { base_radius: 2.5, height: 7.0 }
	}
}

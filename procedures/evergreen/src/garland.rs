use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Fraction of the starting radius the garland narrows to at its lower end.
pub const GARLAND_TAPER: f32 = 0.2;

/// Parameters of the spiral garland and the tube it is extruded into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarlandConfig {
	/// Radius of the spiral at its top.
	pub radius: f32,
	/// Height the spiral descends from.
	pub height: f32,
	/// Number of full revolutions between top and bottom.
	pub turns: f32,
	/// Number of parametric steps; the curve has `sample_count + 1` control points.
	pub sample_count: usize,
	/// Cross-section radius of the extruded tube.
	pub tube_radius: f32,
	/// Rings along the tube, independent of `sample_count`.
	pub tubular_segments: u32,
	/// Vertices around each ring.
	pub radial_segments: u32,
	/// Vertical offset of the garland relative to the tree origin.
	pub lift: f32,
}

impl Default for GarlandConfig {
	fn default() -> Self {
		Self {
			radius: 3.0,
			height: 6.0,
			turns: 3.5,
			sample_count: 100,
			tube_radius: 0.08,
			tubular_segments: 128,
			radial_segments: 8,
			lift: 0.5,
		}
	}
}

/// Spiral radius at parameter `t`, tapering linearly from `radius` to `radius * GARLAND_TAPER`.
pub fn garland_radius(t: f32, radius: f32) -> f32 {
	t * radius * GARLAND_TAPER + (1.0 - t) * radius
}

/// Spiral height at parameter `t`, descending from `height` to zero.
pub fn garland_height(t: f32, height: f32) -> f32 {
	(1.0 - t) * height
}

pub fn garland_angle(t: f32, turns: f32) -> f32 {
	t * turns * TAU
}

/// Samples the tapering spiral at `sample_count + 1` evenly spaced parameters, top to bottom.
///
/// A `sample_count` of zero produces no points.
pub fn build_garland(radius: f32, height: f32, turns: f32, sample_count: usize) -> Vec<Vec3> {
	if sample_count == 0 {
		return Vec::new();
	}

	(0..=sample_count)
		.map(|i| {
			let t = i as f32 / sample_count as f32;
			let angle = garland_angle(t, turns);
			let r = garland_radius(t, radius);
			Vec3::new(angle.cos() * r, garland_height(t, height), angle.sin() * r)
		})
		.collect()
}

/// Control points of the garland, interpolated with an open Catmull-Rom spline.
///
/// The spline passes through every control point; the missing neighbours at
/// either end are mirrored across the end points.
#[derive(Debug, Clone, PartialEq)]
pub struct GarlandCurve {
	points: Vec<Vec3>,
}

impl GarlandCurve {
	pub fn new(points: Vec<Vec3>) -> Self {
		Self { points }
	}

	pub fn from_config(config: &GarlandConfig) -> Self {
		Self::new(build_garland(config.radius, config.height, config.turns, config.sample_count))
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Locates `u` in [0, 1] on a span, returning the four span points and the local parameter.
	fn span(&self, u: f32) -> Option<([Vec3; 4], f32)> {
		let n = self.points.len();
		if n < 2 {
			return None;
		}

		let spans = n - 1;
		let s = u.clamp(0.0, 1.0) * spans as f32;
		let i = (s.floor() as usize).min(spans - 1);
		let local = s - i as f32;

		let p1 = self.points[i];
		let p2 = self.points[i + 1];
		let p0 = if i > 0 { self.points[i - 1] } else { 2.0 * p1 - p2 };
		let p3 = if i + 2 < n { self.points[i + 2] } else { 2.0 * p2 - p1 };

		Some(([p0, p1, p2, p3], local))
	}

	/// Point on the spline at `u` in [0, 1]. `None` with fewer than two control points.
	pub fn sample(&self, u: f32) -> Option<Vec3> {
		let ([p0, p1, p2, p3], t) = self.span(u)?;
		let t2 = t * t;
		let t3 = t2 * t;

		Some(
			0.5 * (2.0 * p1
				+ (p2 - p0) * t
				+ (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
				+ (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3),
		)
	}

	/// Unit tangent of the spline at `u`, pointing along increasing `u`.
	pub fn tangent(&self, u: f32) -> Option<Vec3> {
		let ([p0, p1, p2, p3], t) = self.span(u)?;
		let derivative = 0.5
			* ((p2 - p0)
				+ 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t
				+ 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * t * t);

		// coincident control points give a zero derivative; fall back to the chord
		let direction = if derivative.length_squared() > f32::EPSILON {
			derivative
		} else {
			p2 - p1
		};
		direction.try_normalize().or(Some(Vec3::NEG_Y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn horizontal_radius(point: Vec3) -> f32 {
		Vec2::new(point.x, point.z).length()
	}

	#[test]
	fn test_point_count() {
		for sample_count in [2, 3, 10, 100, 257] {
			let points = build_garland(3.0, 6.0, 3.5, sample_count);
			assert_eq!(points.len(), sample_count + 1);
		}
	}

	#[test]
	fn test_end_points_exact() {
		assert_eq!(garland_height(0.0, 6.0), 6.0);
		assert_eq!(garland_radius(0.0, 3.0), 3.0);
		assert_eq!(garland_height(1.0, 6.0), 0.0);
		assert_eq!(garland_radius(1.0, 3.0), 3.0 * GARLAND_TAPER);

		let points = build_garland(3.0, 6.0, 3.5, 100);
		let first = points[0];
		let last = points[100];
		assert_eq!(first.y, 6.0);
		assert!((horizontal_radius(first) - 3.0).abs() < 1e-5);
		assert_eq!(last.y, 0.0);
		assert!((horizontal_radius(last) - 0.6).abs() < 1e-5);
	}

	#[test]
	fn test_reference_garland_scenario() {
		let points = build_garland(3.0, 6.0, 3.5, 100);

		let first = points[0];
		assert!((first - Vec3::new(3.0, 6.0, 0.0)).length() < 1e-5);

		// 3.5 turns ends half way round: cos(7π) = -1, sin(7π) = 0
		let last = points[100];
		assert!((last - Vec3::new(-0.6, 0.0, 0.0)).length() < 1e-4);
	}

	#[test]
	fn test_taper_is_monotonic() {
		for radius in [0.5_f32, 1.0, 3.0, 12.0] {
			let mut previous = f32::INFINITY;
			for i in 0..=64 {
				let r = garland_radius(i as f32 / 64.0, radius);
				assert!(r >= 0.0);
				assert!(r <= previous);
				previous = r;
			}
		}
	}

	#[test]
	fn test_height_descends() {
		let points = build_garland(2.0, 5.0, 2.0, 40);
		for pair in points.windows(2) {
			assert!(pair[1].y < pair[0].y);
		}
	}

	#[test]
	fn test_deterministic() {
		assert_eq!(build_garland(3.0, 6.0, 3.5, 100), build_garland(3.0, 6.0, 3.5, 100));
	}

	#[test]
	fn test_degenerate_sample_counts() {
		assert!(build_garland(3.0, 6.0, 3.5, 0).is_empty());

		let minimal = build_garland(3.0, 6.0, 3.5, 1);
		assert_eq!(minimal.len(), 2);
		assert_eq!(minimal[0].y, 6.0);
		assert_eq!(minimal[1].y, 0.0);
	}

	#[test]
	fn test_spline_passes_through_control_points() {
		let curve = GarlandCurve::from_config(&GarlandConfig { sample_count: 20, ..default() });
		let spans = (curve.len() - 1) as f32;

		for (i, point) in curve.points().iter().enumerate() {
			let sampled = curve.sample(i as f32 / spans).unwrap();
			assert!((sampled - *point).length() < 1e-4, "control point {} missed", i);
		}
	}

	#[test]
	fn test_tangent_points_downwards_overall() {
		let curve = GarlandCurve::from_config(&GarlandConfig::default());
		for i in 0..=10 {
			let tangent = curve.tangent(i as f32 / 10.0).unwrap();
			assert!((tangent.length() - 1.0).abs() < 1e-4);
			assert!(tangent.y < 0.0);
		}
	}

	#[test]
	fn test_short_curve_has_no_spline() {
		let curve = GarlandCurve::new(vec![Vec3::ONE]);
		assert!(curve.sample(0.5).is_none());
		assert!(curve.tangent(0.5).is_none());
	}
}

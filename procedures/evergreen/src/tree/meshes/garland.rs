use crate::garland::{GarlandConfig, GarlandCurve};
use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshId};
use std::f32::consts::TAU;

/// Tube of constant cross-section swept along the garland spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarlandTube {
	config: GarlandConfig,
}

impl GarlandTube {
	pub fn new(config: GarlandConfig) -> Self {
		Self { config }
	}

	/// Unit tangents and parallel-transported normals along the curve.
	fn frames(curve: &GarlandCurve, rings: u32) -> Option<Vec<(Vec3, Vec3, Vec3)>> {
		let mut frames = Vec::with_capacity(rings as usize + 1);

		let first_tangent = curve.tangent(0.0)?;
		let mut normal = initial_normal(first_tangent);
		let mut previous_tangent = first_tangent;

		for i in 0..=rings {
			let u = i as f32 / rings as f32;
			let center = curve.sample(u)?;
			let tangent = curve.tangent(u)?;

			// rotate the previous normal by the turn between consecutive tangents
			let axis = previous_tangent.cross(tangent);
			if axis.length_squared() > f32::EPSILON {
				let angle = previous_tangent.dot(tangent).clamp(-1.0, 1.0).acos();
				normal = Quat::from_axis_angle(axis.normalize(), angle) * normal;
			}
			previous_tangent = tangent;

			frames.push((center, normal, tangent.cross(normal)));
		}

		Some(frames)
	}
}

/// A normal perpendicular to `tangent`, built against the axis it is least aligned with.
fn initial_normal(tangent: Vec3) -> Vec3 {
	let abs = tangent.abs();
	let axis = if abs.x <= abs.y && abs.x <= abs.z {
		Vec3::X
	} else if abs.y <= abs.z {
		Vec3::Y
	} else {
		Vec3::Z
	};
	let binormal = tangent.cross(axis).normalize();
	tangent.cross(binormal)
}

impl IdentifiedMesh for GarlandTube {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for GarlandTube {
	fn build_mesh(&self) -> Option<Mesh> {
		let curve = GarlandCurve::from_config(&self.config);
		let rings = self.config.tubular_segments.max(1);
		let radial = self.config.radial_segments.max(3);
		let frames = Self::frames(&curve, rings)?;

		let ring_size = radial as usize + 1;
		let vertex_count = frames.len() * ring_size;
		let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
		let mut normals: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
		let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

		for (i, (center, normal, binormal)) in frames.iter().enumerate() {
			for j in 0..=radial {
				let v = j as f32 / radial as f32 * TAU;
				let direction = (-v.cos() * *normal + v.sin() * *binormal).normalize_or_zero();
				let position = *center + direction * self.config.tube_radius;

				positions.push(position.to_array());
				normals.push(direction.to_array());
				uvs.push([i as f32 / rings as f32, j as f32 / radial as f32]);
			}
		}

		let mut indices: Vec<u32> = Vec::with_capacity(rings as usize * radial as usize * 6);
		let ring_size = ring_size as u32;
		for i in 1..=rings {
			for j in 1..=radial {
				let a = ring_size * (i - 1) + (j - 1);
				let b = ring_size * i + (j - 1);
				let c = ring_size * i + j;
				let d = ring_size * (i - 1) + j;
				indices.extend_from_slice(&[a, b, d, b, c, d]);
			}
		}

		let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
		mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
		mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
		mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
		mesh.insert_indices(Indices::U32(indices));

		Some(mesh)
	}
}

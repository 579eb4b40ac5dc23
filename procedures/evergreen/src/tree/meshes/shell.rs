use crate::layers::ShellDescriptor;
use bevy::prelude::MeshBuilder as _;
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshId};

/// Cone body of a shell, centred on its own origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellCone {
	pub radius: f32,
	pub height: f32,
	pub segments: u32,
}

impl ShellCone {
	pub fn from_descriptor(shell: &ShellDescriptor, segments: u32) -> Self {
		Self { radius: shell.cone_radius, height: shell.cone_height, segments }
	}
}

impl IdentifiedMesh for ShellCone {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for ShellCone {
	fn build_mesh(&self) -> Option<Mesh> {
		if self.radius <= 0.0 || self.height <= 0.0 {
			return None;
		}
		Some(Cone::new(self.radius, self.height).mesh().resolution(self.segments.max(3)).build())
	}
}

/// Torus lying flat around the base of a shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRing {
	pub radius: f32,
	pub tube_radius: f32,
}

impl TrimRing {
	pub const MINOR_RESOLUTION: usize = 16;
	pub const MAJOR_RESOLUTION: usize = 32;

	pub fn from_descriptor(shell: &ShellDescriptor) -> Self {
		Self { radius: shell.trim_ring_radius, tube_radius: shell.trim_ring_tube_radius }
	}
}

impl IdentifiedMesh for TrimRing {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for TrimRing {
	fn build_mesh(&self) -> Option<Mesh> {
		if self.tube_radius <= 0.0 || self.radius <= self.tube_radius {
			return None;
		}
		let torus = Torus::new(self.radius - self.tube_radius, self.radius + self.tube_radius);
		Some(
			torus
				.mesh()
				.minor_resolution(Self::MINOR_RESOLUTION)
				.major_resolution(Self::MAJOR_RESOLUTION)
				.build(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layers::{build_layers, reference_layers};

	#[test]
	fn test_reference_shells_build() {
		for shell in build_layers(&reference_layers()) {
			assert!(ShellCone::from_descriptor(&shell, 8).build_mesh().is_some());
			assert!(TrimRing::from_descriptor(&shell).build_mesh().is_some());
		}
	}

	#[test]
	fn test_degenerate_shell_has_no_mesh() {
		assert!(ShellCone { radius: 0.0, height: 1.0, segments: 8 }.build_mesh().is_none());
		assert!(TrimRing { radius: 0.0, tube_radius: 0.0 }.build_mesh().is_none());
	}
}

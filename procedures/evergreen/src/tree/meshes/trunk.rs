use bevy::prelude::MeshBuilder as _;
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshId};
use serde::{Deserialize, Serialize};

/// Tapered trunk, wider at the bottom, centred on its own origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trunk {
	pub top_radius: f32,
	pub bottom_radius: f32,
	pub height: f32,
	pub segments: u32,
}

impl Default for Trunk {
	fn default() -> Self {
		Self { top_radius: 0.4, bottom_radius: 0.6, height: 2.0, segments: 8 }
	}
}

impl IdentifiedMesh for Trunk {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for Trunk {
	fn build_mesh(&self) -> Option<Mesh> {
		if self.height <= 0.0 {
			return None;
		}
		let frustum = ConicalFrustum {
			radius_top: self.top_radius.max(0.0),
			radius_bottom: self.bottom_radius.max(0.0),
			height: self.height,
		};
		Some(frustum.mesh().resolution(self.segments.max(3)).build())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_trunk_builds() {
		assert!(Trunk::default().build_mesh().is_some());
		assert!(Trunk { height: 0.0, ..default() }.build_mesh().is_none());
	}
}

use bevy::prelude::MeshBuilder as _;
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshId};

/// Tessellation of a unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaubleShape {
	Uv { sectors: u32, stacks: u32 },
	/// Faceted sphere; zero subdivisions is a plain icosahedron.
	Ico { subdivisions: u32 },
}

/// Unit-radius sphere shared by every bauble, light, mote and the star; size comes from the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bauble {
	pub shape: BaubleShape,
}

impl Bauble {
	/// Smooth ornament sphere.
	pub fn ornament() -> Self {
		Self { shape: BaubleShape::Uv { sectors: 16, stacks: 16 } }
	}

	/// Coarser sphere for the many small lights.
	pub fn light() -> Self {
		Self { shape: BaubleShape::Uv { sectors: 8, stacks: 8 } }
	}

	pub fn faceted() -> Self {
		Self { shape: BaubleShape::Ico { subdivisions: 0 } }
	}
}

impl IdentifiedMesh for Bauble {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for Bauble {
	fn build_mesh(&self) -> Option<Mesh> {
		let sphere = Sphere::new(1.0).mesh();
		match self.shape {
			BaubleShape::Uv { sectors, stacks } => {
				Some(sphere.uv(sectors.max(3), stacks.max(2)))
			}
			BaubleShape::Ico { subdivisions } => sphere.ico(subdivisions).ok(),
		}
	}
}

pub mod cache;
pub mod handle;

use bevy::prelude::*;
pub use cache::handle::MeshHandleCache;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshId(String);

impl MeshId {
	pub fn new(id: String) -> Self {
		Self(id)
	}

	pub fn with_suffix(&self, suffix: &str) -> Self {
		Self(format!("{}{}", self.0, suffix))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

pub trait IdentifiedMesh {
	fn id(&self) -> MeshId;
}

pub trait MeshBuilder: Clone {
	/// Builds the mesh, or `None` when the parameters describe no geometry.
	fn build_mesh(&self) -> Option<Mesh>;
}

pub trait MeshFetcher: Clone + IdentifiedMesh {
	/// Builds mesh if it doesn't exist or fetches from the assets. Returns the handle to the mesh.
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Option<Handle<Mesh>>;
}

/// If it's already defined how the mesh is built and how its handle is cached, this trait can be used to fetch the mesh.
impl<T: MeshBuilder + MeshHandleCache> MeshFetcher for T {
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Option<Handle<Mesh>> {
		if let Some(handle) = self.fetch_cached_mesh_handle() {
			return Some(handle);
		}

		let handle = self.build_mesh().map(|mesh| {
			log::debug!("Adding mesh {} to assets", self.id().as_str());
			meshes.add(mesh)
		})?;

		self.cache_mesh_handle(handle.clone());
		Some(handle)
	}
}

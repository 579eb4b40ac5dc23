use crate::mesh::{
	cache::handle::map::HandleMap, IdentifiedMesh, MeshBuilder, MeshHandleCache, MeshId,
};
use bevy::prelude::*;

#[derive(Debug, Clone)]
pub struct MeshHandle<T: MeshBuilder + IdentifiedMesh + Clone> {
	handle_cache: HandleMap<T>,
	builder: T,
}

impl<T: MeshBuilder + IdentifiedMesh + Clone> MeshHandle<T> {
	pub fn new(builder: T) -> Self {
		Self { handle_cache: HandleMap::new(), builder }
	}

	pub fn with_handle_cache(mut self, handle_cache: HandleMap<T>) -> Self {
		self.handle_cache = handle_cache;
		self
	}

	pub fn builder(&self) -> &T {
		&self.builder
	}
}

impl<T: MeshBuilder + IdentifiedMesh + Clone> IdentifiedMesh for MeshHandle<T> {
	fn id(&self) -> MeshId {
		self.builder.id()
	}
}

impl<T: MeshBuilder + IdentifiedMesh + Clone> MeshBuilder for MeshHandle<T> {
	fn build_mesh(&self) -> Option<Mesh> {
		self.builder.build_mesh()
	}
}

impl<T: MeshBuilder + IdentifiedMesh + Clone> MeshHandleCache for MeshHandle<T> {
	fn cache_mesh_handle(&self, mesh_handle: Handle<Mesh>) {
		self.handle_cache.insert(&self.builder, mesh_handle);
	}

	fn fetch_cached_mesh_handle(&self) -> Option<Handle<Mesh>> {
		self.handle_cache.get(&self.builder)
	}
}

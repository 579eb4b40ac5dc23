pub mod map;

use crate::mesh::IdentifiedMesh;
use bevy::prelude::*;

pub trait MeshHandleCache: Clone + IdentifiedMesh {
	/// Caches a mesh handle.
	fn cache_mesh_handle(&self, mesh_handle: Handle<Mesh>);

	/// Fetches a mesh handle from the cache.
	fn fetch_cached_mesh_handle(&self) -> Option<Handle<Mesh>>;
}

use crate::cache::MemoCache;
use crate::mesh::{IdentifiedMesh, MeshId};
use bevy::prelude::*;
use std::marker::PhantomData;

/// Mesh handles for one builder type, keyed by the builder's [`MeshId`].
#[derive(Debug)]
pub struct HandleMap<T: IdentifiedMesh> {
	cache: MemoCache<MeshId, Handle<Mesh>>,
	phantom: PhantomData<fn() -> T>,
}

impl<T: IdentifiedMesh> Clone for HandleMap<T> {
	fn clone(&self) -> Self {
		Self { cache: self.cache.clone(), phantom: PhantomData }
	}
}

impl<T: IdentifiedMesh> HandleMap<T> {
	pub fn new() -> Self {
		Self { cache: MemoCache::new(), phantom: PhantomData }
	}

	pub fn get(&self, mesh_builder: &T) -> Option<Handle<Mesh>> {
		self.cache.get(&mesh_builder.id())
	}

	pub fn insert(&self, mesh_builder: &T, mesh: Handle<Mesh>) {
		self.cache.insert(mesh_builder.id(), mesh);
	}

	pub fn len(&self) -> usize {
		self.cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}
}

impl<T: IdentifiedMesh> Default for HandleMap<T> {
	fn default() -> Self {
		Self::new()
	}
}

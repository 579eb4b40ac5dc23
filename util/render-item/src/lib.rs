pub mod cache;
pub mod mesh;

use bevy::prelude::*;

/// Used for logical items that will spawn their constituents into the world.
pub trait RenderItem: Clone {
	/// Spawns the constituents and returns them so the caller can parent them.
	fn spawn_render_items(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Vec<Entity>;
}

/// Signals that the item should be spawned beneath the entity carrying this component.
#[derive(Component)]
pub struct DispatchRenderItem<T: RenderItem> {
	item: T,
}

impl<T: RenderItem> DispatchRenderItem<T> {
	pub fn new(item: T) -> Self {
		Self { item }
	}

	pub fn item(&self) -> &T {
		&self.item
	}

	pub fn spawn_render_items(
		&self,
		commands: &mut Commands,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Vec<Entity> {
		self.item.spawn_render_items(commands, meshes, materials)
	}
}

/// Spawns newly dispatched render items as children of their dispatching entity.
///
/// NOTE: this only reacts to `Added<DispatchRenderItem<T>>`. Replacing the item on an
/// existing entity does not respawn it; despawn and dispatch again instead.
pub fn dispatch_render_items<T: RenderItem + Send + Sync + 'static>(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	query: Query<(Entity, &DispatchRenderItem<T>), Added<DispatchRenderItem<T>>>,
) {
	for (entity, dispatch) in &query {
		let children = dispatch.spawn_render_items(&mut commands, &mut meshes, &mut materials);
		log::info!("Dispatched render item with {} constituents", children.len());
		commands.entity(entity).add_children(&children);
	}
}

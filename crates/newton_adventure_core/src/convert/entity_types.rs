//! Entity type cache keyed by type name.

use std::collections::HashMap;

use newton_adventure_schema::level::EntityType;

use crate::document::MapObject;

/// Stable index of an entity type in an [`EntityTypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityTypeId(usize);

/// Name under which an object's entity type is stored.
///
/// Tile objects share the type of their tile (`tile_42`), every other object
/// is keyed by its own name.
pub fn type_key(object: &MapObject) -> String {
    match &object.tile {
        Some(tile) => format!("tile_{}", tile.id),
        None => object.name.clone(),
    }
}

/// Entity types in creation order, unique by name.
#[derive(Debug, Default)]
pub struct EntityTypeRegistry {
    types: Vec<EntityType>,
    by_name: HashMap<String, EntityTypeId>,
}

impl EntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the entity type for `object`, building it with `build` on first sight.
    ///
    /// `build` receives the type key and runs at most once per key, so anything
    /// it embeds is embedded once no matter how many objects share the type.
    pub fn resolve<E>(
        &mut self,
        object: &MapObject,
        build: impl FnOnce(&str) -> Result<EntityType, E>,
    ) -> Result<EntityTypeId, E> {
        let key = type_key(object);
        if let Some(&id) = self.by_name.get(&key) {
            return Ok(id);
        }

        let entity_type = build(&key)?;
        let id = EntityTypeId(self.types.len());
        self.types.push(entity_type);
        self.by_name.insert(key, id);
        Ok(id)
    }

    pub fn get(&self, id: EntityTypeId) -> &EntityType {
        &self.types[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<EntityTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.types.iter()
    }

    pub fn into_vec(self) -> Vec<EntityType> {
        self.types
    }
}

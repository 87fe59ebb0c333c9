use crate::{
    entities::{Entity, EntityId, EntityType},
    errors::GestorError,
};

/// Persistence of client/supplier records. Implementations read the whole
/// collection and rewrite it in full on every mutation (single logical
/// writer, no partial updates).
pub(crate) trait EntityRepository {
    fn list(&self, entity_type: Option<EntityType>) -> Result<Vec<Entity>, GestorError>;

    fn find_by_id(&self, id: &EntityId) -> Result<Option<Entity>, GestorError>;

    /// Upsert by id, full replace.
    fn save(&self, entity: &Entity) -> Result<(), GestorError>;

    fn delete(&self, id: &EntityId) -> Result<(), GestorError>;
}

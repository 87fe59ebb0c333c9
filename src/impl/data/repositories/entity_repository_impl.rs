use crate::{
    data::{
        datasources::key_value_datasource::{KeyValueDatasource, SharedDatasource},
        models::entity_model::EntityModel,
    },
    domain::repositories::entity_repository::EntityRepository,
    entities::{Entity, EntityId, EntityType},
    errors::GestorError,
};

pub(crate) const ENTITIES_KEY: &str = "gestor_entities";

pub(crate) struct EntityRepositoryImpl<DS: KeyValueDatasource> {
    datasource: SharedDatasource<DS>,
}

impl<DS: KeyValueDatasource> EntityRepositoryImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self { datasource }
    }

    fn load_all(&self) -> Result<Vec<Entity>, GestorError> {
        let raw = match self.datasource.lock().get_item(ENTITIES_KEY) {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let models: Vec<EntityModel> =
            serde_json::from_str(&raw).map_err(|source| GestorError::InvalidJson {
                collection: ENTITIES_KEY,
                source,
            })?;
        models.into_iter().map(Entity::try_from).collect()
    }

    fn store_all(&self, entities: &[Entity]) -> Result<(), GestorError> {
        let models: Vec<EntityModel> = entities.iter().map(EntityModel::from).collect();
        let raw = serde_json::to_string(&models).map_err(|source| GestorError::InvalidJson {
            collection: ENTITIES_KEY,
            source,
        })?;
        self.datasource.lock().set_item(ENTITIES_KEY, raw);
        Ok(())
    }
}

impl<DS: KeyValueDatasource> EntityRepository for EntityRepositoryImpl<DS> {
    fn list(&self, entity_type: Option<EntityType>) -> Result<Vec<Entity>, GestorError> {
        let all = self.load_all()?;
        Ok(match entity_type {
            Some(t) => all.into_iter().filter(|e| e.entity_type == t).collect(),
            None => all,
        })
    }

    fn find_by_id(&self, id: &EntityId) -> Result<Option<Entity>, GestorError> {
        Ok(self.load_all()?.into_iter().find(|e| &e.id == id))
    }

    fn save(&self, entity: &Entity) -> Result<(), GestorError> {
        let mut all = self.load_all()?;
        match all.iter_mut().find(|e| e.id == entity.id) {
            Some(existing) => *existing = entity.clone(),
            None => all.push(entity.clone()),
        }
        self.store_all(&all)
    }

    fn delete(&self, id: &EntityId) -> Result<(), GestorError> {
        let mut all = self.load_all()?;
        all.retain(|e| &e.id != id);
        self.store_all(&all)
    }
}

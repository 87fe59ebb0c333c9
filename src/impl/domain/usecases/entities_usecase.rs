use tracing::debug;

use crate::{
    data::{
        datasources::key_value_datasource::{KeyValueDatasource, SharedDatasource},
        repositories::{
            entity_repository_impl::EntityRepositoryImpl,
            invoice_repository_impl::InvoiceRepositoryImpl,
        },
    },
    domain::{
        logic::tax_id::is_valid_tax_id,
        repositories::{
            entity_repository::EntityRepository, invoice_repository::InvoiceRepository,
        },
    },
    entities::{Entity, EntityId, EntityType},
    errors::{GestorError, ValidationError},
};

pub(crate) trait EntitiesUsecase {
    fn list(&self, entity_type: Option<EntityType>) -> Result<Vec<Entity>, GestorError>;

    fn find(&self, id: &EntityId) -> Result<Option<Entity>, GestorError>;

    /// Upsert with boundary validation: name required, tax id format-checked
    /// (after upper-casing, as the form does), type immutable on re-save.
    fn save(&self, entity: Entity) -> Result<Entity, GestorError>;

    /// Delete-entity orchestration: first the invoices referencing the
    /// entity, then the entity itself. Explicit here rather than hidden
    /// inside a store method.
    fn delete(&self, id: &EntityId) -> Result<(), GestorError>;
}

pub(crate) struct EntitiesUsecaseImpl<DS: KeyValueDatasource> {
    entity_repository: EntityRepositoryImpl<DS>,
    invoice_repository: InvoiceRepositoryImpl<DS>,
}

impl<DS: KeyValueDatasource> EntitiesUsecaseImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self {
            entity_repository: EntityRepositoryImpl::new(datasource.clone()),
            invoice_repository: InvoiceRepositoryImpl::new(datasource),
        }
    }
}

impl<DS: KeyValueDatasource> EntitiesUsecase for EntitiesUsecaseImpl<DS> {
    fn list(&self, entity_type: Option<EntityType>) -> Result<Vec<Entity>, GestorError> {
        self.entity_repository.list(entity_type)
    }

    fn find(&self, id: &EntityId) -> Result<Option<Entity>, GestorError> {
        self.entity_repository.find_by_id(id)
    }

    fn save(&self, mut entity: Entity) -> Result<Entity, GestorError> {
        if entity.name.trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if let Some(tax_id) = entity.tax_id.take() {
            let normalized = tax_id.trim().to_uppercase();
            if !normalized.is_empty() {
                if !is_valid_tax_id(&normalized) {
                    return Err(ValidationError::InvalidTaxId { value: tax_id }.into());
                }
                entity.tax_id = Some(normalized);
            }
        }
        if let Some(existing) = self.entity_repository.find_by_id(&entity.id)? {
            if existing.entity_type != entity.entity_type {
                return Err(ValidationError::EntityTypeImmutable {
                    id: entity.id.clone(),
                }
                .into());
            }
        }
        self.entity_repository.save(&entity)?;
        debug!(id = %entity.id, name = %entity.name, "entity saved");
        Ok(entity)
    }

    fn delete(&self, id: &EntityId) -> Result<(), GestorError> {
        let removed_invoices = self.invoice_repository.delete_by_entity(id)?;
        self.entity_repository.delete(id)?;
        debug!(id = %id, removed_invoices, "entity deleted with its invoices");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::data::datasources::key_value_datasource::InMemoryKeyValueDatasource;

    fn usecase() -> EntitiesUsecaseImpl<InMemoryKeyValueDatasource> {
        EntitiesUsecaseImpl::new(Arc::new(Mutex::new(InMemoryKeyValueDatasource::new())))
    }

    #[test]
    fn normalizes_and_validates_tax_id() {
        let usecase = usecase();
        let mut entity = Entity::new(EntityType::Client, "Cliente A");
        entity.tax_id = Some("b12345678".to_string());
        let saved = usecase.save(entity).unwrap();
        assert_eq!(saved.tax_id.as_deref(), Some("B12345678"));

        let mut bad = Entity::new(EntityType::Client, "Cliente B");
        bad.tax_id = Some("12345".to_string());
        assert!(matches!(
            usecase.save(bad),
            Err(GestorError::Validation(ValidationError::InvalidTaxId { .. }))
        ));
    }

    #[test]
    fn rejects_entity_type_change() {
        let usecase = usecase();
        let entity = usecase
            .save(Entity::new(EntityType::Client, "Cliente A"))
            .unwrap();

        let mut flipped = entity.clone();
        flipped.entity_type = EntityType::Supplier;
        assert!(matches!(
            usecase.save(flipped),
            Err(GestorError::Validation(
                ValidationError::EntityTypeImmutable { .. }
            ))
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let usecase = usecase();
        assert!(matches!(
            usecase.save(Entity::new(EntityType::Client, "  ")),
            Err(GestorError::Validation(ValidationError::MissingName))
        ));
    }
}

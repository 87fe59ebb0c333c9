use tracing::debug;

use crate::{
    data::{
        datasources::key_value_datasource::{KeyValueDatasource, SharedDatasource},
        repositories::{
            entity_repository_impl::EntityRepositoryImpl,
            invoice_repository_impl::InvoiceRepositoryImpl,
        },
    },
    domain::repositories::{
        entity_repository::EntityRepository, invoice_repository::InvoiceRepository,
    },
    entities::{EntityId, Invoice, InvoiceDraft, InvoiceId},
    errors::GestorError,
};

pub(crate) trait InvoicesUsecase {
    fn list(&self) -> Result<Vec<Invoice>, GestorError>;

    fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, GestorError>;

    fn by_entity(&self, entity_id: &EntityId) -> Result<Vec<Invoice>, GestorError>;

    /// Finalize a draft (balance check included) and persist it. The
    /// referenced entity must exist; no partial save on any failure.
    fn save_draft(&self, draft: &InvoiceDraft) -> Result<Invoice, GestorError>;

    fn delete(&self, id: &InvoiceId) -> Result<(), GestorError>;
}

pub(crate) struct InvoicesUsecaseImpl<DS: KeyValueDatasource> {
    entity_repository: EntityRepositoryImpl<DS>,
    invoice_repository: InvoiceRepositoryImpl<DS>,
}

impl<DS: KeyValueDatasource> InvoicesUsecaseImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self {
            entity_repository: EntityRepositoryImpl::new(datasource.clone()),
            invoice_repository: InvoiceRepositoryImpl::new(datasource),
        }
    }
}

impl<DS: KeyValueDatasource> InvoicesUsecase for InvoicesUsecaseImpl<DS> {
    fn list(&self) -> Result<Vec<Invoice>, GestorError> {
        self.invoice_repository.list()
    }

    fn find(&self, id: &InvoiceId) -> Result<Option<Invoice>, GestorError> {
        self.invoice_repository.find_by_id(id)
    }

    fn by_entity(&self, entity_id: &EntityId) -> Result<Vec<Invoice>, GestorError> {
        self.invoice_repository.find_by_entity(entity_id)
    }

    fn save_draft(&self, draft: &InvoiceDraft) -> Result<Invoice, GestorError> {
        let invoice = draft.build()?;
        if self
            .entity_repository
            .find_by_id(&invoice.entity_id)?
            .is_none()
        {
            return Err(GestorError::EntityNotFound {
                id: invoice.entity_id.clone(),
            });
        }
        self.invoice_repository.save(&invoice)?;
        debug!(
            id = %invoice.id,
            number = %invoice.number,
            total = invoice.total_amount,
            "invoice saved"
        );
        Ok(invoice)
    }

    fn delete(&self, id: &InvoiceId) -> Result<(), GestorError> {
        self.invoice_repository.delete(id)?;
        debug!(id = %id, "invoice deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        data::datasources::key_value_datasource::InMemoryKeyValueDatasource,
        domain::usecases::entities_usecase::{EntitiesUsecase, EntitiesUsecaseImpl},
        entities::{Entity, EntityType, InvoiceStatus},
        errors::ValidationError,
    };

    fn setup() -> (
        EntitiesUsecaseImpl<InMemoryKeyValueDatasource>,
        InvoicesUsecaseImpl<InMemoryKeyValueDatasource>,
        Entity,
    ) {
        let datasource = Arc::new(Mutex::new(InMemoryKeyValueDatasource::new()));
        let entities = EntitiesUsecaseImpl::new(datasource.clone());
        let invoices = InvoicesUsecaseImpl::new(datasource);
        let entity = entities
            .save(Entity::new(EntityType::Client, "Cliente A"))
            .unwrap();
        (entities, invoices, entity)
    }

    fn balanced_draft(entity_id: &EntityId) -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        draft.entity_id = Some(entity_id.clone());
        draft.number = "F-2024-001".to_string();
        draft.set_total_amount(100.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_amount(&row, 100.0);
        draft.set_maturity_due_date(&row, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        draft
    }

    #[test]
    fn saves_a_balanced_draft() {
        let (_, invoices, entity) = setup();
        let invoice = invoices.save_draft(&balanced_draft(&entity.id)).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoices.by_entity(&entity.id).unwrap().len(), 1);
    }

    #[test]
    fn refuses_unbalanced_draft_without_saving() {
        let (_, invoices, entity) = setup();
        let mut draft = balanced_draft(&entity.id);
        draft.set_total_amount(150.0);
        assert!(matches!(
            invoices.save_draft(&draft),
            Err(GestorError::Validation(ValidationError::Unbalanced { .. }))
        ));
        assert!(invoices.list().unwrap().is_empty());
    }

    #[test]
    fn refuses_draft_for_unknown_entity() {
        let (_, invoices, _) = setup();
        let draft = balanced_draft(&EntityId::from("ghost"));
        assert!(matches!(
            invoices.save_draft(&draft),
            Err(GestorError::EntityNotFound { .. })
        ));
    }
}

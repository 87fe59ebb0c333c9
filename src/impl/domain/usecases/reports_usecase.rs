use std::collections::HashMap;

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
    entities::{EntityId, EntityType, PendingMaturity, TreasurySummary},
    errors::GestorError,
};

pub(crate) trait ReportsUsecase {
    /// Unpaid installments across all invoices of entities of the given type
    /// (the "Cobros"/"Pagos" schedule), sorted by due date. Invoices whose
    /// entity no longer exists are skipped, not an error.
    fn pending_schedule(
        &self,
        entity_type: EntityType,
    ) -> Result<Vec<PendingMaturity>, GestorError>;

    fn treasury_summary(&self) -> Result<TreasurySummary, GestorError>;

    /// Sum of unpaid installment amounts across one entity's invoices.
    fn entity_pending_total(&self, entity_id: &EntityId) -> Result<f64, GestorError>;
}

pub(crate) struct ReportsUsecaseImpl<DS: KeyValueDatasource> {
    entity_repository: EntityRepositoryImpl<DS>,
    invoice_repository: InvoiceRepositoryImpl<DS>,
}

impl<DS: KeyValueDatasource> ReportsUsecaseImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self {
            entity_repository: EntityRepositoryImpl::new(datasource.clone()),
            invoice_repository: InvoiceRepositoryImpl::new(datasource),
        }
    }
}

impl<DS: KeyValueDatasource> ReportsUsecase for ReportsUsecaseImpl<DS> {
    fn pending_schedule(
        &self,
        entity_type: EntityType,
    ) -> Result<Vec<PendingMaturity>, GestorError> {
        let entities: HashMap<EntityId, _> = self
            .entity_repository
            .list(Some(entity_type))?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        let mut pending = Vec::new();
        for invoice in self.invoice_repository.list()? {
            let Some(entity) = entities.get(&invoice.entity_id) else {
                continue;
            };
            for maturity in &invoice.maturities {
                if maturity.paid {
                    continue;
                }
                pending.push(PendingMaturity {
                    invoice_id: invoice.id.clone(),
                    invoice_number: invoice.number.clone(),
                    entity_id: entity.id.clone(),
                    entity_name: entity.name.clone(),
                    entity_type,
                    maturity: maturity.clone(),
                });
            }
        }
        pending.sort_by_key(|p| p.maturity.due_date);
        Ok(pending)
    }

    fn treasury_summary(&self) -> Result<TreasurySummary, GestorError> {
        let entities: HashMap<EntityId, EntityType> = self
            .entity_repository
            .list(None)?
            .into_iter()
            .map(|e| (e.id, e.entity_type))
            .collect();
        let mut summary = TreasurySummary::default();
        for invoice in self.invoice_repository.list()? {
            // Dangling references degrade to "not counted" rather than
            // failing the whole report.
            let Some(entity_type) = entities.get(&invoice.entity_id) else {
                continue;
            };
            let pending = invoice.pending_amount();
            match entity_type {
                EntityType::Client => {
                    summary.total_billed += invoice.total_amount;
                    summary.pending_collection += pending;
                }
                EntityType::Supplier => {
                    summary.total_expenses += invoice.total_amount;
                    summary.pending_payment += pending;
                }
            }
        }
        Ok(summary)
    }

    fn entity_pending_total(&self, entity_id: &EntityId) -> Result<f64, GestorError> {
        Ok(self
            .invoice_repository
            .find_by_entity(entity_id)?
            .iter()
            .map(|i| i.pending_amount())
            .sum())
    }
}

use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::{
    data::datasources::key_value_datasource::{
        InMemoryKeyValueDatasource, KeyValueDatasource, SharedDatasource,
    },
    domain::usecases::{
        entities_usecase::{EntitiesUsecase as _, EntitiesUsecaseImpl},
        invoices_usecase::{InvoicesUsecase as _, InvoicesUsecaseImpl},
        payments_usecase::{PaymentsUsecase as _, PaymentsUsecaseImpl},
        reports_usecase::{ReportsUsecase as _, ReportsUsecaseImpl},
        snapshot_usecase::{SnapshotUsecase as _, SnapshotUsecaseImpl},
    },
    entities::{
        Entity, EntityId, EntityType, Invoice, InvoiceDraft, InvoiceId, MaturityId,
        PendingMaturity, TreasurySummary,
    },
    errors::GestorError,
    presentation::schedule_printer::SchedulePrinter,
};

/// Composition root of the invoicing application: one shared key-value
/// datasource injected into every usecase. Defaults to the in-memory store;
/// tests and embedders can supply their own implementation.
pub struct GestorInvoicingUtil<DS = InMemoryKeyValueDatasource>
where
    DS: KeyValueDatasource + Send,
{
    entities_usecase: EntitiesUsecaseImpl<DS>,
    invoices_usecase: InvoicesUsecaseImpl<DS>,
    payments_usecase: PaymentsUsecaseImpl<DS>,
    reports_usecase: ReportsUsecaseImpl<DS>,
    snapshot_usecase: SnapshotUsecaseImpl<DS>,
    printer: SchedulePrinter,
}

impl GestorInvoicingUtil<InMemoryKeyValueDatasource> {
    pub fn new() -> Self {
        Self::with_datasource(InMemoryKeyValueDatasource::new())
    }

    /// Seed a fresh in-memory instance from the two serialized collections.
    pub fn from_string(entities_json: &str, invoices_json: &str) -> Result<Self, GestorError> {
        let util = Self::new();
        util.snapshot_usecase
            .import_string(entities_json, invoices_json)?;
        Ok(util)
    }

    /// Seed a fresh in-memory instance from collection snapshot files.
    pub async fn from_file<P>(entities_path: P, invoices_path: P) -> Result<Self, GestorError>
    where
        P: AsRef<Path> + Send,
    {
        let util = Self::new();
        util.snapshot_usecase
            .import_file(entities_path, invoices_path)
            .await?;
        Ok(util)
    }
}

impl Default for GestorInvoicingUtil<InMemoryKeyValueDatasource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DS> GestorInvoicingUtil<DS>
where
    DS: KeyValueDatasource + Send,
{
    pub fn with_datasource(datasource: DS) -> Self {
        let datasource: SharedDatasource<DS> = Arc::new(Mutex::new(datasource));
        Self {
            entities_usecase: EntitiesUsecaseImpl::new(datasource.clone()),
            invoices_usecase: InvoicesUsecaseImpl::new(datasource.clone()),
            payments_usecase: PaymentsUsecaseImpl::new(datasource.clone()),
            reports_usecase: ReportsUsecaseImpl::new(datasource.clone()),
            snapshot_usecase: SnapshotUsecaseImpl::new(datasource),
            printer: SchedulePrinter::new(),
        }
    }

    // Entities.
    // ---

    pub fn entities(&self, entity_type: Option<EntityType>) -> Result<Vec<Entity>, GestorError> {
        self.entities_usecase.list(entity_type)
    }

    pub fn entity(&self, id: &EntityId) -> Result<Option<Entity>, GestorError> {
        self.entities_usecase.find(id)
    }

    pub fn save_entity(&self, entity: Entity) -> Result<Entity, GestorError> {
        self.entities_usecase.save(entity)
    }

    /// Deletes the entity and every invoice referencing it.
    pub fn delete_entity(&self, id: &EntityId) -> Result<(), GestorError> {
        self.entities_usecase.delete(id)
    }

    // Invoices.
    // ---

    pub fn invoices(&self) -> Result<Vec<Invoice>, GestorError> {
        self.invoices_usecase.list()
    }

    pub fn invoice(&self, id: &InvoiceId) -> Result<Option<Invoice>, GestorError> {
        self.invoices_usecase.find(id)
    }

    pub fn invoices_by_entity(&self, entity_id: &EntityId) -> Result<Vec<Invoice>, GestorError> {
        self.invoices_usecase.by_entity(entity_id)
    }

    pub fn save_invoice(&self, draft: &InvoiceDraft) -> Result<Invoice, GestorError> {
        self.invoices_usecase.save_draft(draft)
    }

    pub fn delete_invoice(&self, id: &InvoiceId) -> Result<(), GestorError> {
        self.invoices_usecase.delete(id)
    }

    // Payments.
    // ---

    pub fn mark_maturity_paid(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
        payment_date: NaiveDate,
    ) -> Result<Invoice, GestorError> {
        self.payments_usecase
            .mark_paid(invoice_id, maturity_id, payment_date)
    }

    pub fn undo_maturity_payment(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
    ) -> Result<Invoice, GestorError> {
        self.payments_usecase.undo_payment(invoice_id, maturity_id)
    }

    // Reports.
    // ---

    pub fn pending_schedule(
        &self,
        entity_type: EntityType,
    ) -> Result<Vec<PendingMaturity>, GestorError> {
        self.reports_usecase.pending_schedule(entity_type)
    }

    pub fn treasury_summary(&self) -> Result<TreasurySummary, GestorError> {
        self.reports_usecase.treasury_summary()
    }

    pub fn entity_pending_total(&self, entity_id: &EntityId) -> Result<f64, GestorError> {
        self.reports_usecase.entity_pending_total(entity_id)
    }

    /// Plain-text rendering of the pending schedule for the given side.
    pub fn print_pending_schedule(&self, entity_type: EntityType) -> Result<String, GestorError> {
        let pending = self.reports_usecase.pending_schedule(entity_type)?;
        Ok(self.printer.print_schedule(entity_type, &pending))
    }

    // Snapshots.
    // ---

    pub fn import_string(
        &self,
        entities_json: &str,
        invoices_json: &str,
    ) -> Result<(), GestorError> {
        self.snapshot_usecase
            .import_string(entities_json, invoices_json)
    }

    pub fn export_string(&self) -> Result<(String, String), GestorError> {
        self.snapshot_usecase.export_string()
    }

    pub async fn import_file<P>(
        &self,
        entities_path: P,
        invoices_path: P,
    ) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send,
    {
        self.snapshot_usecase
            .import_file(entities_path, invoices_path)
            .await
    }

    pub async fn export_file<P>(
        &self,
        entities_path: P,
        invoices_path: P,
    ) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send,
    {
        self.snapshot_usecase
            .export_file(entities_path, invoices_path)
            .await
    }
}

use crate::{
    entities::{EntityId, Invoice, InvoiceId},
    errors::GestorError,
};

/// Persistence of invoice records, maturities embedded inline. Same
/// full-read/full-rewrite contract as the entity repository.
pub(crate) trait InvoiceRepository {
    fn list(&self) -> Result<Vec<Invoice>, GestorError>;

    fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, GestorError>;

    fn find_by_entity(&self, entity_id: &EntityId) -> Result<Vec<Invoice>, GestorError>;

    /// Upsert by id, full replace of the stored record.
    fn save(&self, invoice: &Invoice) -> Result<(), GestorError>;

    fn delete(&self, id: &InvoiceId) -> Result<(), GestorError>;

    /// Remove every invoice referencing the entity; returns how many were
    /// removed. Used by the delete-entity orchestration.
    fn delete_by_entity(&self, entity_id: &EntityId) -> Result<usize, GestorError>;
}

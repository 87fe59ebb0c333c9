use super::{
    entity::EntityType,
    ids::{EntityId, InvoiceId},
    invoice::Maturity,
};

/// One unpaid installment in the collection/payment schedule, enriched with
/// the owning invoice and entity for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMaturity {
    pub invoice_id: InvoiceId,
    pub invoice_number: String,
    pub entity_id: EntityId,
    pub entity_name: String,
    pub entity_type: EntityType,
    pub maturity: Maturity,
}

/// Global treasury figures across both entity types.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TreasurySummary {
    /// Sum of client invoice totals.
    pub total_billed: f64,
    /// Sum of supplier invoice totals.
    pub total_expenses: f64,
    /// Unpaid maturity amounts on client invoices.
    pub pending_collection: f64,
    /// Unpaid maturity amounts on supplier invoices.
    pub pending_payment: f64,
}

use thiserror::Error;

use crate::entities::{EntityId, InvoiceId, MaturityId};

/// Pre-persistence validation failures. Detected at the boundary immediately
/// before a mutating call; nothing is saved when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no entity selected for the invoice")]
    MissingEntity,
    #[error("invoice number is required")]
    MissingNumber,
    #[error("total amount is required")]
    MissingTotalAmount,
    #[error("maturity is missing a due date")]
    MissingDueDate,
    #[error("maturity amounts do not match the total (difference: {difference:.2})")]
    Unbalanced { difference: f64 },
    #[error("an invoice must keep at least one maturity")]
    LastMaturity,
    #[error("entity name is required")]
    MissingName,
    #[error("invalid tax identifier: '{value}'")]
    InvalidTaxId { value: String },
    #[error("entity type cannot change after creation (id: {id})")]
    EntityTypeImmutable { id: EntityId },
}

#[derive(Debug, Error)]
pub enum GestorError {
    // IO-related.
    #[error("error reading or writing snapshot file")]
    Io(#[from] std::io::Error),

    // Parsing-related.
    #[error("invalid JSON in '{collection}' collection")]
    InvalidJson {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid ISO date: '{date}'")]
    InvalidIsoDate { date: String },
    #[error("unknown entity type: '{value}'")]
    UnknownEntityType { value: String },
    #[error("unknown invoice status: '{value}'")]
    UnknownInvoiceStatus { value: String },
    #[error("invalid attachment payload")]
    InvalidAttachment {
        #[source]
        source: base64::DecodeError,
    },

    // Lookup-related.
    #[error("entity not found: {id}")]
    EntityNotFound { id: EntityId },
    #[error("invoice not found: {id}")]
    InvoiceNotFound { id: InvoiceId },
    #[error("maturity not found: {id}")]
    MaturityNotFound { id: MaturityId },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

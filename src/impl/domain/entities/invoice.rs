use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;

use crate::errors::GestorError;

use super::ids::{EntityId, InvoiceId, MaturityId};

/// Aggregate payment state of an invoice, derived from its maturities' paid
/// flags. Never authoritative on its own; re-derived at every save boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    Pending,
    Partial,
    Paid,
}

/// A scheduled installment of an invoice's total amount.
///
/// `payment_date` is present iff `paid` is true; the pairing is normalized by
/// the payment toggle and by draft finalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Maturity {
    pub id: MaturityId,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
}

/// Opaque attached document, stored as base64 text (optionally in data-URI
/// form, which is how the original records look). The core stores and
/// retrieves it without interpreting the contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment(String);

const DATA_URI_PREFIX: &str = "data:application/pdf;base64,";

impl PdfAttachment {
    /// Wrap already-encoded payload text as-is.
    pub fn from_raw(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// Encode raw document bytes into the stored data-URI form.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into document bytes, tolerating a data-URI prefix.
    pub fn decode(&self) -> Result<Vec<u8>, GestorError> {
        let encoded = self
            .0
            .strip_prefix(DATA_URI_PREFIX)
            .unwrap_or(self.0.as_str());
        STANDARD
            .decode(encoded)
            .map_err(|source| GestorError::InvalidAttachment { source })
    }
}

/// A billable document issued to (client) or received from (supplier) an
/// entity, embedding its maturities inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub entity_id: EntityId,
    /// Free-text invoice number; uniqueness is not required.
    pub number: String,
    pub project_address: Option<String>,
    pub issue_date: NaiveDate,
    pub total_amount: f64,
    pub maturities: Vec<Maturity>,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub pdf: Option<PdfAttachment>,
}

impl Invoice {
    /// Sum of installment amounts still unpaid.
    pub fn pending_amount(&self) -> f64 {
        self.maturities
            .iter()
            .filter(|m| !m.paid)
            .map(|m| m.amount)
            .sum()
    }
}

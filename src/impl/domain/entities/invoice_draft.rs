use chrono::NaiveDate;

use super::ids::{EntityId, InvoiceId, MaturityId};

/// Edit-time shape of a maturity row. Identical to the persisted maturity
/// except for the ephemeral percentage annotation, which records that the
/// amount was last driven by a percentage of the invoice total. The
/// annotation is dropped on finalization and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MaturityDraft {
    pub id: MaturityId,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
    /// Raw percentage text as typed, kept even when non-numeric so a later
    /// total change can revalidate it.
    pub percentage: Option<String>,
}

impl MaturityDraft {
    /// Blank row: no due date, zero amount, unpaid.
    pub fn blank() -> Self {
        Self {
            id: MaturityId::random(),
            due_date: None,
            amount: 0.0,
            paid: false,
            payment_date: None,
            percentage: None,
        }
    }
}

/// Edit-time shape of an invoice under construction or re-edit. Always holds
/// at least one maturity row. The reconciliation operations live in
/// `domain::logic::reconciliation`.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub id: InvoiceId,
    pub entity_id: Option<EntityId>,
    pub number: String,
    pub project_address: Option<String>,
    pub issue_date: NaiveDate,
    /// None until the total has been entered; zero counts as not set for
    /// validation purposes.
    pub total_amount: Option<f64>,
    pub maturities: Vec<MaturityDraft>,
    pub notes: Option<String>,
    pub pdf: Option<super::invoice::PdfAttachment>,
}

/// Result of checking the maturity amounts against the invoice total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceCheck {
    pub total: f64,
    pub maturities_sum: f64,
    /// `total - maturities_sum`, surfaced to the user for correction.
    pub difference: f64,
}

/// Absolute tolerance when comparing the maturity sum to the total.
pub const BALANCE_EPSILON: f64 = 0.01;

impl BalanceCheck {
    pub fn is_balanced(&self) -> bool {
        self.difference.abs() <= BALANCE_EPSILON
    }
}

use crate::entities::{InvoiceStatus, Maturity};

/// Derive the invoice-level status from the maturities' paid flags.
///
/// Pure function with no hysteresis: it never looks at the previously stored
/// status. Called after every payment toggle and whenever an invoice is
/// (re-)built from a draft.
pub(crate) fn derive_status(maturities: &[Maturity]) -> InvoiceStatus {
    let all_paid = !maturities.is_empty() && maturities.iter().all(|m| m.paid);
    let some_paid = maturities.iter().any(|m| m.paid);
    if all_paid {
        InvoiceStatus::Paid
    } else if some_paid {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Pending
    }
}

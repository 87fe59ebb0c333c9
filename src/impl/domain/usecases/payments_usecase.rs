use chrono::NaiveDate;
use tracing::debug;

use crate::{
    data::{
        datasources::key_value_datasource::{KeyValueDatasource, SharedDatasource},
        repositories::invoice_repository_impl::InvoiceRepositoryImpl,
    },
    domain::{
        logic::status_derivation::derive_status,
        repositories::invoice_repository::InvoiceRepository,
    },
    entities::{Invoice, InvoiceId, MaturityId},
    errors::GestorError,
};

/// The payment toggle: the only true state machine in the system. A maturity
/// moves Unpaid -> Paid (capturing the supplied payment date) or
/// Paid -> Unpaid (clearing it); either way the invoice status is re-derived
/// over the full maturity list and the whole invoice record is rewritten.
pub(crate) trait PaymentsUsecase {
    /// Mark an installment paid. The date is required by signature; it is not
    /// checked against the due date or today, so backdating is allowed.
    fn mark_paid(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
        payment_date: NaiveDate,
    ) -> Result<Invoice, GestorError>;

    /// Undo a payment, clearing the payment date unconditionally.
    fn undo_payment(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
    ) -> Result<Invoice, GestorError>;
}

pub(crate) struct PaymentsUsecaseImpl<DS: KeyValueDatasource> {
    invoice_repository: InvoiceRepositoryImpl<DS>,
}

impl<DS: KeyValueDatasource> PaymentsUsecaseImpl<DS> {
    pub(crate) fn new(datasource: SharedDatasource<DS>) -> Self {
        Self {
            invoice_repository: InvoiceRepositoryImpl::new(datasource),
        }
    }

    fn toggle(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
        paid: bool,
        payment_date: Option<NaiveDate>,
    ) -> Result<Invoice, GestorError> {
        let mut invoice = self
            .invoice_repository
            .find_by_id(invoice_id)?
            .ok_or_else(|| GestorError::InvoiceNotFound {
                id: invoice_id.clone(),
            })?;
        let maturity = invoice
            .maturities
            .iter_mut()
            .find(|m| &m.id == maturity_id)
            .ok_or_else(|| GestorError::MaturityNotFound {
                id: maturity_id.clone(),
            })?;
        maturity.paid = paid;
        maturity.payment_date = if paid { payment_date } else { None };
        invoice.status = derive_status(&invoice.maturities);
        self.invoice_repository.save(&invoice)?;
        Ok(invoice)
    }
}

impl<DS: KeyValueDatasource> PaymentsUsecase for PaymentsUsecaseImpl<DS> {
    fn mark_paid(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
        payment_date: NaiveDate,
    ) -> Result<Invoice, GestorError> {
        let invoice = self.toggle(invoice_id, maturity_id, true, Some(payment_date))?;
        debug!(
            invoice = %invoice_id,
            maturity = %maturity_id,
            %payment_date,
            status = ?invoice.status,
            "maturity marked paid"
        );
        Ok(invoice)
    }

    fn undo_payment(
        &self,
        invoice_id: &InvoiceId,
        maturity_id: &MaturityId,
    ) -> Result<Invoice, GestorError> {
        let invoice = self.toggle(invoice_id, maturity_id, false, None)?;
        debug!(
            invoice = %invoice_id,
            maturity = %maturity_id,
            status = ?invoice.status,
            "payment undone"
        );
        Ok(invoice)
    }
}

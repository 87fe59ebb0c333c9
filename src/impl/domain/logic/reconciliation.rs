use chrono::NaiveDate;

use crate::{
    domain::logic::{round2, status_derivation::derive_status},
    entities::{
        BalanceCheck, Invoice, InvoiceDraft, InvoiceId, Maturity, MaturityDraft, MaturityId,
    },
    errors::ValidationError,
};

impl InvoiceDraft {
    /// Fresh draft with a single blank maturity row, matching the initial
    /// state of the invoice form.
    pub fn new(issue_date: NaiveDate) -> Self {
        Self {
            id: InvoiceId::random(),
            entity_id: None,
            number: String::new(),
            project_address: None,
            issue_date,
            total_amount: None,
            maturities: vec![MaturityDraft::blank()],
            notes: None,
            pdf: None,
        }
    }

    /// Draft seeded from a stored invoice for re-editing. Ids, paid flags and
    /// payment dates are preserved; percentage annotations start empty (they
    /// are never persisted).
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            entity_id: Some(invoice.entity_id.clone()),
            number: invoice.number.clone(),
            project_address: invoice.project_address.clone(),
            issue_date: invoice.issue_date,
            total_amount: Some(invoice.total_amount),
            maturities: invoice
                .maturities
                .iter()
                .map(|m| MaturityDraft {
                    id: m.id.clone(),
                    due_date: Some(m.due_date),
                    amount: m.amount,
                    paid: m.paid,
                    payment_date: m.payment_date,
                    percentage: None,
                })
                .collect(),
            notes: invoice.notes.clone(),
            pdf: invoice.pdf.clone(),
        }
    }

    /// Total as used by the reconciliation arithmetic (unset counts as zero).
    pub fn effective_total(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }

    /// Append a blank maturity row and return its id.
    pub fn add_maturity(&mut self) -> MaturityId {
        let row = MaturityDraft::blank();
        let id = row.id.clone();
        self.maturities.push(row);
        id
    }

    /// Remove a maturity row. Removing the last remaining row is refused;
    /// unknown ids are a no-op.
    pub fn remove_maturity(&mut self, id: &MaturityId) -> Result<(), ValidationError> {
        if self.maturities.len() == 1 {
            return Err(ValidationError::LastMaturity);
        }
        self.maturities.retain(|m| &m.id != id);
        Ok(())
    }

    pub fn set_maturity_due_date(&mut self, id: &MaturityId, date: NaiveDate) {
        if let Some(row) = self.maturities.iter_mut().find(|m| &m.id == id) {
            row.due_date = Some(date);
        }
    }

    /// Direct amount edit. Clears the percentage annotation: the two input
    /// modes are mutually exclusive per edit and the last writer wins.
    pub fn set_maturity_amount(&mut self, id: &MaturityId, amount: f64) {
        if let Some(row) = self.maturities.iter_mut().find(|m| &m.id == id) {
            row.amount = amount;
            row.percentage = None;
        }
    }

    /// Percentage edit. The raw text is stored as the annotation even when it
    /// does not parse, so a later total change can revalidate it. The amount
    /// is only recomputed when the text parses and the total is set.
    pub fn set_maturity_percentage(&mut self, id: &MaturityId, raw: &str) {
        let total = self.effective_total();
        if let Some(row) = self.maturities.iter_mut().find(|m| &m.id == id) {
            if raw.trim().is_empty() {
                row.percentage = None;
                return;
            }
            row.percentage = Some(raw.to_string());
            if total > 0.0 {
                if let Ok(pct) = raw.trim().parse::<f64>() {
                    row.amount = round2(total * pct / 100.0);
                }
            }
        }
    }

    /// Change the invoice total and propagate it: every row still carrying a
    /// parseable percentage annotation is recomputed; rows last edited by
    /// direct amount are left untouched.
    pub fn set_total_amount(&mut self, total: f64) {
        self.total_amount = Some(total);
        if total <= 0.0 {
            return;
        }
        for row in &mut self.maturities {
            if let Some(pct) = row
                .percentage
                .as_deref()
                .and_then(|p| p.trim().parse::<f64>().ok())
            {
                row.amount = round2(total * pct / 100.0);
            }
        }
    }

    /// Compare the maturity amounts against the total.
    pub fn balance(&self) -> BalanceCheck {
        let total = self.effective_total();
        let maturities_sum: f64 = self.maturities.iter().map(|m| m.amount).sum();
        BalanceCheck {
            total,
            maturities_sum,
            difference: total - maturities_sum,
        }
    }

    /// Validate and convert into a persistable invoice, dropping the
    /// percentage annotations and re-deriving the status from the paid flags.
    ///
    /// Validation order mirrors the original form: entity, number, total, due
    /// dates, balance. The first failure blocks the save; nothing partial is
    /// ever written.
    pub fn build(&self) -> Result<Invoice, ValidationError> {
        let entity_id = self
            .entity_id
            .clone()
            .ok_or(ValidationError::MissingEntity)?;
        if self.number.trim().is_empty() {
            return Err(ValidationError::MissingNumber);
        }
        let total = self.effective_total();
        if total <= 0.0 {
            return Err(ValidationError::MissingTotalAmount);
        }
        let balance = self.balance();
        let maturities = self
            .maturities
            .iter()
            .map(|row| {
                Ok(Maturity {
                    id: row.id.clone(),
                    due_date: row.due_date.ok_or(ValidationError::MissingDueDate)?,
                    amount: row.amount,
                    paid: row.paid,
                    // Keep the paid/payment_date pairing honest even if the
                    // draft was mutated externally.
                    payment_date: if row.paid { row.payment_date } else { None },
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        if !balance.is_balanced() {
            return Err(ValidationError::Unbalanced {
                difference: balance.difference,
            });
        }
        let status = derive_status(&maturities);
        Ok(Invoice {
            id: self.id.clone(),
            entity_id,
            number: self.number.trim().to_string(),
            project_address: self.project_address.clone(),
            issue_date: self.issue_date,
            total_amount: total,
            maturities,
            status,
            notes: self.notes.clone(),
            pdf: self.pdf.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityId, InvoiceStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft_with_entity() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(date(2024, 1, 1));
        draft.entity_id = Some(EntityId::from("1"));
        draft.number = "F-2024-001".to_string();
        draft
    }

    #[test]
    fn starts_with_one_blank_row() {
        let draft = InvoiceDraft::new(date(2024, 1, 1));
        assert_eq!(draft.maturities.len(), 1);
        assert_eq!(draft.maturities[0].amount, 0.0);
        assert!(draft.maturities[0].due_date.is_none());
        assert!(!draft.maturities[0].paid);
    }

    #[test]
    fn refuses_removing_last_row() {
        let mut draft = InvoiceDraft::new(date(2024, 1, 1));
        let only = draft.maturities[0].id.clone();
        assert_eq!(
            draft.remove_maturity(&only),
            Err(ValidationError::LastMaturity)
        );
        assert_eq!(draft.maturities.len(), 1);

        let second = draft.add_maturity();
        assert!(draft.remove_maturity(&second).is_ok());
        assert_eq!(draft.maturities.len(), 1);
    }

    #[test]
    fn fifty_percent_split_of_1210() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1210.0);
        let first = draft.maturities[0].id.clone();
        let second = draft.add_maturity();
        draft.set_maturity_percentage(&first, "50");
        draft.set_maturity_percentage(&second, "50");

        assert_eq!(draft.maturities[0].amount, 605.0);
        assert_eq!(draft.maturities[1].amount, 605.0);
        let balance = draft.balance();
        assert!(balance.is_balanced());
        assert_eq!(balance.maturities_sum, 1210.0);

        draft.set_maturity_due_date(&first, date(2024, 2, 1));
        draft.set_maturity_due_date(&second, date(2024, 3, 1));
        let invoice = draft.build().unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.total_amount, 1210.0);
    }

    #[test]
    fn percentage_without_total_stores_annotation_only() {
        let mut draft = draft_with_entity();
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_percentage(&row, "50");
        assert_eq!(draft.maturities[0].amount, 0.0);
        assert_eq!(draft.maturities[0].percentage.as_deref(), Some("50"));

        // Setting the total later recomputes the annotated row.
        draft.set_total_amount(1000.0);
        assert_eq!(draft.maturities[0].amount, 500.0);
    }

    #[test]
    fn direct_amount_edit_clears_annotation() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1000.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_percentage(&row, "50");
        assert_eq!(draft.maturities[0].amount, 500.0);

        draft.set_maturity_amount(&row, 400.0);
        assert!(draft.maturities[0].percentage.is_none());

        // Total changes no longer touch the row.
        draft.set_total_amount(2000.0);
        assert_eq!(draft.maturities[0].amount, 400.0);
    }

    #[test]
    fn total_change_recomputes_only_annotated_rows() {
        // Total 1000 -> 2000 with one row at "50" and one at a fixed 400.
        let mut draft = draft_with_entity();
        draft.set_total_amount(1000.0);
        let annotated = draft.maturities[0].id.clone();
        let fixed = draft.add_maturity();
        draft.set_maturity_percentage(&annotated, "50");
        draft.set_maturity_amount(&fixed, 400.0);

        draft.set_total_amount(2000.0);
        assert_eq!(draft.maturities[0].amount, 1000.0);
        assert_eq!(draft.maturities[1].amount, 400.0);

        let balance = draft.balance();
        assert!(!balance.is_balanced());
        assert_eq!(balance.difference, 600.0);

        draft.set_maturity_due_date(&annotated, date(2024, 2, 1));
        draft.set_maturity_due_date(&fixed, date(2024, 3, 1));
        assert!(matches!(
            draft.build(),
            Err(ValidationError::Unbalanced { .. })
        ));
    }

    #[test]
    fn non_numeric_percentage_keeps_amount_and_raw_text() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1000.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_amount(&row, 250.0);
        draft.set_maturity_percentage(&row, "half");
        assert_eq!(draft.maturities[0].amount, 250.0);
        assert_eq!(draft.maturities[0].percentage.as_deref(), Some("half"));

        // Still ignored when the total changes.
        draft.set_total_amount(2000.0);
        assert_eq!(draft.maturities[0].amount, 250.0);
    }

    #[test]
    fn zero_and_negative_percentages_compute_through() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1000.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_percentage(&row, "0");
        assert_eq!(draft.maturities[0].amount, 0.0);
        draft.set_maturity_percentage(&row, "-10");
        assert_eq!(draft.maturities[0].amount, -100.0);
    }

    #[test]
    fn percentage_amounts_round_to_two_decimals() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1000.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_percentage(&row, "33.333");
        assert_eq!(draft.maturities[0].amount, 333.33);
        // Recomputing the same pair is deterministic.
        draft.set_maturity_percentage(&row, "33.333");
        assert_eq!(draft.maturities[0].amount, 333.33);
    }

    #[test]
    fn balance_tolerance_is_a_cent() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(100.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_due_date(&row, date(2024, 2, 1));

        draft.set_maturity_amount(&row, 99.995);
        assert!(draft.balance().is_balanced());
        assert!(draft.build().is_ok());

        draft.set_maturity_amount(&row, 99.9);
        assert!(!draft.balance().is_balanced());
        assert!(matches!(
            draft.build(),
            Err(ValidationError::Unbalanced { .. })
        ));
    }

    #[test]
    fn validation_order_matches_the_form() {
        let mut draft = InvoiceDraft::new(date(2024, 1, 1));
        assert_eq!(draft.build(), Err(ValidationError::MissingEntity));

        draft.entity_id = Some(EntityId::from("1"));
        assert_eq!(draft.build(), Err(ValidationError::MissingNumber));

        draft.number = "F-1".to_string();
        assert_eq!(draft.build(), Err(ValidationError::MissingTotalAmount));

        draft.set_total_amount(100.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_amount(&row, 100.0);
        assert_eq!(draft.build(), Err(ValidationError::MissingDueDate));

        draft.set_maturity_due_date(&row, date(2024, 2, 1));
        assert!(draft.build().is_ok());
    }

    #[test]
    fn build_normalizes_payment_date_pairing() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(100.0);
        let row = draft.maturities[0].id.clone();
        draft.set_maturity_amount(&row, 100.0);
        draft.set_maturity_due_date(&row, date(2024, 2, 1));
        // Simulate an externally mutated draft with a stale payment date.
        draft.maturities[0].payment_date = Some(date(2024, 1, 15));

        let invoice = draft.build().unwrap();
        assert!(!invoice.maturities[0].paid);
        assert!(invoice.maturities[0].payment_date.is_none());
    }

    #[test]
    fn from_invoice_round_trips() {
        let mut draft = draft_with_entity();
        draft.set_total_amount(1210.0);
        let first = draft.maturities[0].id.clone();
        let second = draft.add_maturity();
        draft.set_maturity_percentage(&first, "50");
        draft.set_maturity_percentage(&second, "50");
        draft.set_maturity_due_date(&first, date(2024, 2, 1));
        draft.set_maturity_due_date(&second, date(2024, 3, 1));
        let invoice = draft.build().unwrap();

        let reopened = InvoiceDraft::from_invoice(&invoice);
        assert_eq!(reopened.build().unwrap(), invoice);
        // Annotations are not carried over.
        assert!(reopened.maturities.iter().all(|m| m.percentage.is_none()));
    }
}

use crate::{
    entities::{EntityType, PendingMaturity},
    presentation::{amount_fmt::format_eur, date_fmt::format_display_date},
};

pub(crate) struct SchedulePrinter;

impl SchedulePrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Render the pending collection/payment schedule as plain text, one line
    /// per unpaid installment, already sorted by due date by the caller.
    pub(crate) fn print_schedule(
        &self,
        entity_type: EntityType,
        pending: &[PendingMaturity],
    ) -> String {
        let title = match entity_type {
            EntityType::Client => "Cobros pendientes",
            EntityType::Supplier => "Pagos pendientes",
        };
        let mut out = String::new();
        out.push_str(&format!(
            "; --- {} {}\n\n",
            title,
            "-".repeat(74_usize.saturating_sub(title.len()))
        ));
        if pending.is_empty() {
            out.push_str("(nada pendiente)\n");
            return out;
        }
        let total: f64 = pending.iter().map(|p| p.maturity.amount).sum();
        for item in pending {
            out.push_str(&format!(
                "{}  {:<30}  {:<12}  {:>14}\n",
                format_display_date(item.maturity.due_date),
                item.entity_name,
                item.invoice_number,
                format_eur(item.maturity.amount),
            ));
        }
        out.push_str(&format!("{:>62}\n", format!("Total: {}", format_eur(total))));
        out
    }
}

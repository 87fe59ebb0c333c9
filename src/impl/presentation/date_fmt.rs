use chrono::NaiveDate;

/// Display form used throughout the app: `dd/mm/yyyy`.
pub(crate) fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

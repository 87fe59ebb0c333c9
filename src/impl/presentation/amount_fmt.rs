use num_format::{Locale, ToFormattedString as _};

/// Format a monetary amount with thousands separators, two decimal places and
/// the euro sign (ex. `1,210.00 €`).
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale. The domain is single-currency.
pub(crate) fn format_eur(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let integer_part = (cents / 100).to_formatted_string(&Locale::en);
    format!(
        "{}{}.{:02} €",
        if negative { "-" } else { "" },
        integer_part,
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_separators_and_cents() {
        assert_eq!(format_eur(1210.0), "1,210.00 €");
        assert_eq!(format_eur(605.5), "605.50 €");
        assert_eq!(format_eur(0.0), "0.00 €");
        assert_eq!(format_eur(1234567.891), "1,234,567.89 €");
        assert_eq!(format_eur(-99.9), "-99.90 €");
    }
}

use regex::Regex;

/// Spanish NIF/CIF format: 9 characters, letter-or-digit prefix, 7 digits,
/// letter-or-digit control character (ex. `12345678Z`, `B12345678`). Checksum
/// validation is intentionally out of scope.
pub(crate) fn is_valid_tax_id(value: &str) -> bool {
    if value.len() != 9 {
        return false;
    }
    let re =
        Regex::new(r"^[0-9A-Z][0-9]{7}[0-9A-Z]$").expect("hardcoded regex should be valid");
    re.is_match(value)
}

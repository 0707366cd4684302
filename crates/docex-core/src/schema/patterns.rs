//! Regex patterns for checking extracted field values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numbers: optional sign, optional currency, thousands separators, decimals
    pub static ref NUMBER_VALUE: Regex = Regex::new(
        r"^-?[$€£]?\s?-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$"
    ).unwrap();

    // ISO calendar date
    pub static ref ISO_DATE: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_pattern() {
        assert!(NUMBER_VALUE.is_match("1250"));
        assert!(NUMBER_VALUE.is_match("$1,250.00"));
        assert!(NUMBER_VALUE.is_match("€ 99.90"));
        assert!(NUMBER_VALUE.is_match("-$12.00"));
        assert!(!NUMBER_VALUE.is_match("12,50"));
        assert!(!NUMBER_VALUE.is_match("$"));
        assert!(!NUMBER_VALUE.is_match("12 apples"));
    }

    #[test]
    fn test_iso_date_pattern() {
        assert!(ISO_DATE.is_match("2024-03-15"));
        assert!(!ISO_DATE.is_match("2024-3-15"));
        assert!(!ISO_DATE.is_match("2024-03-15T10:00:00"));
    }
}

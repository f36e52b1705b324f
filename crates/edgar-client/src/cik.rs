//! CIK (Central Index Key) formatting.

use std::fmt::Display;

/// Pad a CIK to 10 digits as required by SEC EDGAR URLs.
///
/// Accepts anything with a decimal string form (numeric CIKs included).
/// Values already 10 characters or longer are returned unchanged; no
/// truncation and no validation is performed.
///
/// # Example
/// ```
/// use edgar_client::cik::pad_cik;
///
/// assert_eq!(pad_cik(320193), "0000320193");
/// assert_eq!(pad_cik("320193"), "0000320193");
/// assert_eq!(pad_cik("1234567890"), "1234567890");
/// ```
pub fn pad_cik(cik: impl Display) -> String {
    format!("{:0>10}", cik.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("320193", "0000320193")]
    #[case("1234", "0000001234")]
    #[case("0", "0000000000")]
    #[case("1234567890", "1234567890")]
    #[case("12345678901", "12345678901")]
    fn pads_strings(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(pad_cik(input), expected);
    }

    #[test]
    fn pads_numbers() {
        assert_eq!(pad_cik(320193u64), "0000320193");
        assert_eq!(pad_cik(7i32), "0000000007");
    }

    #[test]
    fn padded_value_round_trips() {
        let padded = pad_cik(320193u64);
        assert_eq!(padded.len(), 10);
        assert_eq!(padded.parse::<u64>().unwrap(), 320193);
    }
}

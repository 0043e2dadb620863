//! Price extraction from free-form tile text.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Currency marker immediately followed by an amount: `$29`, `C$39.00`, `CA$ 45`.
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:CA\$|C\$|\$)\s?(\d+(?:\.\d+)?)").unwrap());

/// Returns the first currency-prefixed amount in `text`.
///
/// Thousands separators are stripped before matching. A number that only
/// appears before its currency marker (`1,299.50 CA$`) is not recognized.
pub fn parse_price(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }

    let cleaned = text.replace(',', "");
    let caps = PRICE.captures(&cleaned)?;
    caps.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_markers() {
        assert_eq!(parse_price("C$39.00"), Some(39.0));
        assert_eq!(parse_price("$29"), Some(29.0));
        assert_eq!(parse_price("CA$45.50"), Some(45.5));
        assert_eq!(parse_price("ca$12"), Some(12.0));
        assert_eq!(parse_price("c$ 18.25"), Some(18.25));
    }

    #[test]
    fn test_parse_price_thousands() {
        assert_eq!(parse_price("$1,299.50"), Some(1299.5));
        assert_eq!(parse_price("Sale C$1,000"), Some(1000.0));
    }

    #[test]
    fn test_parse_price_first_match_wins() {
        assert_eq!(parse_price("Now $29.00 Was $68.00"), Some(29.0));
        assert_eq!(parse_price("Sale Price$39Regular Price$98"), Some(39.0));
    }

    #[test]
    fn test_parse_price_none() {
        assert_eq!(parse_price("no price"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("$"), None);
        assert_eq!(parse_price("39.00"), None);
    }

    #[test]
    fn test_parse_price_suffix_marker_unsupported() {
        assert_eq!(parse_price("1,299.50 CA$"), None);
    }
}

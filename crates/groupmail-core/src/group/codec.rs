//! Encoding of address lists into the single `emailIds` text column.
//!
//! The column holds addresses joined by `,` with no escaping. Readers strip
//! whitespace around each element; writers never add any.

const DELIMITER: char = ',';

/// Joins addresses into the column format.
#[must_use]
pub fn encode_addresses<S: AsRef<str>>(addresses: &[S]) -> String {
    let mut encoded = String::new();
    for (i, address) in addresses.iter().enumerate() {
        if i > 0 {
            encoded.push(DELIMITER);
        }
        encoded.push_str(address.as_ref());
    }
    encoded
}

/// Splits a column value back into addresses.
///
/// Empty pieces between delimiters are dropped before trimming, so an empty
/// column decodes to an empty list.
#[must_use]
pub fn decode_addresses(encoded: &str) -> Vec<String> {
    encoded
        .split(DELIMITER)
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_without_spaces() {
        let addresses = vec!["a@b.com".to_string(), "c@d.com".to_string()];
        assert_eq!(encode_addresses(&addresses), "a@b.com,c@d.com");
    }

    #[test]
    fn test_encode_empty() {
        let addresses: Vec<String> = Vec::new();
        assert_eq!(encode_addresses(&addresses), "");
    }

    #[test]
    fn test_decode_trims_whitespace() {
        assert_eq!(
            decode_addresses(" a@b.com ,\tc@d.com"),
            vec!["a@b.com", "c@d.com"]
        );
    }

    #[test]
    fn test_decode_skips_empty_pieces() {
        assert!(decode_addresses("").is_empty());
        assert_eq!(decode_addresses("a@b.com,,c@d.com,"), vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn test_decode_keeps_order() {
        let addresses = vec![
            "z@y.com".to_string(),
            "a@b.com".to_string(),
            "m@n.org".to_string(),
        ];
        assert_eq!(decode_addresses(&encode_addresses(&addresses)), addresses);
    }
}

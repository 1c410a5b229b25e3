use once_cell::sync::Lazy;
use regex::Regex;

/// Non-English tokens mapped to the English keyword the gate and extractors look for.
/// Longer tokens come first so a prefix never shadows them.
const LOCALE_TOKENS: &[(&str, &str)] = &[
    ("रुपये", " Rs."),
    ("रु.", " Rs."),
    ("₨", " Rs."),
    ("प्राप्त", " received "),
    ("जमा", " credited "),
    ("डेबिट", " debited "),
    ("नामे", " debited "),
    ("भेजे", " sent "),
];

static CURRENCY_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\brs\.?|\binr|₹)(\d)").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Prepares raw SMS text for matching.
///
/// Locale tokens become English keywords, a space is inserted between a currency
/// marker and a glued amount (`Rs10` -> `Rs 10`), and every whitespace run collapses
/// to a single space. `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out = text.to_string();

    for (token, replacement) in LOCALE_TOKENS {
        if out.contains(token) {
            out = out.replace(token, replacement);
        }
    }

    let out = CURRENCY_DIGIT.replace_all(&out, "${1} ${2}");
    let out = WHITESPACE.replace_all(&out, " ");

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize("  Received\nRs. 10\r\n\tin  your\u{a0}account "),
            "Received Rs. 10 in your account"
        );
    }

    #[test]
    fn test_separates_currency_and_digits() {
        assert_eq!(normalize("credited with Rs10.99"), "credited with Rs 10.99");
        assert_eq!(normalize("Received Rs.10.37 in"), "Received Rs. 10.37 in");
        assert_eq!(normalize("INR500 credited"), "INR 500 credited");
        assert_eq!(normalize("₹1,200 received"), "₹ 1,200 received");
    }

    #[test]
    fn test_leaves_words_containing_currency_letters() {
        assert_eq!(normalize("Mrs5 and LINR7"), "Mrs5 and LINR7");
    }

    #[test]
    fn test_maps_locale_tokens() {
        assert_eq!(normalize("रु.500 जमा"), "Rs. 500 credited");
        assert_eq!(normalize("₨250 प्राप्त"), "Rs. 250 received");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Received Rs.10.37 in your Kotak Bank AC X2052 from bharath.0515-3@waaxis on 31-08-25.UPI Ref:136056932435.",
            "रुपये1000   जमा\n\nUPI",
            "",
            "   ",
            "INR1,00,000.00 credited to A/c XX1234",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }
}

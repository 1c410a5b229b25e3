use once_cell::sync::Lazy;
use regex::Regex;

use super::vpa::is_vpa;

/// A phrase after which the counterparty name starts
struct NamePattern {
    name: &'static str,
    regex: Regex,
}

static NAME_PATTERNS: Lazy<Vec<NamePattern>> = Lazy::new(create_name_patterns);

/// Where a captured name tail stops: a trailing clause, sentence end or bracket
static CLAUSE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\s+(?:on|via|with|upi|ref|to|in|at|for|is|has|thru|through|dated|vpa|utr|txn",
        r"|imps|neft|rtgs|a/c|ac|acct|account|avl|avbl|bal|info)\b",
        r"|[.;,!](?:\s|$)|[()\[\]:]"
    ))
    .unwrap()
});

static ACCOUNT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:[x*]+\d+|\d{4,})$").unwrap());

const MAX_NAME_CHARS: usize = 60;

/// Tails that name the recipient's own account or a payment rail
const NOT_A_NAME_PREFIXES: &[&str] = &["your", "you", "ur", "a/c", "ac", "acct", "account"];
const RAIL_WORDS: &[&str] = &["upi", "imps", "neft", "rtgs", "atm", "cash", "cheque", "netbanking"];

fn create_name_patterns() -> Vec<NamePattern> {
    vec![
        NamePattern {
            name: "received_from",
            regex: Regex::new(r"(?i)\breceived\s+from\s*:?\s*").unwrap(),
        },
        NamePattern {
            name: "credited_to",
            regex: Regex::new(r"(?i)\bcredited\s+to\s*:?\s*").unwrap(),
        },
        NamePattern {
            name: "from",
            regex: Regex::new(r"(?i)\bfrom\s*:?\s*").unwrap(),
        },
        NamePattern {
            name: "by",
            regex: Regex::new(r"(?i)\bby\s*:?\s*").unwrap(),
        },
        NamePattern {
            name: "beneficiary",
            regex: Regex::new(r"(?i)\bbeneficiary(?:\s+name)?\s*:?\s*").unwrap(),
        },
    ]
}

/// Extracts the counterparty name; patterns are tried in order and a tail that
/// cleans down to nothing usable falls through to the next occurrence or pattern.
pub fn extract_sender_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        for m in pattern.regex.find_iter(text) {
            if let Some(name) = clean_name(&text[m.end()..]) {
                tracing::debug!(pattern = pattern.name, name = %name, "Matched sender name");
                return Some(name);
            }
        }
    }
    None
}

fn clean_name(tail: &str) -> Option<String> {
    let end = CLAUSE_END.find(tail).map(|m| m.start()).unwrap_or(tail.len());
    let span = &tail[..end];
    if span.chars().count() > MAX_NAME_CHARS {
        return None;
    }

    let name = span
        .split_whitespace()
        .filter(|token| !ACCOUNT_TOKEN.is_match(token))
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim_matches(|c: char| matches!(c, '.' | ',' | ':' | ';' | '-')).trim();

    if name.is_empty()
        || !name.chars().any(|c| c.is_alphabetic())
        || is_vpa(name)
        || is_account_phrase(name)
    {
        return None;
    }

    Some(name.to_string())
}

fn is_account_phrase(name: &str) -> bool {
    let lower = name.to_lowercase();
    let first = lower.split_whitespace().next().unwrap_or_default();
    NOT_A_NAME_PREFIXES.contains(&first) || RAIL_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_with_clause() {
        assert_eq!(
            extract_sender_name(
                "credited with Rs 10.99 ... from Test User with VPA test@upi UPI Ref No 123456789012"
            )
            .as_deref(),
            Some("Test User")
        );
    }

    #[test]
    fn test_vpa_is_not_a_name() {
        assert_eq!(
            extract_sender_name(
                "Received Rs. 10.37 in your Kotak Bank AC X2052 from bharath.0515-3@waaxis on 31-08-25.UPI Ref:136056932435."
            ),
            None
        );
    }

    #[test]
    fn test_received_from_wins_over_from() {
        assert_eq!(
            extract_sender_name("Rs 200 received from RAMESH KUMAR on 02-09-25 from HDFC").as_deref(),
            Some("RAMESH KUMAR")
        );
    }

    #[test]
    fn test_own_account_falls_through() {
        assert_eq!(
            extract_sender_name("Rs 500 credited to your a/c XX1234 from ANITA SHARMA.").as_deref(),
            Some("ANITA SHARMA")
        );
    }

    #[test]
    fn test_strips_account_tokens() {
        assert_eq!(
            extract_sender_name("Rs 500 credited to SURESH XX1234 via IMPS").as_deref(),
            Some("SURESH")
        );
    }

    #[test]
    fn test_beneficiary() {
        assert_eq!(
            extract_sender_name("NEFT credit. Beneficiary Name: Acme Traders, Rs 5000").as_deref(),
            Some("Acme Traders")
        );
    }

    #[test]
    fn test_rejects_rails_and_digits() {
        assert_eq!(extract_sender_name("Rs 100 credited by NEFT"), None);
        assert_eq!(extract_sender_name("received from 9876543210"), None);
        assert_eq!(extract_sender_name("no counterparty here"), None);
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static LABELLED_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"upi\s*ref(?:erence)?(?:\s*\.?\s*(?:no|number))?",
        r"|ref(?:erence)?\s*\.?\s*(?:no|number)",
        r"|ref(?:erence)?",
        r"|txn\s*id",
        r"|trans(?:action)?\s*id",
        r"|utr(?:\s*no)?",
        r")\b\.?\s*[:#\-]?\s*",
        r"([A-Za-z0-9][A-Za-z0-9\-]{3,39})"
    ))
    .unwrap()
});

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9]+").unwrap());

static MASKED_ACCOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^x+\d+$").unwrap());

const MIN_LOOSE_LENGTH: usize = 6;
const MAX_REFERENCE_DIGITS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "upi", "imps", "neft", "rtgs", "ref", "refno", "txnid", "utr", "inr", "avlbal", "balance",
];

/// Extracts a transaction reference, preferring an explicitly labelled token.
pub fn extract_reference(text: &str) -> Option<String> {
    labelled(text).or_else(|| loose(text))
}

fn labelled(text: &str) -> Option<String> {
    LABELLED_REFERENCE.captures_iter(text).find_map(|caps| {
        let m = caps.get(1)?;
        // the token was cut at 40 chars
        if text[m.end()..].starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return None;
        }

        let token = m.as_str().trim_end_matches('-');
        if token.len() >= 4 && token.chars().any(|c| c.is_ascii_digit()) {
            Some(token.to_string())
        } else {
            None
        }
    })
}

fn loose(text: &str) -> Option<String> {
    WORD_TOKEN
        .find_iter(text)
        .filter(|m| is_reference_candidate(m.as_str()))
        .find(|m| !is_embedded(text, m.start(), m.end()))
        .map(|m| m.as_str().to_string())
}

fn is_reference_candidate(token: &str) -> bool {
    if token.len() < MIN_LOOSE_LENGTH {
        return false;
    }
    if !token.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if STOP_WORDS.contains(&token.to_lowercase().as_str()) {
        return false;
    }
    if MASKED_ACCOUNT.is_match(token) {
        return false;
    }
    // phone-number length
    !(token.chars().all(|c| c.is_ascii_digit()) && token.len() > MAX_REFERENCE_DIGITS)
}

/// True when the token is part of an amount, masked account or VPA rather than
/// standing on its own.
fn is_embedded(text: &str, start: usize, end: usize) -> bool {
    let before = &text[..start];
    let after = &text[end..];

    let prev = before.chars().next_back();
    if matches!(prev, Some('*') | Some('@')) || after.starts_with('@') {
        return true;
    }

    let mut rest = after.chars();
    if let (Some('.') | Some(','), Some(next)) = (rest.next(), rest.next()) {
        if next.is_ascii_digit() {
            return true;
        }
    }
    if let Some(sep @ ('.' | ',')) = prev {
        let digit_before = before[..before.len() - sep.len_utf8()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        if digit_before {
            return true;
        }
    }

    let head = before.trim_end().to_lowercase();
    head.ends_with("rs") || head.ends_with("rs.") || head.ends_with("inr") || head.ends_with('₹')
}

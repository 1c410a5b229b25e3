use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Digit runs this long are account or phone numbers, never amounts
const MAX_AMOUNT_DIGITS: usize = 10;

/// Western (`12,000`) or Indian (`1,25,000`) grouping, or a bare digit run
const NUMBER: &str = r"\d{1,3}(?:,\d{3})+|\d{1,2}(?:,\d{2})+,\d{3}|\d+";

static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:\brs\.?|\binr|₹)\s*((?:{})(?:\.\d{{1,2}})?)",
        NUMBER
    ))
    .unwrap()
});

static CONTEXT_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?i)\b(?:credited|debited|received|rcvd|deposited|refunded|paid|transferred|sent)\b",
            r"(?:\s+(?:with|of|by|for|amount|an|a)\b)*\s*:?\s*",
            r"(?:(?:rs\.?|inr|₹)\s*)?",
            r"((?:{})(?:\.\d{{1,2}})?)"
        ),
        NUMBER
    ))
    .unwrap()
});

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?:{})(?:\.\d+)?", NUMBER)).unwrap());

/// Which fallback tier produced the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    Currency,
    Context,
    Scan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMatch {
    pub value: Decimal,
    /// Numeric token as written, separators included
    pub raw: String,
    pub source: AmountSource,
}

/// Extracts the payment amount from normalized text; first successful tier wins.
pub fn extract_amount(text: &str) -> Option<AmountMatch> {
    currency_anchored(text)
        .or_else(|| context_anchored(text))
        .or_else(|| numeric_scan(text))
}

fn currency_anchored(text: &str) -> Option<AmountMatch> {
    CURRENCY_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(|m| !runs_on(text, m.end()))
        .find_map(|m| to_match(m.as_str(), AmountSource::Currency))
}

fn context_anchored(text: &str) -> Option<AmountMatch> {
    CONTEXT_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter(|m| !runs_on(text, m.end()))
        .filter(|m| digit_count(m.as_str()) <= MAX_AMOUNT_DIGITS)
        .find_map(|m| to_match(m.as_str(), AmountSource::Context))
}

fn numeric_scan(text: &str) -> Option<AmountMatch> {
    NUMERIC_TOKEN
        .find_iter(text)
        .filter(|m| !looks_like_date_or_code(text, m.start(), m.end()))
        .filter(|m| digit_count(m.as_str()) <= MAX_AMOUNT_DIGITS)
        .find_map(|m| to_match(m.as_str(), AmountSource::Scan))
}

/// Tokens glued to a date/time separator or a letter (`X2052`, `5G`), or that are
/// one piece of a dotted run like `31.08.2025`, are skipped.
fn looks_like_date_or_code(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    let glued = |c: Option<char>| matches!(c, Some('-') | Some('/') | Some(':'));
    glued(before)
        || glued(after)
        || before.is_some_and(|c| c.is_alphanumeric())
        || after.is_some_and(|c| c.is_alphabetic())
        || continues_number(&text[..start])
        || runs_on(text, end)
}

/// The number does not stop at `end`: a digit or a `.`/`,` plus digit follows
fn runs_on(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    match rest.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') | Some(',') => rest.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// `before` ends in a digit followed by `.` or `,`
fn continues_number(before: &str) -> bool {
    let mut chars = before.chars().rev();
    matches!(chars.next(), Some('.') | Some(','))
        && chars.next().is_some_and(|c| c.is_ascii_digit())
}

fn digit_count(token: &str) -> usize {
    token.chars().filter(|c| c.is_ascii_digit()).count()
}

fn to_match(raw: &str, source: AmountSource) -> Option<AmountMatch> {
    let value = parse_amount(raw)?;
    Some(AmountMatch {
        value,
        raw: raw.to_string(),
        source,
    })
}

/// Parses `1,00,000.50` style amounts exactly
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace(',', "")).ok()
}

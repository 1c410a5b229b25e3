use once_cell::sync::Lazy;
use regex::Regex;

pub(super) static VPA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+").unwrap());

/// First `local@domain` token in the text
pub fn extract_vpa(text: &str) -> Option<String> {
    VPA.find_iter(text).find_map(|m| clean(m.as_str()))
}

/// Whether the whole string is VPA-shaped
pub fn is_vpa(candidate: &str) -> bool {
    VPA.find(candidate)
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}

fn clean(raw: &str) -> Option<String> {
    let (local, domain) = raw.split_once('@')?;
    let local = local.trim_start_matches(['.', '-']);
    let domain = domain.trim_end_matches(['.', '-']);

    if local.is_empty() || !domain.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(format!("{local}@{domain}"))
}

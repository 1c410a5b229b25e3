use super::vpa::VPA;

/// Lowercase bank name fragments and the canonical name they map to.
///
/// Scanned in order and the first fragment found wins, so longer names that contain
/// a shorter entry ("union bank of india" vs "bank of india") are listed first.
pub const BANK_ALIASES: &[(&str, &str)] = &[
    ("kotak", "Kotak Mahindra Bank"),
    ("hdfc", "HDFC Bank"),
    ("icici", "ICICI Bank"),
    ("state bank", "State Bank of India"),
    ("sbi", "State Bank of India"),
    ("punjab national", "Punjab National Bank"),
    ("pnb", "Punjab National Bank"),
    ("axis", "Axis Bank"),
    ("bank of baroda", "Bank of Baroda"),
    ("baroda", "Bank of Baroda"),
    ("canara", "Canara Bank"),
    ("union bank", "Union Bank of India"),
    ("central bank", "Central Bank of India"),
    ("south indian", "South Indian Bank"),
    ("indian overseas", "Indian Overseas Bank"),
    ("indian bank", "Indian Bank"),
    ("bank of india", "Bank of India"),
    ("bank of maharashtra", "Bank of Maharashtra"),
    ("idfc", "IDFC FIRST Bank"),
    ("indusind", "IndusInd Bank"),
    ("yes bank", "Yes Bank"),
    ("yesbnk", "Yes Bank"),
    ("federal", "Federal Bank"),
    ("idbi", "IDBI Bank"),
    ("rbl", "RBL Bank"),
    ("bandhan", "Bandhan Bank"),
    ("au small", "AU Small Finance Bank"),
    ("equitas", "Equitas Small Finance Bank"),
    ("paytm payments", "Paytm Payments Bank"),
    ("airtel payments", "Airtel Payments Bank"),
    ("india post", "India Post Payments Bank"),
    ("ippb", "India Post Payments Bank"),
    ("citibank", "Citibank"),
    ("hsbc", "HSBC"),
    ("standard chartered", "Standard Chartered"),
    ("dbs", "DBS Bank"),
    ("karnataka bank", "Karnataka Bank"),
    ("karur vysya", "Karur Vysya Bank"),
    ("uco", "UCO Bank"),
];

/// Looks the text up in [`BANK_ALIASES`], case-insensitively.
///
/// A fragment only counts where a word starts, so `VM-HDFCBK` reads as HDFC. VPAs are
/// blanked first: the payer's handle (`ramesh@hdfcbank`) names their bank, not the
/// account that was credited. Unknown banks stay `None`.
pub fn normalize_bank(text: &str) -> Option<&'static str> {
    let lower = VPA.replace_all(text, " ").to_lowercase();

    BANK_ALIASES
        .iter()
        .find(|(alias, _)| {
            lower
                .match_indices(alias)
                .any(|(index, _)| starts_word(&lower, index))
        })
        .map(|(_, canonical)| *canonical)
}

fn starts_word(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        assert_eq!(
            normalize_bank("Received Rs. 10.37 in your Kotak Bank AC X2052"),
            Some("Kotak Mahindra Bank")
        );
        assert_eq!(normalize_bank("Dear SBI User, credited"), Some("State Bank of India"));
        assert_eq!(normalize_bank("HDFC Bank: Rs 500 credited"), Some("HDFC Bank"));
        assert_eq!(normalize_bank("Union Bank of India A/c"), Some("Union Bank of India"));
        assert_eq!(normalize_bank("Bank of India A/c"), Some("Bank of India"));
    }

    #[test]
    fn test_first_entry_wins() {
        assert_eq!(
            normalize_bank("Kotak Bank AC X2052 from bharath.0515-3@waaxis"),
            Some("Kotak Mahindra Bank")
        );
    }

    #[test]
    fn test_fragment_must_start_a_word() {
        assert_eq!(normalize_bank("from bharath.0515-3@waaxis"), None);
        assert_eq!(normalize_bank("possibility of rain"), None);
    }

    #[test]
    fn test_canonical_names_map_to_themselves() {
        for (alias, canonical) in BANK_ALIASES {
            assert_eq!(
                normalize_bank(canonical),
                Some(*canonical),
                "an earlier entry shadows {alias:?}"
            );
        }
    }

    #[test]
    fn test_south_indian_bank() {
        assert_eq!(
            normalize_bank("Rs 500 credited to your South Indian Bank A/c XX12"),
            Some("South Indian Bank")
        );
        assert_eq!(normalize_bank("Indian Bank: Rs 500 credited"), Some("Indian Bank"));
    }

    #[test]
    fn test_vpa_handle_is_not_the_bank() {
        assert_eq!(
            normalize_bank("Rs 500 credited to your SBI A/c XX1234 from ramesh@hdfcbank"),
            Some("State Bank of India")
        );
        assert_eq!(normalize_bank("Rs 500 received from ramesh@axisbank"), None);
        assert_eq!(normalize_bank("paid via 98765@sbi"), None);
    }

    #[test]
    fn test_sender_addresses() {
        assert_eq!(normalize_bank("VM-HDFCBK"), Some("HDFC Bank"));
        assert_eq!(normalize_bank("AD-SBIUPI"), Some("State Bank of India"));
        assert_eq!(normalize_bank("JK-KOTAKB"), Some("Kotak Mahindra Bank"));
    }

    #[test]
    fn test_unknown_bank_is_absent() {
        assert_eq!(normalize_bank("Credited to your wallet"), None);
        assert_eq!(normalize_bank(""), None);
    }
}

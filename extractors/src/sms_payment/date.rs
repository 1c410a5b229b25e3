use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static TEXTUAL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})[-/ ]([a-z]{3})[a-z]*\.?[-/ ,]+(\d{4}|\d{2})\b").unwrap()
});

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,4})[-/](\d{1,2})[-/](\d{1,4})\b").unwrap());

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Finds the earliest valid date and renders it as `YYYY-MM-DD`.
///
/// `D-Mon-YYYY`, `D-M-YY(YY)` and `YYYY-M-D` are recognised. A four digit first
/// group is the year, otherwise the order is day-month-year.
pub fn extract_date(text: &str) -> Option<String> {
    let textual = TEXTUAL_DATE.captures_iter(text).filter_map(|caps| {
        let start = caps.get(0)?.start();
        let month = month_number(&caps[2])?;
        let date = build_date(&caps[3], month, &caps[1])?;
        Some((start, date))
    });

    let numeric = NUMERIC_DATE.captures_iter(text).filter_map(|caps| {
        let start = caps.get(0)?.start();
        let (first, second, third) = (&caps[1], &caps[2], &caps[3]);
        let date = if first.len() == 4 {
            if third.len() > 2 {
                return None;
            }
            build_date(first, second.parse().ok()?, third)?
        } else {
            if first.len() > 2 {
                return None;
            }
            build_date(third, second.parse().ok()?, first)?
        };
        Some((start, date))
    });

    textual
        .chain(numeric)
        .min_by_key(|(start, _)| *start)
        .map(|(_, date)| date.format("%Y-%m-%d").to_string())
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|index| index as u32 + 1)
}

fn build_date(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    let year: i32 = match year.len() {
        2 => format!("20{year}").parse().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

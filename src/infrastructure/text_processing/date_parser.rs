use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static YEAR_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})").unwrap());
static YEAR_LAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})").unwrap());
static MONTH_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\s+([A-Za-z]{3,})\s*,?\s*(\d{4})").unwrap());

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Find the first recognizable date in `input`.
///
/// Accepts `YYYY-M-D` / `YYYY/M/D`, `D-M-YYYY` / `M-D-YYYY` (a part
/// greater than 12 is taken as the day), and `D MonthName YYYY` with a
/// three-letter or full month name. Impossible calendar dates are skipped
/// silently and the next pattern is tried; no match returns `None`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Some(caps) = YEAR_FIRST.captures(input) {
        let (year, month, day) = (num(&caps, 1), num(&caps, 2), num(&caps, 3));
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = YEAR_LAST.captures(input) {
        let (first, second, year) = (num(&caps, 1), num(&caps, 2), num(&caps, 3));
        let (day, month) = if first > 12 { (first, second) } else { (second, first) };
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = MONTH_NAME.captures(input) {
        let day = num(&caps, 1);
        let year = num(&caps, 3);
        if let Some(month) = month_from_name(caps.get(2).map_or("", |m| m.as_str())) {
            if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, day) {
                return Some(date);
            }
        }
    }

    None
}

/// Find the first recognizable date and normalize it to `YYYY-MM-DD`.
pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).map(format_date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn num(caps: &regex::Captures<'_>, index: usize) -> u32 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn month_from_name(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == lowered || (lowered.len() == 3 && month.starts_with(&lowered)))
        .map(|index| index as u32 + 1)
}

//! Localized display of `YYYY-MM-DD` dates.

use chrono::{Datelike, NaiveDate};
use qalam_config::Lang;

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const AR_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];

/// Format a manifest date for display.
///
/// English uses `Jan 5, 2024`; Arabic uses `٥ يناير ٢٠٢٤`. Input that is not
/// a valid `YYYY-MM-DD` date is returned unchanged.
#[must_use]
pub fn format_date(date: &str, lang: Lang) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
        return date.to_owned();
    };
    let month = parsed.month0() as usize;

    match lang {
        Lang::En => format!("{} {}, {}", EN_MONTHS[month], parsed.day(), parsed.year()),
        Lang::Ar => format!(
            "{} {} {}",
            arabic_digits(&parsed.day().to_string()),
            AR_MONTHS[month],
            arabic_digits(&parsed.year().to_string())
        ),
    }
}

/// Replace ASCII digits with Arabic-Indic digits.
fn arabic_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_english() {
        assert_eq!(format_date("2024-01-05", Lang::En), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-31", Lang::En), "Dec 31, 2023");
    }

    #[test]
    fn test_format_arabic() {
        assert_eq!(format_date("2024-01-05", Lang::Ar), "٥ يناير ٢٠٢٤");
        assert_eq!(format_date("2023-10-17", Lang::Ar), "١٧ أكتوبر ٢٠٢٣");
    }

    #[test]
    fn test_invalid_date_is_verbatim() {
        assert_eq!(format_date("soon", Lang::En), "soon");
        assert_eq!(format_date("2024-02-30", Lang::Ar), "2024-02-30");
        assert_eq!(format_date("", Lang::En), "");
    }
}

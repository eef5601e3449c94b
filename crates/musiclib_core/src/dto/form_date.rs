//! Serde adapter for optional form dates written as `dd-MM-yyyy`.
//!
//! Blank input binds to `None`. Anything else must be exactly ten characters
//! in that layout and name a real calendar day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serializer};

/// chrono layout for `dd-MM-yyyy`.
pub const FORM_DATE_FORMAT: &str = "%d-%m-%Y";

static FORM_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("valid form date regex"));

/// Parses one form date value.
pub fn parse(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !FORM_DATE_RE.is_match(trimmed) {
        return Err(format!("date `{trimmed}` is not in dd-MM-yyyy form"));
    }
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT)
        .map(Some)
        .map_err(|err| format!("date `{trimmed}` is not a valid day: {err}"))
}

/// Formats a date the way forms display it.
pub fn format(date: &NaiveDate) -> String {
    date.format(FORM_DATE_FORMAT).to_string()
}

pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&format(date)),
        None => serializer.serialize_str(""),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(value) => parse(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{format, parse};
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_day_month_year() {
        let parsed = parse("07-03-1999").expect("valid date should parse");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1999, 3, 7));
    }

    #[test]
    fn parse_treats_blank_as_absent() {
        assert_eq!(parse("  ").expect("blank should bind"), None);
    }

    #[test]
    fn parse_rejects_wrong_layout_and_impossible_days() {
        assert!(parse("1999-03-07").is_err());
        assert!(parse("7-3-1999").is_err());
        assert!(parse("31-02-2001").is_err());
    }

    #[test]
    fn format_matches_parse_layout() {
        let date = NaiveDate::from_ymd_opt(2004, 11, 2).expect("valid date");
        assert_eq!(format(&date), "02-11-2004");
    }
}

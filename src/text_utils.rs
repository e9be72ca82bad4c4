use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Parses the frontmatter date. Accepts a plain `YYYY-MM-DD`, a naive
/// date-time with `T` or space separator, and RFC 3339 (converted to UTC).
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    let buf = buf.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(dt);
        }
    }

    match NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("Unable to parse date time {}", buf)),
        Err(_) => Err(format!("Unable to parse date time {}", buf)),
    }
}

pub fn format_date_time(date_time: &NaiveDateTime) -> (String, String) {
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    (date, time)
}

/// Formats a raw frontmatter date for display, falling back to the raw text.
pub fn display_date(raw: &str, fmt: &str) -> String {
    match parse_date_time(raw) {
        Ok(dt) => dt.format(fmt).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// URL form of a category or tag, usable as a single path segment:
/// lowercase, runs of whitespace and slashes become `-`, dot runs shrink to
/// one dot and no `-` or `.` is left at either end.
pub fn normalize_label(label: &str) -> String {
    lazy_static! {
        static ref SEPARATORS: Regex = Regex::new(r"[\s/\\]+").unwrap();
        static ref DOTS: Regex = Regex::new(r"\.{2,}").unwrap();
    }
    let lower = label.to_lowercase();
    let dashed = SEPARATORS.replace_all(&lower, "-");
    let dotted = DOTS.replace_all(&dashed, ".");
    dotted.trim_matches(|c| c == '-' || c == '.').to_string()
}

/// Readable form of a normalized label, `static-sites` -> `static sites`.
pub fn label_name(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10T10:42:32.123").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");

        let date_time = parse_date_time("2017-09-10 10:42:32").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "10:42:32");

        let date_time = parse_date_time("2017-09-10").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "00:00:00");

        let date_time = parse_date_time("2017-09-10T10:42:32+02:00").unwrap();
        let (date, time) = format_date_time(&date_time);
        assert_eq!(date, "2017-09-10");
        assert_eq!(time, "08:42:32");

        assert!(parse_date_time("").is_err());
        assert!(parse_date_time("10/09/2017").is_err());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-09-01", "%d.%m.%Y"), "01.09.2025");
        assert_eq!(display_date("soon", "%d.%m.%Y"), "soon");
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Web Development"), "web-development");
        assert_eq!(normalize_label("UX  /\tUI"), "ux-ui");
        assert_eq!(normalize_label("CI/CD"), "ci-cd");
        assert_eq!(normalize_label("a\\b"), "a-b");
        assert_eq!(normalize_label("../../../escaped"), "escaped");
        assert_eq!(normalize_label("node.js"), "node.js");
        assert_eq!(normalize_label(".."), "");
        assert_eq!(normalize_label("web-development"), "web-development");
        assert_eq!(normalize_label(&normalize_label("Static Sites")), "static-sites");
        assert_eq!(normalize_label(&normalize_label(" ../A..B/ ")), "a.b");
    }

    #[test]
    fn test_label_name() {
        assert_eq!(label_name("static-sites"), "static sites");
    }
}

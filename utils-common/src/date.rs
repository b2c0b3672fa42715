use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// 支持的无时区日期时间格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 支持的纯日期格式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 解析文章日期
///
/// 带时区的 RFC 3339 时间换算为 UTC，其余格式按 UTC 处理。
/// 无法识别的日期返回 `None`。
pub fn parse_post_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .or_else(|| parse_partial_date(date))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 只有年份（`2024`）或年月（`2024-06`）的日期，取该段的第一天
fn parse_partial_date(date: &str) -> Option<NaiveDate> {
    let (year, month) = match date.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (date, None),
    };

    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(year, 4) {
        return None;
    }
    let month = match month {
        Some(m) if is_digits(m, 2) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// 文章发布年份，日期无效时为 `None`
pub fn post_year(date: &str) -> Option<i32> {
    parse_post_date(date).map(|dt| dt.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dates_parse() {
        assert_eq!(post_year("2024-06-01"), Some(2024));
        assert_eq!(post_year("2023/12/31"), Some(2023));
        assert_eq!(post_year(" 2022-02-02 "), Some(2022));
    }

    #[test]
    fn datetimes_parse() {
        assert_eq!(post_year("2024-06-01T10:00:00"), Some(2024));
        assert_eq!(post_year("2024-06-01 10:00:00"), Some(2024));
        assert_eq!(post_year("2024-06-01T10:00"), Some(2024));
        assert_eq!(post_year("2024-06-01 10:00"), Some(2024));
    }

    #[test]
    fn fractional_seconds_parse() {
        assert_eq!(post_year("2024-06-01T10:00:00.000"), Some(2024));
        assert_eq!(post_year("2024-06-01 10:00:00.5"), Some(2024));
        assert_eq!(post_year("2024-06-01T10:00:00.123Z"), Some(2024));
    }

    #[test]
    fn year_and_year_month_parse() {
        assert_eq!(post_year("2024"), Some(2024));
        assert_eq!(post_year("2024-06"), Some(2024));
        assert_eq!(
            parse_post_date("2024-06"),
            NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(post_year("2024-13"), None);
        assert_eq!(post_year("2024-6"), None);
        assert_eq!(post_year("24"), None);
        assert_eq!(post_year("20245"), None);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        // 2025-01-01T01:00+02:00 在 UTC 中仍是 2024 年
        assert_eq!(post_year("2025-01-01T01:00:00+02:00"), Some(2024));
        assert_eq!(post_year("2024-12-31T23:00:00Z"), Some(2024));
    }

    #[test]
    fn garbage_has_no_year() {
        assert_eq!(post_year(""), None);
        assert_eq!(post_year("yesterday"), None);
        assert_eq!(post_year("2024-13-45"), None);
    }

    #[test]
    fn dates_order_chronologically() {
        assert!(parse_post_date("2024-06-01") > parse_post_date("2023-01-01T23:59:59"));
    }
}

use chrono::{Duration, NaiveDate};
use std::fmt;
use url::Url;

pub const DEFAULT_DAYS: u32 = 30;
pub const RANGE_PARAM: &str = "range";

/// Reporting window selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    Days(u32),
    All,
}

impl Default for ReportRange {
    fn default() -> Self {
        Self::Days(DEFAULT_DAYS)
    }
}

impl ReportRange {
    /// Options offered by the range selector, in display order.
    pub const OPTIONS: [ReportRange; 5] = [
        ReportRange::Days(7),
        ReportRange::Days(30),
        ReportRange::Days(90),
        ReportRange::Days(365),
        ReportRange::All,
    ];

    /// Lenient parse of the `range` query value; anything unusable is the default window.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::default();
        };
        if value.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        match value.parse::<u32>() {
            Ok(days) if days > 0 => Self::Days(days),
            _ => Self::default(),
        }
    }

    pub fn query_value(self) -> String {
        match self {
            Self::Days(days) => days.to_string(),
            Self::All => "all".to_string(),
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Days(days) => format!("Last {days} days"),
            Self::All => "All time".to_string(),
        }
    }

    /// First day counted by the window ending `today`.
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Days(days) => today
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            Self::All => NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_value())
    }
}

/// Path and query to navigate to when the selector changes to `value`.
///
/// `current` is the page's path and query; other query parameters are kept.
pub fn navigation_href(current: &str, value: &str) -> Result<String, url::ParseError> {
    let base = Url::parse("http://dashboard.local/")?;
    let mut url = base.join(current)?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != RANGE_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(RANGE_PARAM, value);

    let mut href = url.path().to_string();
    if let Some(query) = url.query() {
        href.push('?');
        href.push_str(query);
    }
    Ok(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_days_and_all() {
        assert_eq!(ReportRange::parse(Some("7")), ReportRange::Days(7));
        assert_eq!(ReportRange::parse(Some("ALL")), ReportRange::All);
    }

    #[test]
    fn parse_falls_back_to_thirty_days() {
        for value in [None, Some(""), Some("abc"), Some("0"), Some("-5")] {
            assert_eq!(ReportRange::parse(value), ReportRange::Days(30));
        }
    }

    #[test]
    fn start_date_counts_back_from_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(
            ReportRange::Days(30).start_date(today),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert_eq!(
            ReportRange::All.start_date(today),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
    }

    #[test]
    fn start_date_saturates_for_huge_windows() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let range = ReportRange::parse(Some("1000000000"));
        assert_eq!(range, ReportRange::Days(1_000_000_000));
        assert_eq!(range.start_date(today), NaiveDate::MIN);
        assert_eq!(ReportRange::Days(u32::MAX).start_date(today), NaiveDate::MIN);
    }

    #[test]
    fn href_sets_range_and_keeps_other_params() {
        assert_eq!(navigation_href("/", "90").unwrap(), "/?range=90");
        assert_eq!(
            navigation_href("/?range=30&dpr=2", "all").unwrap(),
            "/?dpr=2&range=all"
        );
        assert_eq!(
            navigation_href("/dashboard?range=7&range=30", "365").unwrap(),
            "/dashboard?range=365"
        );
    }
}

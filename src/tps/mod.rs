//! Temporal parser (TPS) — natural-language time expressions to date
//! ranges with three-factor confidence (spec §4.4).
//!
//! No `regex` dependency: the teacher crate has none in its corpus either
//! (string/word matching is done by hand throughout `search/` and
//! `neuroscience/`), so this parser is hand-rolled word matching over a
//! lowercased, whitespace-split query. The whole Phase 1 pipeline this
//! feeds into has a 55ms budget; this parser alone is a small fraction of
//! that and never backtracks more than a few words of lookahead.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// Why a date is attached to a piece of content, independent of how
/// precisely it's known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceSource {
    UserExplicit,
    CalendarSync,
    FileTimestamp,
    ContentExtraction,
    ContextInference,
    Unknown,
}

impl ConfidenceSource {
    fn factor(self) -> f64 {
        match self {
            Self::UserExplicit => 1.0,
            Self::CalendarSync => 0.95,
            Self::FileTimestamp => 0.85,
            Self::ContentExtraction => 0.7,
            Self::ContextInference => 0.5,
            Self::Unknown => 0.3,
        }
    }
}

/// How precise the resolved range is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    fn factor(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 0.95,
            Self::Hour => 0.9,
            Self::Day => 0.85,
            Self::Week => 0.7,
            Self::Month => 0.5,
            Self::Year => 0.3,
        }
    }
}

/// The kind of expression recognized in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionType {
    ExplicitAbsolute,
    ExplicitRelative,
    FuzzyPeriod,
    Duration,
    None,
}

impl ExpressionType {
    fn factor(self) -> f64 {
        match self {
            Self::ExplicitAbsolute => 1.0,
            Self::ExplicitRelative => 0.9,
            Self::FuzzyPeriod => 0.5,
            Self::Duration => 0.8,
            Self::None => 0.0,
        }
    }
}

/// A resolved natural-language time expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalExpression {
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    pub range_confidence: f64,
    pub expression_type: ExpressionType,
    pub original_expression: String,
}

/// Combined confidence: `source * granularity * interpretation`.
pub fn confidence(source: ConfidenceSource, granularity: Granularity, interpretation: ExpressionType) -> f64 {
    source.factor() * granularity.factor() * interpretation.factor()
}

fn start_of_day(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).expect("valid time"))
}

fn end_of_day(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(23, 59, 59).expect("valid time"))
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    first_of_month(next_year, next_month) - Duration::days(1)
}

fn month_range(year: i32, month: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(first_of_month(year, month)), end_of_day(last_of_month(year, month)))
}

const MONTH_NAMES: [(&str, u32); 12] = [
    ("january", 1), ("february", 2), ("march", 3), ("april", 4),
    ("may", 5), ("june", 6), ("july", 7), ("august", 8),
    ("september", 9), ("october", 10), ("november", 11), ("december", 12),
];

/// Northern-hemisphere season months, each spanning 3 calendar months.
/// Winter wraps the year boundary (Dec, Jan, Feb).
const SEASONS: [(&str, [u32; 3]); 4] = [
    ("winter", [12, 1, 2]),
    ("spring", [3, 4, 5]),
    ("summer", [6, 7, 8]),
    ("fall", [9, 10, 11]),
];

fn find_month_token(words: &[&str]) -> Option<(usize, u32)> {
    words.iter().enumerate().find_map(|(i, w)| {
        MONTH_NAMES.iter().find(|(name, _)| *name == *w).map(|(_, m)| (i, *m))
    })
}

fn find_year_token(words: &[&str]) -> Option<i32> {
    words.iter().find_map(|w| {
        if w.len() == 4 && w.chars().all(|c| c.is_ascii_digit()) {
            w.parse::<i32>().ok()
        } else {
            None
        }
    })
}

fn find_number_before(words: &[&str], index: usize) -> Option<i64> {
    if index == 0 {
        return None;
    }
    words[index - 1].parse::<i64>().ok()
}

fn parse_absolute(words: &[&str], now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>, Granularity)> {
    let (_, month) = find_month_token(words)?;
    let year = find_year_token(words).unwrap_or_else(|| {
        // No explicit year: prefer the most recent occurrence not in the future.
        if month <= now.month() {
            now.year()
        } else {
            now.year() - 1
        }
    });
    let (start, end) = month_range(year, month);
    Some((start, end, Granularity::Month))
}

fn parse_relative(words: &[&str], now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>, Granularity)> {
    let today = now.date_naive();

    if words.contains(&"today") {
        return Some((start_of_day(today), end_of_day(today), Granularity::Day));
    }
    if words.contains(&"yesterday") {
        let d = today - Duration::days(1);
        return Some((start_of_day(d), end_of_day(d), Granularity::Day));
    }
    if words.windows(2).any(|w| w == ["last", "week"]) {
        return Some((now - Duration::days(14), now - Duration::days(7), Granularity::Week));
    }
    if words.windows(2).any(|w| w == ["last", "month"]) {
        let (y, m) = if now.month() == 1 { (now.year() - 1, 12) } else { (now.year(), now.month() - 1) };
        let (start, end) = month_range(y, m);
        return Some((start, end, Granularity::Month));
    }
    if words.windows(2).any(|w| w == ["last", "year"]) {
        let y = now.year() - 1;
        return Some((
            start_of_day(first_of_month(y, 1)),
            end_of_day(last_of_month(y, 12)),
            Granularity::Year,
        ));
    }

    // "<N> day(s)/week(s)/month(s)/year(s) ago"
    if let Some(ago_idx) = words.iter().position(|w| *w == "ago") {
        if ago_idx >= 2 {
            let unit = words[ago_idx - 1];
            if let Some(n) = find_number_before(words, ago_idx - 1) {
                let n = n.max(0);
                return match unit {
                    "day" | "days" => {
                        let d = today - Duration::days(n);
                        Some((start_of_day(d), end_of_day(d), Granularity::Day))
                    }
                    "week" | "weeks" => Some((
                        now - Duration::days((n + 1) * 7),
                        now - Duration::days(n * 7),
                        Granularity::Week,
                    )),
                    "month" | "months" => {
                        let total = now.year() * 12 + now.month() as i32 - 1 - n as i32;
                        let y = total.div_euclid(12);
                        let m = (total.rem_euclid(12) + 1) as u32;
                        let (start, end) = month_range(y, m);
                        Some((start, end, Granularity::Month))
                    }
                    "year" | "years" => {
                        let y = now.year() - n as i32;
                        Some((
                            start_of_day(first_of_month(y, 1)),
                            end_of_day(last_of_month(y, 12)),
                            Granularity::Year,
                        ))
                    }
                    _ => None,
                };
            }
        }
    }

    None
}

fn nearest_season_range(season_months: [u32; 3], now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let candidates = [now.year() - 1, now.year(), now.year() + 1];
    let mut best: Option<(i64, DateTime<Utc>, DateTime<Utc>)> = None;

    for &year in &candidates {
        let (start, _) = month_range(year, season_months[0]);
        let end_year = if season_months[0] == 12 { year + 1 } else { year };
        let (_, end) = month_range(end_year, *season_months.last().unwrap());

        let mid = start + (end - start) / 2;
        let distance = (mid - now).num_seconds().abs();
        if best.as_ref().map(|(d, _, _)| distance < *d).unwrap_or(true) {
            best = Some((distance, start, end));
        }
    }

    let (_, start, end) = best.expect("at least one candidate year");
    (start, end)
}

fn parse_fuzzy(words: &[&str], now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>, Granularity)> {
    for (name, months) in SEASONS {
        if words.contains(&name) || (name == "fall" && words.contains(&"autumn")) {
            let (start, end) = nearest_season_range(months, now);
            return Some((start, end, Granularity::Month));
        }
    }
    if words.windows(3).any(|w| w == ["a", "while", "back"]) {
        return Some((now - Duration::days(180), now - Duration::days(30), Granularity::Month));
    }
    None
}

/// Parse a natural-language query for a time expression.
///
/// Returns `None` when no recognizable time expression is present (spec:
/// this is the `none` case, not an error). `source` is supplied by the
/// caller since it reflects *how* the time is known, not something the
/// text alone determines.
pub fn parse(query: &str, now: DateTime<Utc>, source: ConfidenceSource) -> Option<TemporalExpression> {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    if let Some((start, end, granularity)) = parse_relative(&words, now) {
        let expression_type = ExpressionType::ExplicitRelative;
        return Some(TemporalExpression {
            range_start: start,
            range_end: end,
            range_confidence: confidence(source, granularity, expression_type),
            expression_type,
            original_expression: query.to_string(),
        });
    }

    if let Some((start, end, granularity)) = parse_absolute(&words, now) {
        let expression_type = ExpressionType::ExplicitAbsolute;
        return Some(TemporalExpression {
            range_start: start,
            range_end: end,
            range_confidence: confidence(source, granularity, expression_type),
            expression_type,
            original_expression: query.to_string(),
        });
    }

    if let Some((start, end, granularity)) = parse_fuzzy(&words, now) {
        let expression_type = ExpressionType::FuzzyPeriod;
        return Some(TemporalExpression {
            range_start: start,
            range_end: end,
            range_confidence: confidence(source, granularity, expression_type),
            expression_type,
            original_expression: query.to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_time_expression_is_none() {
        assert!(parse("what is spreading activation", now(), ConfidenceSource::Unknown).is_none());
    }

    #[test]
    fn today_resolves_to_current_day() {
        let e = parse("what did I write today", now(), ConfidenceSource::UserExplicit).unwrap();
        assert_eq!(e.expression_type, ExpressionType::ExplicitRelative);
        assert_eq!(e.range_start.date_naive(), now().date_naive());
        assert_eq!(e.range_end.date_naive(), now().date_naive());
    }

    #[test]
    fn three_days_ago_is_a_single_day_window() {
        let e = parse("notes from 3 days ago", now(), ConfidenceSource::UserExplicit).unwrap();
        let expected_day = (now() - Duration::days(3)).date_naive();
        assert_eq!(e.range_start.date_naive(), expected_day);
        assert_eq!(e.range_end.date_naive(), expected_day);
    }

    #[test]
    fn last_week_spans_seven_days_ending_a_week_ago() {
        let e = parse("what happened last week", now(), ConfidenceSource::ContextInference).unwrap();
        assert!(e.range_end <= now() - Duration::days(6));
        assert!(e.range_start < e.range_end);
    }

    #[test]
    fn absolute_month_with_year() {
        let e = parse("notes from September 2024", now(), ConfidenceSource::UserExplicit).unwrap();
        assert_eq!(e.expression_type, ExpressionType::ExplicitAbsolute);
        assert_eq!(e.range_start.year(), 2024);
        assert_eq!(e.range_start.month(), 9);
        assert_eq!(e.range_end.month(), 9);
    }

    #[test]
    fn absolute_month_without_year_assumes_most_recent() {
        // "now" is July 2026; September hasn't happened yet this year.
        let e = parse("back in September", now(), ConfidenceSource::ContentExtraction).unwrap();
        assert_eq!(e.range_start.year(), 2025);
    }

    #[test]
    fn season_resolves_to_nearest_occurrence() {
        let e = parse("around summer", now(), ConfidenceSource::ContextInference).unwrap();
        assert_eq!(e.expression_type, ExpressionType::FuzzyPeriod);
        assert!((6..=8).contains(&e.range_start.month()) || e.range_start.month() == 6);
    }

    #[test]
    fn a_while_back_is_low_confidence_fuzzy() {
        let e = parse("I saw this a while back", now(), ConfidenceSource::ContextInference).unwrap();
        assert_eq!(e.expression_type, ExpressionType::FuzzyPeriod);
        assert!(e.range_confidence < 0.5);
    }

    #[test]
    fn confidence_is_product_of_three_factors() {
        let c = confidence(ConfidenceSource::UserExplicit, Granularity::Day, ExpressionType::ExplicitRelative);
        assert!((c - 1.0 * 0.85 * 0.9).abs() < 1e-9);
    }
}

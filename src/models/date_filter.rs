use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::expense::Expense;
use crate::validate;

/// Raw `?start=&end=` query of the expense page. Decoded from the raw pairs
/// so a repeated parameter keeps its first value instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct DateFilterQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<Vec<(String, String)>> for DateFilterQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self { start: first("start"), end: first("end") }
    }
}

impl DateFilterQuery {
    pub fn new(start: &str, end: &str) -> Self {
        let keep = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self { start: keep(start), end: keep(end) }
    }

    pub fn start_str(&self) -> &str {
        self.start.as_deref().unwrap_or("").trim()
    }

    pub fn end_str(&self) -> &str {
        self.end.as_deref().unwrap_or("").trim()
    }
}

/// Inclusive date range. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse the query; blank values are treated as absent.
    pub fn parse(query: &DateFilterQuery) -> Result<Self, Vec<String>> {
        let mut errors = vec![];
        let mut bound = |raw: &str, label: &str| {
            if raw.is_empty() {
                return None;
            }
            validate::parse_date(raw, label)
                .map_err(|e| errors.push(e))
                .ok()
        };
        let start = bound(query.start_str(), "Start Date");
        let end = bound(query.end_str(), "End Date");

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                errors.push("Start Date must be on or before End Date".to_string());
            }
        }
        if errors.is_empty() {
            Ok(Self { start, end })
        } else {
            Err(errors)
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| s <= date) && self.end.is_none_or(|e| date <= e)
    }

    /// The visible subset of `expenses`, in their original order.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.contains(e.date))
            .cloned()
            .collect()
    }

    /// Query string (with leading `?`) that reproduces this range, or "" when unbounded.
    pub fn to_query(&self) -> String {
        let mut parts = vec![];
        if let Some(s) = self.start {
            parts.push(format!("start={s}"));
        }
        if let Some(e) = self.end {
            parts.push(format!("end={e}"));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::ExpenseStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn expense(id: &str, date: NaiveDate) -> Expense {
        Expense {
            id: id.into(),
            description: format!("Expense {id}"),
            amount: 10.0,
            date,
            status: ExpenseStatus::Pending,
            category: None,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("a", d(2024, 1, 1)),
            expense("b", d(2024, 6, 15)),
            expense("c", d(2024, 12, 31)),
        ]
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)));
        let ids: Vec<_> = range.apply(&sample()).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn disjoint_range_is_empty() {
        let range = DateRange::new(Some(d(2025, 1, 1)), Some(d(2025, 12, 31)));
        assert!(range.apply(&sample()).is_empty());
        assert!(range.apply(&[]).is_empty());
    }

    #[test]
    fn open_ended_ranges() {
        let from_june = DateRange::new(Some(d(2024, 6, 15)), None);
        assert_eq!(from_june.apply(&sample()).len(), 2);
        let until_june = DateRange::new(None, Some(d(2024, 6, 14)));
        assert_eq!(until_june.apply(&sample()).len(), 1);
        assert_eq!(DateRange::default().apply(&sample()).len(), 3);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let range = DateRange::new(Some(d(2024, 2, 1)), Some(d(2024, 12, 31)));
        let once = range.apply(&sample());
        let twice = range.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_blank_query_is_unbounded() {
        let range = DateRange::parse(&DateFilterQuery::new("", "  ")).unwrap();
        assert!(range.is_unbounded());
        assert_eq!(range.to_query(), "");
    }

    #[test]
    fn parse_rejects_bad_input() {
        let errors = DateRange::parse(&DateFilterQuery::new("2024-13-01", "soon")).unwrap_err();
        assert_eq!(errors.len(), 2);

        let errors = DateRange::parse(&DateFilterQuery::new("2024-12-31", "2024-01-01")).unwrap_err();
        assert_eq!(errors, vec!["Start Date must be on or before End Date".to_string()]);
    }

    #[test]
    fn repeated_parameters_keep_the_first_value() {
        let query: DateFilterQuery =
            serde_urlencoded::from_str("start=2024-01-01&start=2030-01-01&end=2024-06-30&page=2").unwrap();
        assert_eq!(query.start_str(), "2024-01-01");
        assert_eq!(query.end_str(), "2024-06-30");

        let empty: DateFilterQuery = serde_urlencoded::from_str("").unwrap();
        assert!(DateRange::parse(&empty).unwrap().is_unbounded());
    }

    #[test]
    fn query_round_trip() {
        let range = DateRange::parse(&DateFilterQuery::new("2024-01-01", "2024-12-31")).unwrap();
        assert_eq!(range.to_query(), "?start=2024-01-01&end=2024-12-31");
        let end_only = DateRange::new(None, Some(d(2024, 3, 1)));
        assert_eq!(end_only.to_query(), "?end=2024-03-01");
    }
}

//! Category and publish-date filtering over the catalog.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{ArticleRecord, Catalog};
use crate::error::UnknownDateWindow;

/// A publish-date window, matching the date dropdown checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateWindow {
    LastWeek,
    LastMonth,
    LastYear,
}

impl DateWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            DateWindow::LastWeek => "last-week",
            DateWindow::LastMonth => "last-month",
            DateWindow::LastYear => "last-year",
        }
    }

    /// Earliest publish date admitted by this window, inclusive.
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        let cutoff = match self {
            DateWindow::LastWeek => today.checked_sub_days(Days::new(7)),
            DateWindow::LastMonth => today.checked_sub_months(Months::new(1)),
            DateWindow::LastYear => today.checked_sub_months(Months::new(12)),
        };
        cutoff.unwrap_or(NaiveDate::MIN)
    }

    pub fn admits(self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.cutoff(today)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateWindow {
    type Err = UnknownDateWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-week" => Ok(DateWindow::LastWeek),
            "last-month" => Ok(DateWindow::LastMonth),
            "last-year" => Ok(DateWindow::LastYear),
            other => Err(UnknownDateWindow(other.to_string())),
        }
    }
}

/// Checked filter options. Empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub date_windows: BTreeSet<DateWindow>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.date_windows.is_empty()
    }

    /// A record passes when it shares a category with the selection and falls
    /// inside at least one selected date window.
    pub fn matches(&self, record: &ArticleRecord, today: NaiveDate) -> bool {
        let category_match = self.categories.is_empty()
            || record
                .categories
                .iter()
                .any(|category| self.categories.contains(category));

        let date_match = self.date_windows.is_empty()
            || self
                .date_windows
                .iter()
                .any(|window| window.admits(record.date, today));

        category_match && date_match
    }
}

impl Catalog {
    /// Records passing `selection`, in catalog order.
    pub fn apply(&self, selection: &FilterSelection, today: NaiveDate) -> Vec<&ArticleRecord> {
        let matched: Vec<_> = self
            .iter()
            .filter(|record| selection.matches(record, today))
            .collect();
        log::info!(
            "filter {:?} matched {} of {} articles",
            selection,
            matched.len(),
            self.len()
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(records: &[&ArticleRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn categories(values: &[&str]) -> FilterSelection {
        FilterSelection {
            categories: values.iter().map(|v| v.to_string()).collect(),
            date_windows: BTreeSet::new(),
        }
    }

    #[test]
    fn empty_selection_returns_every_record() {
        let catalog = Catalog::sample();
        let all = catalog.apply(&FilterSelection::default(), date(2025, 3, 20));
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn category_filter_keeps_intersecting_records() {
        let catalog = Catalog::sample();
        let matched = catalog.apply(&categories(&["mlops"]), date(2025, 3, 20));
        assert_eq!(ids(&matched), vec!["2", "6"]);
    }

    #[test]
    fn multiple_categories_are_ored() {
        let catalog = Catalog::sample();
        let matched = catalog.apply(&categories(&["ai", "databricks"]), date(2025, 3, 20));
        assert_eq!(ids(&matched), vec!["3", "4"]);
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let catalog = Catalog::sample();
        assert!(catalog.apply(&categories(&["rust"]), date(2025, 3, 20)).is_empty());
    }

    #[test]
    fn last_week_window_is_inclusive() {
        let catalog = Catalog::sample();
        let selection = FilterSelection {
            date_windows: [DateWindow::LastWeek].into(),
            ..FilterSelection::default()
        };

        // 2025-03-22 minus seven days is 2025-03-15, the date of record 1.
        let matched = catalog.apply(&selection, date(2025, 3, 22));
        assert_eq!(ids(&matched), vec!["1"]);
    }

    #[test]
    fn any_selected_window_admits_a_record() {
        let catalog = Catalog::sample();
        let selection = FilterSelection {
            date_windows: [DateWindow::LastWeek, DateWindow::LastMonth].into(),
            ..FilterSelection::default()
        };

        let matched = catalog.apply(&selection, date(2025, 3, 16));
        assert_eq!(ids(&matched), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn categories_and_dates_are_anded() {
        let catalog = Catalog::sample();
        let selection = FilterSelection {
            categories: ["data-engineering".to_string()].into(),
            date_windows: [DateWindow::LastMonth].into(),
        };

        let matched = catalog.apply(&selection, date(2025, 3, 25));
        assert_eq!(ids(&matched), vec!["1", "4"]);
    }

    #[test]
    fn last_year_excludes_old_articles() {
        let catalog = Catalog::sample();
        let selection = FilterSelection {
            date_windows: [DateWindow::LastYear].into(),
            ..FilterSelection::default()
        };
        assert!(catalog.apply(&selection, date(2026, 10, 18)).is_empty());
        assert_eq!(catalog.apply(&selection, date(2026, 2, 10)).len(), 7);
    }

    #[test]
    fn month_window_clamps_to_shorter_months() {
        assert_eq!(DateWindow::LastMonth.cutoff(date(2025, 3, 31)), date(2025, 2, 28));
    }

    #[test]
    fn parses_checkbox_values() {
        assert_eq!("last-month".parse::<DateWindow>(), Ok(DateWindow::LastMonth));
        let err = "yesterday".parse::<DateWindow>().unwrap_err();
        assert_eq!(err, UnknownDateWindow("yesterday".to_string()));
        assert_eq!(err.to_string(), "unknown date window `yesterday`");
        assert_eq!(DateWindow::LastYear.to_string(), "last-year");
    }
}

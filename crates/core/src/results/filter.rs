use crate::domain::draw::DrawRecord;
use crate::error::ResultError;
use crate::time::dates::{weekday_abbrev, DateWindow, ALLOWED_DAYS};
use std::collections::BTreeSet;

/// Validated filter. Day names are checked on construction, so a `FilterCriteria` that
/// exists can always be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub window: DateWindow,
    days: Option<BTreeSet<&'static str>>,
    games: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new(
        window: DateWindow,
        days: Option<Vec<String>>,
        games: Option<Vec<String>>,
    ) -> Result<Self, ResultError> {
        let days = match days {
            Some(days) => {
                let mut set = BTreeSet::new();
                for day in days {
                    let allowed = ALLOWED_DAYS
                        .iter()
                        .find(|d| **d == day)
                        .ok_or(ResultError::InvalidDayName { day })?;
                    set.insert(*allowed);
                }
                Some(set)
            }
            None => None,
        };

        Ok(Self {
            window,
            days,
            games: games.map(|g| g.into_iter().collect()),
        })
    }

    pub fn window_only(window: DateWindow) -> Self {
        Self {
            window,
            days: None,
            games: None,
        }
    }

    pub fn matches(&self, record: &DrawRecord) -> bool {
        if !self.window.contains(record.date) {
            return false;
        }
        if let Some(days) = &self.days {
            if !days.contains(weekday_abbrev(record.date)) {
                return false;
            }
        }
        if let Some(games) = &self.games {
            if !games.contains(&record.game) {
                return false;
            }
        }
        true
    }
}

/// Keeps the records `criteria` matches, in input order.
pub fn filter_records(records: Vec<DrawRecord>, criteria: &FilterCriteria) -> Vec<DrawRecord> {
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::jackpot::Jackpot;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, m, day).unwrap()
    }

    fn rec(game: &str, date: NaiveDate) -> DrawRecord {
        DrawRecord {
            game: game.to_string(),
            date,
            numbers: vec!["1".into(), "2".into()],
            jackpot: Jackpot::from_centavos(400_000),
            winners: None,
        }
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn records() -> Vec<DrawRecord> {
        vec![
            rec("EZ2", d(7, 31)),
            rec("Lotto 6/42", d(8, 1)),
            rec("EZ2", d(8, 7)),
            rec("Superlotto 6/49", d(8, 9)),
            rec("Lotto 6/42", d(8, 12)),
            rec("EZ2", d(8, 13)),
        ]
    }

    #[test]
    fn keeps_inclusive_range_in_order() {
        let window = DateWindow::new(d(8, 1), d(8, 12)).unwrap();
        let out = filter_records(records(), &FilterCriteria::window_only(window));
        let dates: Vec<_> = out.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(8, 1), d(8, 7), d(8, 9), d(8, 12)]);
    }

    #[test]
    fn filters_by_weekday_and_game() {
        let window = DateWindow::new(d(7, 1), d(8, 31)).unwrap();
        // 2022-07-31 and 2022-08-07 are Sundays.
        let criteria =
            FilterCriteria::new(window, Some(strings(&["Sun"])), Some(strings(&["EZ2"]))).unwrap();
        let out = filter_records(records(), &criteria);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.game == "EZ2" && weekday_abbrev(r.date) == "Sun"));

        let criteria =
            FilterCriteria::new(window, None, Some(strings(&["Lotto 6/42", "Superlotto 6/49"])))
                .unwrap();
        assert_eq!(filter_records(records(), &criteria).len(), 3);
    }

    #[test]
    fn rejects_unknown_day_naming_it() {
        let window = DateWindow::single(d(8, 1));
        let err = FilterCriteria::new(window, Some(strings(&["Sun", "Xyz"])), None).unwrap_err();
        match err {
            ResultError::InvalidDayName { day } => assert_eq!(day, "Xyz"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn day_names_are_case_sensitive() {
        let window = DateWindow::single(d(8, 1));
        assert!(FilterCriteria::new(window, Some(strings(&["sun"])), None).is_err());
        assert!(FilterCriteria::new(window, Some(strings(&["Sunday"])), None).is_err());
    }

    #[test]
    fn empty_result_is_fine() {
        let window = DateWindow::single(d(9, 1));
        assert!(filter_records(records(), &FilterCriteria::window_only(window)).is_empty());
    }
}

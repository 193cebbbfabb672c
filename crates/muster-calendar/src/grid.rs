use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::CalendarError;
use crate::month::{days_in_month, first_weekday, prev_month};

/// One cell of the flattened month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub day: u32,
    pub in_month: bool,
}

/// Flattened Monday-first grid for a month: whole 7-day rows, with the
/// first row padded by the trailing days of the previous month and the
/// last row padded by the leading days of the next month.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<GridDay>, CalendarError> {
    let lead = first_weekday(year, month)?;
    let days = days_in_month(year, month)?;
    let (prev_year, prev) = prev_month(year, month);
    let prev_days = days_in_month(prev_year, prev)?;

    let mut grid = Vec::with_capacity(42);
    for day in prev_days - lead + 1..=prev_days {
        grid.push(GridDay {
            day,
            in_month: false,
        });
    }
    for day in 1..=days {
        grid.push(GridDay {
            day,
            in_month: true,
        });
    }
    let trailing = (7 - grid.len() % 7) % 7;
    for day in 1..=trailing as u32 {
        grid.push(GridDay {
            day,
            in_month: false,
        });
    }

    Ok(grid)
}

/// Bucket items under their day-of-month key. An item is included only
/// when its date's year and month equal the requested pair; per-day order
/// is input order, and days with no items are absent from the map.
pub fn bucket_by_day<T, F>(
    year: i32,
    month: u32,
    items: impl IntoIterator<Item = T>,
    date_of: F,
) -> BTreeMap<u32, Vec<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut by_day: BTreeMap<u32, Vec<T>> = BTreeMap::new();
    for item in items {
        let date = date_of(&item);
        if date.year() == year && date.month() == month {
            by_day.entry(date.day()).or_default().push(item);
        }
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn leap_february_grid() {
        // February 2024: leap year, starts on a Thursday.
        let grid = month_grid(2024, 2).unwrap();
        assert_eq!(grid.len(), 35);

        // First row borrows the last three days of January.
        let opening: Vec<u32> = grid[..7].iter().map(|cell| cell.day).collect();
        assert_eq!(opening, [29, 30, 31, 1, 2, 3, 4]);
        assert!(grid[..3].iter().all(|cell| !cell.in_month));
        assert!(grid[3..7].iter().all(|cell| cell.in_month));

        // Last in-month day is the leap day.
        let last_in_month = grid.iter().rev().find(|cell| cell.in_month).unwrap();
        assert_eq!(last_in_month.day, 29);

        // Last row closes with borrowed March days.
        assert_eq!(
            grid[34],
            GridDay {
                day: 3,
                in_month: false
            }
        );
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_filler() {
        // September 2025 starts on a Monday.
        let grid = month_grid(2025, 9).unwrap();
        assert_eq!(
            grid[0],
            GridDay {
                day: 1,
                in_month: true
            }
        );
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn month_ending_on_sunday_has_no_trailing_filler() {
        // November 2025 ends on a Sunday.
        let grid = month_grid(2025, 11).unwrap();
        assert_eq!(
            *grid.last().unwrap(),
            GridDay {
                day: 30,
                in_month: true
            }
        );
    }

    #[test]
    fn grids_are_whole_weeks() {
        for month in 1..=12 {
            let grid = month_grid(2024, month).unwrap();
            assert_eq!(grid.len() % 7, 0, "month {month}");
        }
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert_eq!(month_grid(2024, 0), Err(CalendarError::MonthOutOfRange(0)));
        assert_eq!(
            month_grid(2024, 13),
            Err(CalendarError::MonthOutOfRange(13))
        );
    }

    #[test]
    fn bucketing_filters_on_year_and_month() {
        let events = vec![
            ("Python Workshop", date("2026-02-01")),
            ("Data Science Seminar", date("2026-02-15")),
            ("AI Conference", date("2026-03-05")),
            ("Last year's kickoff", date("2025-02-01")),
        ];

        let by_day = bucket_by_day(2026, 2, events.clone(), |event| event.1);
        assert_eq!(by_day.len(), 2);
        assert_eq!(by_day[&1], vec![("Python Workshop", date("2026-02-01"))]);
        assert_eq!(
            by_day[&15],
            vec![("Data Science Seminar", date("2026-02-15"))]
        );

        let next_month = bucket_by_day(2026, 3, events, |event| event.1);
        assert!(!next_month.contains_key(&1));
        assert_eq!(next_month[&5].len(), 1);
    }

    #[test]
    fn bucketing_keeps_input_order_within_a_day() {
        let events = vec![
            ("first", date("2026-02-01")),
            ("second", date("2026-02-01")),
        ];
        let by_day = bucket_by_day(2026, 2, events, |event| event.1);
        let names: Vec<&str> = by_day[&1].iter().map(|event| event.0).collect();
        assert_eq!(names, ["first", "second"]);
    }
}

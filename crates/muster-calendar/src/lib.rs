//! Month-grid computation for rendering a calendar dashboard.
//!
//! Weeks start on Monday. The grid borrows day numbers from the adjacent
//! months to fill the first and last rows, and every cell carries an
//! `in_month` flag so callers can tell filler days apart from the month's
//! own days without recomputing the layout.

pub mod grid;
pub mod month;

pub use grid::{GridDay, bucket_by_day, month_grid};
pub use month::{days_in_month, first_weekday, month_name, next_month, prev_month};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month out of range: {0} (expected 1-12)")]
    MonthOutOfRange(u32),

    #[error("date out of range: {year}-{month:02}")]
    DateOutOfRange { year: i32, month: u32 },
}

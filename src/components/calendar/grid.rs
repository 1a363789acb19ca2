use crate::error::{validation_error, AppResult};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub is_today: bool,
}

/// Sunday-first grid of whole weeks covering one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[GridDay; 7]>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &GridDay> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    /// First cell, always a Sunday
    pub fn start(&self) -> NaiveDate {
        self.weeks[0][0].date
    }

    /// Last cell, always a Saturday
    pub fn end(&self) -> NaiveDate {
        self.weeks[self.weeks.len() - 1][6].date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Heading such as "March 2028"
    pub fn title(&self) -> String {
        first_of_month(self.start() + Duration::days(7))
            .format("%B %Y")
            .to_string()
    }
}

/// Build the grid for the month containing `reference`.
///
/// Fails for the first and last months chrono can represent when their
/// borrowed days fall outside the date range.
pub fn month_grid(reference: NaiveDate, today: NaiveDate) -> AppResult<MonthGrid> {
    let first = first_of_month(reference);
    let last = last_of_month(reference);
    let out_of_range = || {
        validation_error(&format!(
            "No calendar grid for {}",
            first.format("%B %Y")
        ))
    };

    let start = first
        .checked_sub_signed(Duration::days(first.weekday().num_days_from_sunday() as i64))
        .ok_or_else(out_of_range)?;
    let end = last
        .checked_add_signed(Duration::days(6 - last.weekday().num_days_from_sunday() as i64))
        .ok_or_else(out_of_range)?;
    let total = (end - start).num_days() + 1;

    let days: Vec<GridDay> = start
        .iter_days()
        .take(total as usize)
        .map(|date| GridDay {
            date,
            in_month: date.month() == first.month() && date.year() == first.year(),
            is_today: date == today,
        })
        .collect();

    let weeks = days
        .chunks_exact(7)
        .map(|week| [week[0], week[1], week[2], week[3], week[4], week[5], week[6]])
        .collect();

    Ok(MonthGrid {
        year: first.year(),
        month: first.month(),
        weeks,
    })
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Duration::days(days_in_month(date.year(), date.month()) as i64 - 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// First day of the month `months` away from the one containing `date`
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

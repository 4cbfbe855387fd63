use crate::{
    bill::{Bill, BillError},
    month::{days_in_month, Locale},
};
use chrono::{Datelike, NaiveDate, Weekday};
use log::{debug, trace};
use std::fmt;

/// The number of bills shown in the "upcoming bills" panel
pub const DEFAULT_UPCOMING_LIMIT: usize = 2;

// Bills due within this many days (including overdue bills) are urgent.
const URGENT_DAYS: i64 = 7;

/// Calculates due dates, month grids and upcoming bills for a set of bills.
///
/// The calendar holds no state between calls besides its configuration. "Today" is
/// always passed in by the caller, so every result is a pure function of its inputs.
#[derive(Clone, Debug)]
pub struct BillCalendar {
    locale: Locale,
    upcoming_limit: usize,
}

/// A single cell of a month grid
#[derive(Debug, PartialEq)]
pub enum GridCell<'a> {
    Blank,
    Day(u32, Option<&'a Bill>), // Day of month, highlighted bill
}

/// The cells needed to draw one month, week rows left to right.
///
/// Cells before the first of the month are `Blank`. Each remaining cell holds its day
/// number and, if any bill falls on that day, the first such bill in input order.
#[derive(Debug)]
pub struct MonthGrid<'a> {
    year: i32,
    month: u32,
    offset: u32,
    cells: Vec<GridCell<'a>>,
    bills: &'a [Bill],
}

/// How a bill's due date should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueStatus {
    Urgent,
    Normal,
}

/// The whole number of days until a bill is due. Negative when overdue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DueIn(pub i64);

impl Default for BillCalendar {
    fn default() -> Self {
        BillCalendar {
            locale: Locale::default(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl BillCalendar {
    pub fn new(locale: Locale) -> Self {
        BillCalendar {
            locale,
            ..BillCalendar::default()
        }
    }

    pub fn with_locale(&mut self, locale: Locale) -> &mut Self {
        self.locale = locale;
        self
    }

    pub fn with_upcoming_limit(&mut self, limit: usize) -> &mut Self {
        self.upcoming_limit = limit;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Convert a full month name to its calendar number (January = 1)
    pub fn month_number(&self, month_name: &str) -> Option<u32> {
        self.locale.month_number(month_name)
    }

    /// Lay out a month for display, highlighting the days that have bills.
    ///
    /// `bills` must already be scoped to `year` and `month_index`; only their `day`
    /// is consulted here. `month_index` is zero based (January = 0).
    pub fn build_month_grid<'a>(
        &self,
        bills: &'a [Bill],
        year: i32,
        month_index: u32,
    ) -> Result<MonthGrid<'a>, BillError> {
        if month_index > 11 {
            return Err(BillError::MonthOutOfRange(month_index));
        }

        let month = month_index + 1;
        let days = days_in_month(year, month).ok_or(BillError::MonthOutOfRange(month_index))?;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            let name = self.locale.month_name(month).unwrap_or_default();
            BillError::InvalidDate(1, name.into(), year)
        })?;

        let offset = weekday_offset(first.weekday(), self.locale.first_weekday());

        debug!(
            "building grid for {}-{:02}: {} days, first day {:?}, offset {}",
            year,
            month,
            days,
            first.weekday(),
            offset
        );

        let mut cells = Vec::with_capacity((days + offset) as usize);
        cells.extend((0..offset).map(|_| GridCell::Blank));

        for day in 1..=days {
            // First match wins if a day has more than one bill. All of them are still
            // available through `MonthGrid::bills_on`.
            let bill = bills.iter().find(|b| b.day == day);
            if let Some(b) = bill {
                trace!("day {} highlights bill '{}'", day, b.id);
            }
            cells.push(GridCell::Day(day, bill));
        }

        Ok(MonthGrid {
            year,
            month,
            offset,
            cells,
            bills,
        })
    }

    /// Whole calendar days from `today` until `bill` is due.
    ///
    /// Zero means the bill is due today and negative values are overdue. A bill whose
    /// due date can't be reconstructed returns the reason instead.
    pub fn days_until_due(&self, bill: &Bill, today: NaiveDate) -> Result<i64, BillError> {
        let due = bill.due_date(&self.locale)?;
        Ok(due.signed_duration_since(today).num_days())
    }

    pub fn due_in(&self, bill: &Bill, today: NaiveDate) -> Result<DueIn, BillError> {
        self.days_until_due(bill, today).map(DueIn)
    }

    /// The `limit` bills due soonest, on or after `today`.
    ///
    /// Bills with an unknown month or an impossible date are skipped without affecting
    /// the rest of the batch. Bills due on the same date keep their input order.
    pub fn nearest_upcoming<'a>(
        &self,
        bills: &'a [Bill],
        today: NaiveDate,
        limit: usize,
    ) -> Vec<&'a Bill> {
        let mut dated: Vec<(NaiveDate, &Bill)> = bills
            .iter()
            .filter_map(|bill| match bill.due_date(&self.locale) {
                Ok(due) => Some((due, bill)),
                Err(e) => {
                    debug!("skipping bill '{}' for upcoming bills: {}", bill.id, e);
                    None
                }
            })
            .filter(|(due, _)| *due >= today)
            .collect();

        // `sort_by_key` is stable, which gives us input order for ties
        dated.sort_by_key(|(due, _)| *due);
        dated.truncate(limit);

        debug!(
            "{} of {} bills are upcoming from {}",
            dated.len(),
            bills.len(),
            today
        );

        dated.into_iter().map(|(_, bill)| bill).collect()
    }

    /// `nearest_upcoming` with the configured limit
    pub fn upcoming<'a>(&self, bills: &'a [Bill], today: NaiveDate) -> Vec<&'a Bill> {
        self.nearest_upcoming(bills, today, self.upcoming_limit)
    }
}

impl<'a> MonthGrid<'a> {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month number (January = 1)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of blank cells before the first of the month
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn days_in_month(&self) -> u32 {
        self.cells.len() as u32 - self.offset
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    /// Cells split into rows of seven. The final row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(7)
    }

    /// The highlighted bill for `day`, if there is one
    pub fn bill_for_day(&self, day: u32) -> Option<&'a Bill> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }

        match self.cells.get((self.offset + day - 1) as usize) {
            Some(GridCell::Day(_, bill)) => *bill,
            _ => None,
        }
    }

    /// Every bill that falls on `day`, in input order
    pub fn bills_on(&self, day: u32) -> Vec<&'a Bill> {
        self.bills.iter().filter(|b| b.day == day).collect()
    }
}

impl DueStatus {
    pub fn from_days(days: i64) -> Self {
        if days <= URGENT_DAYS {
            DueStatus::Urgent
        } else {
            DueStatus::Normal
        }
    }
}

impl DueIn {
    pub fn days(&self) -> i64 {
        self.0
    }

    pub fn status(&self) -> DueStatus {
        DueStatus::from_days(self.0)
    }

    pub fn is_singular(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for DueIn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_singular() {
            write!(f, "{} day left", self.0)
        } else {
            write!(f, "{} days left", self.0)
        }
    }
}

// Number of blank cells needed before `first` in a week starting on `week_start`
fn weekday_offset(first: Weekday, week_start: Weekday) -> u32 {
    (7 + first.num_days_from_sunday() - week_start.num_days_from_sunday()) % 7
}

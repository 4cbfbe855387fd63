use chrono::Weekday;

/// Full English month names, January first.
pub const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// These are tedious arrays to aid the lookup of month lengths. The leap year table is
// only used when `is_leap_year` says so.
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_LENGTHS_LEAP: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// The calendar conventions bills are read and drawn with.
///
/// Bills store their month as a full month name, so every due date calculation
/// depends on this table. The first weekday decides which column day 1 of a month
/// lands in when drawing a month grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Locale {
    month_names: [&'static str; 12],
    first_weekday: Weekday,
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            month_names: ENGLISH_MONTHS,
            first_weekday: Weekday::Sun,
        }
    }
}

impl Locale {
    pub fn new(month_names: [&'static str; 12], first_weekday: Weekday) -> Self {
        Locale {
            month_names,
            first_weekday,
        }
    }

    pub fn with_first_weekday(&mut self, weekday: Weekday) -> &mut Self {
        self.first_weekday = weekday;
        self
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Convert a full month name to its calendar number (January = 1).
    ///
    /// The match is exact. "march", " March" and "Marchh" are all unknown.
    pub fn month_number(&self, month_name: &str) -> Option<u32> {
        self.month_names
            .iter()
            .position(|name| *name == month_name)
            .map(|idx| idx as u32 + 1)
    }

    /// Convert a calendar month number (January = 1) to its full name.
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        month
            .checked_sub(1)
            .and_then(|m0| self.month_names.get(m0 as usize))
            .copied()
    }
}

/// Gregorian leap years: every 4th year, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (January = 1) of `year`, or `None` for a month outside
/// 1 - 12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let m0 = month.checked_sub(1)? as usize;
    let table = if is_leap_year(year) {
        &MONTH_LENGTHS_LEAP
    } else {
        &MONTH_LENGTHS
    };
    table.get(m0).copied()
}

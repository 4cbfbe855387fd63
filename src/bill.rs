use crate::month::Locale;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

/// A payment obligation with a due date.
///
/// Bills are stored by the remote store in `(year, month)` partitions, and carry
/// their due date as separate day, month name and year fields. A `Bill` is never
/// mutated by this crate; every calculation takes it by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub amount: Decimal,
    pub day: u32,
    pub month: String,
    pub year: i32,
    pub payment_link: String,
    pub repeats: String,
    pub notification: bool,
}

/// The `(year, month)` key that a batch of bills, incomes or expenses is stored under
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition {
    pub year: i32,
    pub month: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum BillError {
    #[error("'{0}' is not a recognised month name")]
    UnknownMonth(String),
    #[error("'{0} {1} {2}' is not a valid calendar date")]
    InvalidDate(u32, String, i32), // day, month, year
    #[error("month index {0} is out of range")]
    MonthOutOfRange(u32),
}

impl Bill {
    /// Create a bill with empty account, link and repeat details
    pub fn new<S: Into<String>>(
        id: S,
        name: S,
        amount: Decimal,
        day: u32,
        month: S,
        year: i32,
    ) -> Self {
        Bill {
            id: id.into(),
            name: name.into(),
            account_number: String::new(),
            amount,
            day,
            month: month.into(),
            year,
            payment_link: String::new(),
            repeats: String::new(),
            notification: false,
        }
    }

    pub fn partition(&self) -> Partition {
        Partition::new(self.year, self.month.clone())
    }

    /// Reconstruct this bill's due date from its day, month name and year.
    ///
    /// A triple that doesn't exist on the calendar (e.g. "31 April") is an error
    /// rather than being clamped or rolled into the next month.
    pub fn due_date(&self, locale: &Locale) -> Result<NaiveDate, BillError> {
        let month = locale
            .month_number(&self.month)
            .ok_or_else(|| BillError::UnknownMonth(self.month.clone()))?;

        NaiveDate::from_ymd_opt(self.year, month, self.day)
            .ok_or_else(|| BillError::InvalidDate(self.day, self.month.clone(), self.year))
    }
}

impl Partition {
    pub fn new<S: Into<String>>(year: i32, month: S) -> Self {
        Partition {
            year,
            month: month.into(),
        }
    }

    /// The partition that `today` falls in
    pub fn current(today: NaiveDate, locale: &Locale) -> Self {
        // `month` is always 1 - 12, so the name lookup can't miss
        let month = locale.month_name(today.month()).unwrap_or_default();
        Partition::new(today.year(), month)
    }

    /// The partition for the month after this one, rolling December into January of
    /// the next year. An unknown month name is kept as is with the year unchanged.
    pub fn following(&self, locale: &Locale) -> Self {
        match locale.month_number(&self.month) {
            Some(12) => Partition::new(self.year + 1, locale.month_name(1).unwrap_or_default()),
            Some(m) => Partition::new(self.year, locale.month_name(m + 1).unwrap_or_default()),
            None => self.clone(),
        }
    }

    pub fn contains(&self, bill: &Bill) -> bool {
        bill.year == self.year && bill.month == self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::ENGLISH_MONTHS;
    use rust_decimal_macros::dec;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn due_date_valid() {
        let bill = Bill::new("a", "Rent", dec!(950), 5, "March", 2024);
        assert_eq!(bill.due_date(&Locale::default()), Ok(ymd(2024, 3, 5)));
    }

    #[test]
    fn due_date_unknown_month() {
        let bill = Bill::new("a", "Rent", dec!(950), 5, "Marchh", 2024);
        assert_eq!(
            bill.due_date(&Locale::default()),
            Err(BillError::UnknownMonth("Marchh".into()))
        );
    }

    #[test]
    fn due_date_invalid_day() {
        let bill = Bill::new("a", "Rent", dec!(950), 31, "April", 2024);
        assert_eq!(
            bill.due_date(&Locale::default()),
            Err(BillError::InvalidDate(31, "April".into(), 2024))
        );
    }

    #[test]
    fn due_date_leap_day() {
        let leap = Bill::new("a", "Gym", dec!(20), 29, "February", 2024);
        let common = Bill::new("b", "Gym", dec!(20), 29, "February", 2023);
        assert_eq!(leap.due_date(&Locale::default()), Ok(ymd(2024, 2, 29)));
        assert!(common.due_date(&Locale::default()).is_err());
    }

    #[test]
    fn due_date_day_zero() {
        let bill = Bill::new("a", "Rent", dec!(950), 0, "March", 2024);
        assert_eq!(
            bill.due_date(&Locale::default()),
            Err(BillError::InvalidDate(0, "March".into(), 2024))
        );
    }

    #[test]
    fn due_date_round_trip() {
        let locale = Locale::default();
        let mut date = ymd(2023, 1, 1);
        while date <= ymd(2025, 12, 31) {
            let month = ENGLISH_MONTHS[date.month0() as usize];
            let bill = Bill::new("id", "Bill", dec!(1), date.day(), month, date.year());
            let due = bill.due_date(&locale).unwrap();

            assert_eq!((due.day(), due.month(), due.year()), (date.day(), date.month(), date.year()));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn partition_current() {
        let partition = Partition::current(ymd(2024, 3, 17), &Locale::default());
        assert_eq!(partition, Partition::new(2024, "March"));
    }

    #[test]
    fn partition_following() {
        let locale = Locale::default();
        assert_eq!(
            Partition::new(2024, "March").following(&locale),
            Partition::new(2024, "April")
        );
        assert_eq!(
            Partition::new(2024, "December").following(&locale),
            Partition::new(2025, "January")
        );
        assert_eq!(
            Partition::new(2024, "Marchh").following(&locale),
            Partition::new(2024, "Marchh")
        );
    }

    #[test]
    fn partition_contains() {
        let partition = Partition::new(2024, "March");
        assert!(partition.contains(&Bill::new("a", "Rent", dec!(1), 1, "March", 2024)));
        assert!(!partition.contains(&Bill::new("b", "Rent", dec!(1), 1, "March", 2025)));
        assert!(!partition.contains(&Bill::new("c", "Rent", dec!(1), 1, "April", 2024)));
    }

    #[test]
    fn bill_partition() {
        let bill = Bill::new("a", "Rent", dec!(1), 1, "June", 2030);
        assert_eq!(bill.partition(), Partition::new(2030, "June"));
    }
}

//! Due dates, month grids and budget totals for a personal money manager.
//!
//! Bills, incomes and expenses live in a remote store, partitioned by year and month.
//! This crate turns what the store returns into the things a money manager shows: which
//! days of a month have bills, how long until each bill is due, the next couple of
//! bills to pay, and where the month's money went.

mod bill;
mod board;
mod calendar;
pub mod document;
mod month;
mod summary;

pub use bill::{Bill, BillError, Partition};
pub use board::{BillBoard, BillProvider, MemoryProvider};
pub use calendar::{BillCalendar, DueIn, DueStatus, GridCell, MonthGrid, DEFAULT_UPCOMING_LIMIT};
pub use month::{days_in_month, is_leap_year, Locale, ENGLISH_MONTHS};
pub use summary::{
    category_totals, expenses_in_category, total_expense, total_income, CategoryTotal, Expense,
    Income, MonthlySummary,
};

// This represents the number of decimal places that a currency can validly express.
// @todo Support the full range of currency precisions specified in ISO 4217.
const CURRENCY_PRECISION: u32 = 2;

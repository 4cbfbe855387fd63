use crate::bill::Partition;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Money received in a month
#[derive(Clone, Debug, PartialEq)]
pub struct Income {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub month: String,
    pub year: i32,
    pub kind: String, // e.g. "Salary", "Gift"
}

/// Money spent in a month, filed under a user defined category
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub month: String,
    pub year: i32,
    pub category: String,
}

/// The sum of every expense in one category
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: Decimal,
}

/// Income, spending and per-category totals for one `(year, month)` partition
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlySummary {
    partition: Partition,
    total_income: Decimal,
    total_expense: Decimal,
    categories: Vec<CategoryTotal>,
}

pub fn total_income(incomes: &[Income]) -> Decimal {
    incomes.iter().map(|i| i.amount).sum()
}

pub fn total_expense(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum expenses per category, ordered by category name ignoring case.
///
/// Categories are grouped by their exact name, so "Food" and "food" are separate
/// totals that happen to sort next to each other.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_insert(Decimal::ZERO) += expense.amount;
    }

    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, total)| CategoryTotal {
            name: name.to_owned(),
            total,
        })
        .collect();

    // Starting from the byte ordering of the map keeps the result deterministic for
    // names that only differ by case.
    totals.sort_by_key(|c| c.name.to_lowercase());
    totals
}

pub fn expenses_in_category<'a>(expenses: &'a [Expense], category: &str) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| e.category == category).collect()
}

impl MonthlySummary {
    pub fn new(partition: Partition, incomes: &[Income], expenses: &[Expense]) -> Self {
        let summary = MonthlySummary {
            total_income: total_income(incomes),
            total_expense: total_expense(expenses),
            categories: category_totals(expenses),
            partition,
        };

        debug!(
            "summary for {} {}: income {}, expense {}, {} categories",
            summary.partition.month,
            summary.partition.year,
            summary.total_income,
            summary.total_expense,
            summary.categories.len()
        );

        summary
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    pub fn total_expense(&self) -> Decimal {
        self.total_expense
    }

    /// Income less spending. Negative when the month is overspent.
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    pub fn categories(&self) -> &[CategoryTotal] {
        &self.categories
    }
}

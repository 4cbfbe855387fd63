use crate::{
    bill::{Bill, BillError, Partition},
    calendar::{BillCalendar, MonthGrid},
};
use chrono::NaiveDate;
use log::debug;
use std::{collections::HashMap, convert::Infallible};

/// Supplies the bills stored under a `(year, month)` partition.
///
/// This is the seam to the remote store. Implementations are expected to return only
/// bills belonging to `partition`, already mapped to typed `Bill`s.
pub trait BillProvider {
    type Error;

    fn bills(&self, partition: &Partition) -> Result<Vec<Bill>, Self::Error>;
}

/// An in-process `BillProvider`, keyed by partition
#[derive(Debug, Default)]
pub struct MemoryProvider {
    partitions: HashMap<Partition, Vec<Bill>>,
}

/// The bills a bill screen is showing.
///
/// `monthly` holds the selected partition, `upcoming` the nearest bills due from the
/// current and following months. Both are replaced together by `refresh`, never edited in place.
#[derive(Debug)]
pub struct BillBoard {
    selected: Partition,
    monthly: Vec<Bill>,
    upcoming: Vec<Bill>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        MemoryProvider::default()
    }

    /// File `bill` under its own partition, replacing any stored bill with the same id
    pub fn insert(&mut self, bill: Bill) -> &mut Self {
        let bills = self
            .partitions
            .entry(bill.partition())
            .or_insert_with(Vec::new);

        match bills.iter_mut().find(|b| b.id == bill.id) {
            Some(existing) => *existing = bill,
            None => bills.push(bill),
        }
        self
    }

    pub fn remove(&mut self, partition: &Partition, id: &str) -> Option<Bill> {
        let bills = self.partitions.get_mut(partition)?;
        let idx = bills.iter().position(|b| b.id == id)?;
        Some(bills.remove(idx))
    }
}

impl BillProvider for MemoryProvider {
    type Error = Infallible;

    fn bills(&self, partition: &Partition) -> Result<Vec<Bill>, Self::Error> {
        Ok(self.partitions.get(partition).cloned().unwrap_or_default())
    }
}

impl BillBoard {
    pub fn new(selected: Partition) -> Self {
        BillBoard {
            selected,
            monthly: Vec::new(),
            upcoming: Vec::new(),
        }
    }

    pub fn selected(&self) -> &Partition {
        &self.selected
    }

    /// Change the selected partition. Call `refresh` to load its bills.
    pub fn select(&mut self, partition: Partition) -> &mut Self {
        self.selected = partition;
        self
    }

    pub fn monthly(&self) -> &[Bill] {
        &self.monthly
    }

    pub fn upcoming(&self) -> &[Bill] {
        &self.upcoming
    }

    /// Reload the selected month and the upcoming bills.
    ///
    /// Upcoming bills always come from the partition `today` falls in and the one after
    /// it, whichever month is selected. If the provider fails, the board keeps its
    /// previous contents.
    pub fn refresh<P: BillProvider>(
        &mut self,
        calendar: &BillCalendar,
        provider: &P,
        today: NaiveDate,
    ) -> Result<(), P::Error> {
        let monthly = provider.bills(&self.selected)?;

        // The nearest bills can spill into next month, so read both partitions
        let current = Partition::current(today, calendar.locale());
        let next = current.following(calendar.locale());

        let mut candidates = Vec::new();
        for partition in &[current, next] {
            if *partition == self.selected {
                candidates.extend(monthly.iter().cloned());
            } else {
                candidates.extend(provider.bills(partition)?);
            }
        }

        let upcoming: Vec<Bill> = calendar
            .upcoming(&candidates, today)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            "refreshed {} {}: {} bills, {} upcoming",
            self.selected.month,
            self.selected.year,
            monthly.len(),
            upcoming.len()
        );

        self.monthly = monthly;
        self.upcoming = upcoming;
        Ok(())
    }

    /// Lay out the selected month with its bills highlighted
    pub fn month_grid<'a>(&'a self, calendar: &BillCalendar) -> Result<MonthGrid<'a>, BillError> {
        let month = calendar
            .month_number(&self.selected.month)
            .ok_or_else(|| BillError::UnknownMonth(self.selected.month.clone()))?;

        calendar.build_month_grid(&self.monthly, self.selected.year, month - 1)
    }
}

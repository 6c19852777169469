//! The pricing engine resolves each night of a stay to its tariff and price.
use crate::calendar::TariffCalendar;
use crate::grid::PriceGrid;
use anyhow::Result;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

/// The per-night breakdown of a stay, in chronological order, with its total.
#[derive(PartialEq, Debug)]
pub struct StayDetail {
    /// One `(day, price)` entry per night
    pub nights: Vec<(NaiveDate, Decimal)>,
    /// The sum of all nightly prices
    pub total: Decimal,
}

impl StayDetail {
    /// The mean nightly price, or zero for an empty stay.
    pub fn mean(&self) -> Decimal {
        if self.nights.is_empty() {
            return Decimal::ZERO;
        }

        self.total / Decimal::from(self.nights.len() as u64)
    }
}

/// Computes nightly prices by composing a calendar with a price grid.
///
/// The calculator borrows both inputs; they are immutable after construction
/// and can be shared freely between calculators.
pub struct Calculator<'a> {
    calendar: &'a TariffCalendar,
    grid: &'a PriceGrid,
}

impl<'a> Calculator<'a> {
    /// Create a [`Calculator`] over the given calendar and price grid.
    pub fn new(calendar: &'a TariffCalendar, grid: &'a PriceGrid) -> Self {
        Self { calendar, grid }
    }

    /// The calendar the calculator prices against.
    pub fn calendar(&self) -> &TariffCalendar {
        self.calendar
    }

    /// The price grid the calculator prices against.
    pub fn grid(&self) -> &PriceGrid {
        self.grid
    }

    /// The net price of the night of `day`.
    ///
    /// Fails if `day` is not covered by the calendar.
    pub fn price_for_day(&self, day: NaiveDate) -> Result<Decimal> {
        let period = self.calendar.period_for_day(day)?;
        let tariff = self.grid.lookup(period.tariff_id())?;

        Ok(tariff.price_for_day(day))
    }

    /// Price every night from `start` to `end`, both bounds included.
    ///
    /// Any night that cannot be resolved aborts the whole computation. The
    /// result is empty when `end` is before `start`.
    pub fn compute_range(&self, start: NaiveDate, end: NaiveDate) -> Result<StayDetail> {
        let mut nights = Vec::new();
        let mut total = Decimal::ZERO;

        let mut day = start;
        while day <= end {
            let price = self.price_for_day(day)?;
            nights.push((day, price));
            total += price;
            day = day + Days::new(1);
        }

        Ok(StayDetail { nights, total })
    }
}

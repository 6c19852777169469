//! A period is a closed date interval tagged with a tariff.
use crate::date::format_date;
use crate::tariff::TariffId;
use anyhow::{Result, ensure};
use chrono::NaiveDate;

/// A closed date interval `[start, end]` priced with a single tariff.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
    tariff_id: TariffId,
}

impl Period {
    /// Create a new [`Period`], checking that `end` is not before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate, tariff_id: TariffId) -> Result<Self> {
        ensure!(
            end >= start,
            "Period end {} is before start {}",
            format_date(end),
            format_date(start)
        );

        Ok(Self {
            start,
            end,
            tariff_id,
        })
    }

    /// The first day of the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the period.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The tariff applied to every night of the period.
    pub fn tariff_id(&self) -> &TariffId {
        &self.tariff_id
    }

    /// Whether `day` falls inside the period (both bounds included).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// The number of nights covered by the period (a one-day period is one
    /// night).
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

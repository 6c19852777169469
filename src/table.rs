//! Summary tables of the pricing periods, with optional platform commission.
//!
//! Listing platforms retain a commission on the gross price, so the gross
//! nightly price is marked up to preserve the owner's net income, then always
//! rounded up to the next whole currency unit. All arithmetic is exact
//! decimal, never binary floating point.
use crate::date::format_date;
use crate::engine::Calculator;
use crate::period::Period;
use crate::tariff::Tariff;
use anyhow::Result;
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::min;
use std::fmt;

/// The marker used in place of a 7-night price when the row covers fewer than
/// 7 nights
pub const TOO_SHORT_MARKER: &str = "trop court";

/// A listing platform that retains a commission on the gross price.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Platform {
    /// Airbnb (3.6 % commission)
    Airbnb,
    /// Booking.com (16.4 % commission)
    Booking,
    /// Abritel / Vrbo (8 % commission)
    Abritel,
    /// Gîtes de France (3 % commission)
    Gites,
}

impl Platform {
    /// The fraction of the gross price retained by the platform.
    pub fn commission(&self) -> Decimal {
        match self {
            Self::Airbnb => dec!(0.036),
            Self::Booking => dec!(0.164),
            Self::Abritel => dec!(0.08),
            Self::Gites => dec!(0.03),
        }
    }

    /// Parse a platform name, ignoring case.
    ///
    /// Unknown names give `None`, which callers treat as "no commission".
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "airbnb" => Some(Self::Airbnb),
            "booking" => Some(Self::Booking),
            "abritel" => Some(Self::Abritel),
            "gites" => Some(Self::Gites),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Airbnb => "airbnb",
            Self::Booking => "booking",
            Self::Abritel => "abritel",
            Self::Gites => "gites",
        };
        write!(f, "{name}")
    }
}

/// One row of the summary table, with all values already formatted for
/// display.
///
/// Field names match the columns of the exported CSV file.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SummaryRow {
    /// First night of the row, `DD-MM-YYYY`
    pub debut: String,
    /// Last night of the row, `DD-MM-YYYY`
    pub fin: String,
    /// The tariff identifier
    pub periode: String,
    /// Adjusted weekday nightly price
    pub prix_semaine_unit: String,
    /// Adjusted weekend nightly price
    pub prix_weekend_unit: String,
    /// Adjusted price of the first 7 nights, or [`TOO_SHORT_MARKER`]
    pub prix_semaine_7j: String,
}

/// Builds summary tables from a [`Calculator`], one row per pricing period.
pub struct SummaryTable<'a> {
    calculator: &'a Calculator<'a>,
    platform: Option<Platform>,
}

impl<'a> SummaryTable<'a> {
    /// Create a [`SummaryTable`] builder.
    ///
    /// With no platform, prices carry no markup but are still rounded up to
    /// whole units.
    pub fn new(calculator: &'a Calculator<'a>, platform: Option<Platform>) -> Self {
        Self {
            calculator,
            platform,
        }
    }

    /// Mark up a net nightly price to preserve it under the platform's
    /// commission.
    ///
    /// The gross price is `net / (1 - rate)`, rounded up to the next whole
    /// currency unit. The result is always integer-valued.
    pub fn adjust_price(&self, net: Decimal) -> Decimal {
        let rate = self
            .platform
            .map_or(Decimal::ZERO, |platform| platform.commission());

        (net / (Decimal::ONE - rate)).ceil()
    }

    /// The adjusted price of the first 7 nights from `start`, or `None` when
    /// the row covers fewer than 7 nights.
    fn seven_night_price(&self, start: NaiveDate, end: NaiveDate, tariff: &Tariff) -> Option<Decimal> {
        let nights = (end - start).num_days() + 1;
        if nights < 7 {
            return None;
        }

        let total = (0..7)
            .map(|offset| {
                let day = start + Days::new(offset);
                self.adjust_price(tariff.price_for_day(day))
            })
            .sum();

        Some(total)
    }

    /// Build one row covering the nights from `start` to `end` under `period`.
    fn build_row(&self, start: NaiveDate, end: NaiveDate, period: &Period) -> Result<SummaryRow> {
        let tariff = self.calculator.grid().lookup(period.tariff_id())?;

        let seven_nights = self
            .seven_night_price(start, end, tariff)
            .map_or_else(|| TOO_SHORT_MARKER.to_string(), |total| format!("{total:.2}"));

        Ok(SummaryRow {
            debut: format_date(start),
            fin: format_date(end),
            periode: period.tariff_id().to_string(),
            prix_semaine_unit: format!("{:.2}", self.adjust_price(tariff.weekday_price)),
            prix_weekend_unit: format!("{:.2}", self.adjust_price(tariff.weekend_price)),
            prix_semaine_7j: seven_nights,
        })
    }

    /// Build one row per period of the whole calendar.
    pub fn build_full(&self) -> Result<Vec<SummaryRow>> {
        self.calculator
            .calendar()
            .periods()
            .iter()
            .map(|period| self.build_row(period.start(), period.end(), period))
            .try_collect()
    }

    /// Build one row per period intersecting `[start, end]`, each clipped to
    /// the query bounds.
    ///
    /// The 7-night column of a clipped row is computed over the clipped
    /// sub-range, not the underlying period. Fails if any day of the range is
    /// not covered by the calendar.
    pub fn build_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<SummaryRow>> {
        let mut rows = Vec::new();

        let mut day = start;
        while day <= end {
            let period = self.calculator.calendar().period_for_day(day)?;
            let row_end = min(period.end(), end);
            rows.push(self.build_row(day, row_end, period)?);
            day = row_end + Days::new(1);
        }

        Ok(rows)
    }

    /// Print rows as a fixed-width console table.
    ///
    /// The 7-night column is indicative only, and the rendering always says
    /// so.
    pub fn render(&self, rows: &[SummaryRow]) {
        match self.platform {
            Some(platform) => {
                let percent = platform.commission() * dec!(100);
                println!("MODE : Commission {platform} incluse ({percent:.1} %)");
            }
            None => println!("MODE : Tarifs nets (aucune commission)"),
        }

        println!("{:-<80}", "");
        println!(
            "{:<12} {:<12} {:<15} {:<12} {:<12} {:<12}",
            "Début", "Fin", "Période", "Prix semaine", "Prix weekend", "Prix 7j"
        );
        println!("{:-<80}", "");

        for row in rows {
            println!(
                "{:<12} {:<12} {:<15} {:<12} {:<12} {:<12}",
                row.debut,
                row.fin,
                row.periode,
                row.prix_semaine_unit,
                row.prix_weekend_unit,
                row.prix_semaine_7j
            );
        }

        println!("\nATTENTION : la colonne 'Prix 7j' est donnée à titre indicatif.");
    }
}

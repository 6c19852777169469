//! The price grid maps tariff identifiers to their nightly prices.
use crate::input::read_csv_rows;
use crate::tariff::{Tariff, TariffId};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// The file name for the price grid within the data directory
pub const PRICE_GRID_FILE_NAME: &str = "prix.csv";

/// A row of the price grid CSV file
#[derive(Deserialize)]
struct PriceGridRow {
    id: String,
    prix_semaine: Decimal,
    prix_weekend: Decimal,
}

/// The set of known tariffs, keyed by identifier.
#[derive(PartialEq, Debug)]
pub struct PriceGrid {
    tariffs: IndexMap<TariffId, Tariff>,
}

impl PriceGrid {
    /// Create a [`PriceGrid`] from tariff entries, checking ids are unique.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TariffId, Tariff)>,
    {
        let mut tariffs = IndexMap::new();
        for (id, tariff) in entries {
            let duplicate = tariffs.insert(id.clone(), tariff).is_some();
            ensure!(!duplicate, "Duplicate tariff '{id}' in price grid");
        }

        Ok(Self { tariffs })
    }

    /// Whether a tariff with the given identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.tariffs.contains_key(id)
    }

    /// Get the tariff with the given identifier, failing if it is unknown.
    pub fn lookup(&self, id: &TariffId) -> Result<&Tariff> {
        self.tariffs
            .get(id)
            .with_context(|| format!("Unknown tariff '{id}'"))
    }

}

/// Read the price grid from `prix.csv` in the given data directory.
pub fn read_price_grid(data_dir: &Path) -> Result<PriceGrid> {
    let file_path = data_dir.join(PRICE_GRID_FILE_NAME);
    let rows: Vec<PriceGridRow> = read_csv_rows(&file_path)?;

    PriceGrid::new(rows.into_iter().map(|row| {
        (
            row.id.into(),
            Tariff {
                weekday_price: row.prix_semaine,
                weekend_price: row.prix_weekend,
            },
        )
    }))
    .with_context(|| format!("Error reading {}", file_path.display()))
}

//! The tariff calendar is the ordered, gap-free timeline of pricing periods.
use crate::date::{format_date, parse_date};
use crate::grid::PriceGrid;
use crate::input::read_csv_rows;
use crate::period::Period;
use anyhow::{Context, Result, ensure};
use chrono::{Days, NaiveDate};
use itertools::Itertools;
use serde::Deserialize;
use std::path::Path;

/// The file name for the period calendar within the data directory
pub const CALENDAR_FILE_NAME: &str = "periode.csv";

/// A row of the period calendar CSV file
#[derive(Deserialize)]
struct CalendarRow {
    id: String,
    date_debut: String,
    date_fin: String,
}

/// The full timeline of pricing periods, sorted by start date.
///
/// Adjacent periods must be consecutive: each period starts on the day after
/// the previous one ends, so the timeline has no gaps and no overlaps.
#[derive(PartialEq, Debug)]
pub struct TariffCalendar {
    periods: Vec<Period>,
}

impl TariffCalendar {
    /// Create a [`TariffCalendar`], sorting the periods and checking that they
    /// are consecutive.
    pub fn new(mut periods: Vec<Period>) -> Result<Self> {
        periods.sort_by_key(Period::start);

        for (prev, curr) in periods.iter().tuple_windows() {
            let expected_start = prev.end() + Days::new(1);
            ensure!(
                curr.start() == expected_start,
                "Non-consecutive periods: {} -> {}",
                format_date(prev.end()),
                format_date(curr.start())
            );
        }

        Ok(Self { periods })
    }

    /// The periods of the calendar, in chronological order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Resolve the unique period covering `day`.
    ///
    /// As the periods are sorted and contiguous, a binary search on start
    /// dates suffices. Fails if `day` falls outside the calendar's span.
    pub fn period_for_day(&self, day: NaiveDate) -> Result<&Period> {
        let idx = self.periods.partition_point(|p| p.start() <= day);
        idx.checked_sub(1)
            .map(|i| &self.periods[i])
            .filter(|p| p.contains(day))
            .with_context(|| format!("No period found for {}", format_date(day)))
    }
}

/// Read the period calendar from `periode.csv` in the given data directory.
///
/// Every referenced tariff must exist in `grid`.
pub fn read_calendar(data_dir: &Path, grid: &PriceGrid) -> Result<TariffCalendar> {
    let file_path = data_dir.join(CALENDAR_FILE_NAME);
    let rows: Vec<CalendarRow> = read_csv_rows(&file_path)?;

    let periods: Vec<_> = rows
        .into_iter()
        .map(|row| {
            ensure!(grid.contains(&row.id), "Unknown tariff '{}'", row.id);
            Period::new(
                parse_date(&row.date_debut)?,
                parse_date(&row.date_fin)?,
                row.id.into(),
            )
        })
        .try_collect()
        .with_context(|| format!("Error reading {}", file_path.display()))?;

    TariffCalendar::new(periods).with_context(|| format!("Error reading {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, calendar, grid, period};
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    #[test]
    fn test_new_sorts_periods() {
        let calendar = TariffCalendar::new(vec![
            period(date(2, 1), date(2, 28), "haute"),
            period(date(1, 1), date(1, 31), "basse"),
        ])
        .unwrap();

        assert_eq!(
            calendar.periods()[0],
            period(date(1, 1), date(1, 31), "basse")
        );
    }

    #[test]
    fn test_new_rejects_gap() {
        assert_error!(
            TariffCalendar::new(vec![
                period(date(1, 1), date(1, 10), "basse"),
                period(date(1, 12), date(1, 20), "haute"),
            ]),
            "Non-consecutive periods: 10-01-2026 -> 12-01-2026"
        );
    }

    #[test]
    fn test_new_rejects_overlap() {
        assert_error!(
            TariffCalendar::new(vec![
                period(date(1, 1), date(1, 10), "basse"),
                period(date(1, 10), date(1, 20), "haute"),
            ]),
            "Non-consecutive periods: 10-01-2026 -> 10-01-2026"
        );
    }

    #[rstest]
    #[case(date(1, 1), "basse")] // first day of calendar
    #[case(date(1, 31), "basse")] // last day of first period
    #[case(date(2, 1), "haute")] // first day of second period
    #[case(date(2, 28), "haute")] // last day of calendar
    fn test_period_for_day(
        calendar: TariffCalendar,
        #[case] day: NaiveDate,
        #[case] expected_id: &str,
    ) {
        let period = calendar.period_for_day(day).unwrap();
        assert_eq!(period.tariff_id().0.as_ref(), expected_id);
        assert!(period.contains(day));
    }

    #[rstest]
    fn test_period_for_day_outside_span(calendar: TariffCalendar) {
        // One day before the first period and one day after the last
        assert_error!(
            calendar.period_for_day(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            "No period found for 31-12-2025"
        );
        assert_error!(
            calendar.period_for_day(date(3, 1)),
            "No period found for 01-03-2026"
        );
    }

    #[rstest]
    fn test_read_calendar(grid: PriceGrid) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join(CALENDAR_FILE_NAME)).unwrap();
        writeln!(
            file,
            "id;date_debut;date_fin\n\
             basse;01-01-2026;31/01/2026\n\
             haute;01.02.2026;28-02-2026"
        )
        .unwrap();

        let calendar = read_calendar(dir.path(), &grid).unwrap();
        assert_eq!(calendar.periods().len(), 2);
        assert_eq!(calendar.periods()[1].start(), date(2, 1));
    }

    #[rstest]
    fn test_read_calendar_unknown_tariff(grid: PriceGrid) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join(CALENDAR_FILE_NAME)).unwrap();
        writeln!(file, "id;date_debut;date_fin\nnulle;01-01-2026;31-01-2026").unwrap();

        assert!(
            read_calendar(dir.path(), &grid)
                .unwrap_err()
                .chain()
                .any(|e| e.to_string() == "Unknown tariff 'nulle'")
        );
    }
}

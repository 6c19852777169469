//! Fixtures for tests
use crate::calendar::TariffCalendar;
use crate::grid::PriceGrid;
use crate::period::Period;
use crate::tariff::Tariff;
use chrono::NaiveDate;
use rstest::fixture;
use rust_decimal_macros::dec;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Shorthand for building a [`Period`] in tests
pub fn period(start: NaiveDate, end: NaiveDate, tariff_id: &str) -> Period {
    Period::new(start, end, tariff_id.into()).unwrap()
}

/// A grid with a low-season and a high-season tariff
#[fixture]
pub fn grid() -> PriceGrid {
    PriceGrid::new([
        (
            "basse".into(),
            Tariff {
                weekday_price: dec!(80),
                weekend_price: dec!(95.50),
            },
        ),
        (
            "haute".into(),
            Tariff {
                weekday_price: dec!(100),
                weekend_price: dec!(150),
            },
        ),
    ])
    .unwrap()
}

/// A calendar covering January (low season) and February (high season) 2026
#[fixture]
pub fn calendar() -> TariffCalendar {
    let date = |month, day| NaiveDate::from_ymd_opt(2026, month, day).unwrap();
    TariffCalendar::new(vec![
        period(date(1, 1), date(1, 31), "basse"),
        period(date(2, 1), date(2, 28), "haute"),
    ])
    .unwrap()
}

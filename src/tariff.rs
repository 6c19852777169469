//! A tariff is a named pair of nightly prices, one for weekdays and one for
//! weekends.
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

/// The identifier of a tariff, as referenced by calendar periods.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TariffId(
    /// The identifier string
    pub Rc<str>,
);

impl Borrow<str> for TariffId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TariffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TariffId {
    fn from(s: &str) -> Self {
        TariffId(Rc::from(s))
    }
}

impl From<String> for TariffId {
    fn from(s: String) -> Self {
        TariffId(Rc::from(s))
    }
}

/// Nightly prices for one pricing tier.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tariff {
    /// The price of a Monday-to-Friday night
    pub weekday_price: Decimal,
    /// The price of a Saturday or Sunday night
    pub weekend_price: Decimal,
}

impl Tariff {
    /// The nightly price applicable on `day`.
    ///
    /// Saturday and Sunday nights are charged at the weekend price, all other
    /// nights at the weekday price.
    pub fn price_for_day(&self, day: NaiveDate) -> Decimal {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            self.weekend_price
        } else {
            self.weekday_price
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn tariff() -> Tariff {
        Tariff {
            weekday_price: dec!(100),
            weekend_price: dec!(150),
        }
    }

    #[rstest]
    #[case(2, dec!(100))] // Monday
    #[case(3, dec!(100))]
    #[case(4, dec!(100))]
    #[case(5, dec!(100))]
    #[case(6, dec!(100))] // Friday
    #[case(7, dec!(150))] // Saturday
    #[case(8, dec!(150))] // Sunday
    fn test_price_for_day(#[case] day: u32, #[case] expected: Decimal) {
        // 2026-02-02 is a Monday
        let date = NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
        assert_eq!(tariff().price_for_day(date), expected);
    }
}

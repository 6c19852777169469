//! Pricing engine for a seasonal rental property.
//!
//! Prices are driven by two semicolon-delimited CSV files: a price grid giving
//! the weekday/weekend nightly price of each tariff, and a calendar of
//! contiguous periods, each tagged with a tariff. The crate exposes the
//! computation through a CLI and a small HTTP API.
#![warn(missing_docs)]
pub mod api;
pub mod calendar;
pub mod cli;
pub mod date;
pub mod engine;
pub mod grid;
pub mod input;
pub mod log;
pub mod output;
pub mod period;
pub mod table;
pub mod tariff;

#[cfg(test)]
mod fixture;

//! The command line interface for the pricing tool.
use crate::api::{self, ApiConfig};
use crate::calendar::read_calendar;
use crate::date::{eve_of, format_date, parse_date};
use crate::engine::Calculator;
use crate::grid::read_price_grid;
use crate::log;
use crate::output::write_summary_csv;
use crate::table::{Platform, SummaryTable};
use ::log::info;
use anyhow::{Context, Result, ensure};
use chrono::{Days, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// The minimum number of nights of a stay
const MIN_NIGHTS: i64 = 2;

/// The file exported by the `tableau` command
const TABLEAU_EXPORT_FILE_NAME: &str = "tableau_tarifs_plage.csv";

/// The command line interface for the pricing tool.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Directory containing prix.csv and periode.csv
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,
}

/// Options describing the stay to price.
///
/// Dates not given on the command line are prompted for interactively. The
/// departure date can also be given as a night count.
#[derive(Args, Default)]
struct StayOpts {
    /// Arrival date (DD-MM-YYYY)
    #[arg(long, value_parser = parse_date_arg)]
    date_debut: Option<NaiveDate>,
    /// Departure date (DD-MM-YYYY)
    #[arg(long, value_parser = parse_date_arg, conflicts_with = "nuitees")]
    date_fin: Option<NaiveDate>,
    /// Number of nights, as an alternative to --date-fin
    #[arg(long)]
    nuitees: Option<u32>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the per-night price detail of a stay.
    Detail {
        /// The stay to price.
        #[command(flatten)]
        stay: StayOpts,
    },
    /// Print and export the per-period summary table for a stay.
    Tableau {
        /// The stay to price.
        #[command(flatten)]
        stay: StayOpts,
        /// Platform whose commission to include in the prices.
        #[arg(long, value_enum, ignore_case = true)]
        plateforme: Option<Platform>,
    },
    /// Start the HTTP API.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Directory where generated CSV files are written.
        #[arg(long, default_value = "results")]
        results_dir: PathBuf,
    },
}

/// Parse CLI arguments and run the requested command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    log::init().context("Failed to initialise logging.")?;

    match cli.command {
        // No command behaves like `detail` with interactive dates
        None => handle_detail_command(&cli.data_dir, &StayOpts::default()),
        Some(Commands::Detail { stay }) => handle_detail_command(&cli.data_dir, &stay),
        Some(Commands::Tableau { stay, plateforme }) => {
            handle_tableau_command(&cli.data_dir, &stay, plateforme)
        }
        Some(Commands::Serve { port, results_dir }) => {
            let config = ApiConfig {
                data_dir: cli.data_dir,
                results_dir,
            };
            actix_web::rt::System::new().block_on(api::serve(config, port))
        }
    }
}

/// Handle the `detail` command.
fn handle_detail_command(data_dir: &Path, stay: &StayOpts) -> Result<()> {
    let (arrival, departure) = resolve_stay(stay)?;

    let grid = read_price_grid(data_dir)?;
    let calendar = read_calendar(data_dir, &grid)?;
    let calculator = Calculator::new(&calendar, &grid);

    // Nights run from arrival to the eve of departure
    let detail = calculator.compute_range(arrival, eve_of(departure)?)?;

    println!("\nDétail par nuitée :");
    for (day, price) in &detail.nights {
        println!("{} : {:.2} €", format_date(*day), price);
    }
    println!("\nPrix total : {:.2} €", detail.total);
    println!(
        "Prix moyen par nuit : {:.2} € ({} nuitées)",
        detail.mean(),
        detail.nights.len()
    );

    Ok(())
}

/// Handle the `tableau` command.
fn handle_tableau_command(
    data_dir: &Path,
    stay: &StayOpts,
    platform: Option<Platform>,
) -> Result<()> {
    let (arrival, departure) = resolve_stay(stay)?;

    let grid = read_price_grid(data_dir)?;
    let calendar = read_calendar(data_dir, &grid)?;
    let calculator = Calculator::new(&calendar, &grid);
    let table = SummaryTable::new(&calculator, platform);

    let rows = table.build_range(arrival, eve_of(departure)?)?;
    table.render(&rows);

    write_summary_csv(Path::new(TABLEAU_EXPORT_FILE_NAME), &rows)?;
    info!("Tableau exporté dans '{TABLEAU_EXPORT_FILE_NAME}'");

    Ok(())
}

/// Resolve the arrival and departure dates of a stay, prompting for any
/// missing date and enforcing the minimum stay.
fn resolve_stay(stay: &StayOpts) -> Result<(NaiveDate, NaiveDate)> {
    let arrival = match stay.date_debut {
        Some(date) => date,
        None => prompt_date("Date d'arrivée (JJ-MM-AAAA) : ")?,
    };
    let departure = match (stay.date_fin, stay.nuitees) {
        (Some(date), _) => date,
        (None, Some(nights)) => arrival + Days::new(u64::from(nights)),
        (None, None) => prompt_date("Date de départ (JJ-MM-AAAA) : ")?,
    };

    validate_stay(arrival, departure)?;

    Ok((arrival, departure))
}

/// Check that a stay is chronological and long enough.
fn validate_stay(arrival: NaiveDate, departure: NaiveDate) -> Result<()> {
    ensure!(
        departure > arrival,
        "Departure date {} must be after arrival date {}",
        format_date(departure),
        format_date(arrival)
    );

    let nights = (departure - arrival).num_days();
    ensure!(
        nights >= MIN_NIGHTS,
        "A stay must be at least {MIN_NIGHTS} nights ({nights} requested)"
    );

    Ok(())
}

/// Ask for a date on stdin until a parseable one is entered.
fn prompt_date(message: &str) -> Result<NaiveDate> {
    let stdin = std::io::stdin();
    loop {
        print!("{message}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line)?;
        ensure!(read > 0, "No input available");

        match parse_date(&line) {
            Ok(date) => return Ok(date),
            Err(err) => println!("{err}"),
        }
    }
}

/// Parse a date argument from the command line.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|err| err.to_string())
}

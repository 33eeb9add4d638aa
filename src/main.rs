//! Flowly Predict - command line shell
//!
//! Collects the scalar inputs from argv, runs one prediction and prints the
//! result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use flowly_predict::constants::{APP_NAME, APP_VERSION};
use flowly_predict::logic::features::clock::validate_clock_time;
use flowly_predict::logic::features::layout::LayoutInfo;
use flowly_predict::logic::model::DomainReadiness;
use flowly_predict::{
    AttendanceObservation, Domain, PredictError, Predictor, PredictorConfig, StockObservation,
};

#[derive(Parser, Debug)]
#[command(name = "flowly-predict")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model root (overrides FLOWLY_MODEL_ROOT)
    #[arg(long, global = true)]
    model_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Predict whether an employee arrives late
    Attendance(AttendanceArgs),

    /// Predict the stock status of an item
    Stock(StockArgs),

    /// List weekdays and weather labels known to the attendance model
    Options,

    /// Load both models, report readiness and feature layouts
    Status,
}

#[derive(Args, Debug)]
struct AttendanceArgs {
    /// Weekday name (Monday .. Sunday)
    #[arg(long)]
    weekday: String,

    /// Scheduled time, HH:MM
    #[arg(long)]
    scheduled: String,

    /// Arrival time, HH:MM (defaults to the scheduled time)
    #[arg(long)]
    arrival: Option<String>,

    /// Weather label (Clear, Clouds, Rain, Thunderstorm)
    #[arg(long)]
    weather: String,
}

#[derive(Args, Debug)]
struct StockArgs {
    /// Item name
    #[arg(long)]
    item: String,

    #[arg(long)]
    opening: u32,

    #[arg(long, default_value = "0")]
    inbound: u32,

    #[arg(long, default_value = "0")]
    outbound: u32,

    #[arg(long, default_value = "Ekor")]
    unit: String,

    /// Month 1-12
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    month: u8,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let config = match &cli.model_root {
        Some(root) => PredictorConfig::from_env_under(root),
        None => PredictorConfig::from_env(),
    };
    let predictor = Predictor::new(config);

    let result = match cli.command {
        Commands::Attendance(args) => run_attendance(&predictor, args),
        Commands::Stock(args) => {
            let observation = StockObservation {
                item_name: args.item,
                opening_stock: args.opening,
                inbound: args.inbound,
                outbound: args.outbound,
                unit: args.unit,
                month: args.month,
                recent_periods: Vec::new(),
            };
            predictor.predict_stock(&observation).map_err(CliError::from).and_then(print_json)
        }
        Commands::Options => predictor
            .attendance_options()
            .map_err(CliError::from)
            .and_then(print_json),
        Commands::Status => print_json(Status {
            models: predictor.warm_up(),
            layouts: Domain::ALL.iter().map(|&d| LayoutInfo::current(d)).collect(),
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_attendance(predictor: &Predictor, args: AttendanceArgs) -> Result<(), CliError> {
    // Reject what the core would silently substitute
    validate_clock_time(&args.scheduled).map_err(|e| CliError::Input(e.to_string()))?;
    if let Some(arrival) = &args.arrival {
        validate_clock_time(arrival).map_err(|e| CliError::Input(e.to_string()))?;
    }

    let mut observation = AttendanceObservation::new(args.weekday, args.scheduled, args.weather);
    observation.arrival_time = args.arrival;

    let prediction = predictor.predict_attendance(&observation)?;
    print_json(prediction)
}

/// Output of `status`
#[derive(Serialize)]
struct Status {
    models: Vec<DomainReadiness>,
    layouts: Vec<LayoutInfo>,
}

fn print_json<T: Serialize>(value: T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("failed to write output: {0}")]
    Output(String),
}

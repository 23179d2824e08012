//! solar-sim entry point: CLI wiring and config-driven plant simulation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use solar_sim::config::{ConfigError, ScenarioConfig};
use solar_sim::io::export::export_csv;
use solar_sim::timeseries::{TimeSeries, generate_timeseries};

/// Clear-sky solar PV plant simulator.
///
/// If no --scenario or --preset is given, the nyc preset is used.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Load scenario from TOML config file
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,
    /// Use a built-in preset (nyc, sydney, equator)
    #[arg(long)]
    preset: Option<String>,
    /// Override the first simulated instant (YYYY-MM-DD[THH:MM[:SS]])
    #[arg(long)]
    start: Option<String>,
    /// Override the last simulated instant
    #[arg(long)]
    end: Option<String>,
    /// Override the sampling frequency ("1h", "15min", "1D", ...)
    #[arg(long)]
    freq: Option<String>,
    /// Print only the first N rows
    #[arg(long, value_name = "N")]
    head: Option<usize>,
    /// Export the series to CSV
    #[arg(long, value_name = "PATH")]
    csv_out: Option<PathBuf>,
    /// Start REST API server after simulation
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,
    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn fail(errors: &[ConfigError]) -> ! {
    for e in errors {
        eprintln!("{e}");
    }
    process::exit(1);
}

/// Loads the scenario: --scenario takes priority, then --preset, then nyc.
fn load_scenario(args: &Args) -> Result<ScenarioConfig, ConfigError> {
    let mut scenario = match (&args.scenario, &args.preset) {
        (Some(path), _) => ScenarioConfig::from_toml_file(path)?,
        (None, Some(name)) => ScenarioConfig::from_preset(name)?,
        (None, None) => ScenarioConfig::nyc(),
    };

    let sim = &mut scenario.simulation;
    if let Some(start) = &args.start {
        sim.start.clone_from(start);
    }
    if let Some(end) = &args.end {
        sim.end.clone_from(end);
    }
    if let Some(freq) = &args.freq {
        sim.freq.clone_from(freq);
    }
    Ok(scenario)
}

fn print_series(series: &TimeSeries, head: Option<usize>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    writeln!(out, "{:<19}  {:>12}", "datetime", "power_kw")?;
    let rows = head.map_or_else(|| series.rows(), |n| series.head(n));
    for row in rows {
        writeln!(out, "{row}")?;
    }
    writeln!(out, "\n{}", series.summary())?;
    out.flush()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let scenario = load_scenario(&args).unwrap_or_else(|e| fail(&[e]));
    let errors = scenario.validate();
    if !errors.is_empty() {
        fail(&errors);
    }
    let (start, end) = scenario.window().unwrap_or_else(|e| fail(&[e]));

    let plant = scenario.plant();
    let series = generate_timeseries(&plant, start, end, &scenario.simulation.freq)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });

    if let Err(e) = print_series(&series, args.head) {
        eprintln!("error: failed to write output: {e}");
        process::exit(1);
    }

    if let Some(path) = &args.csv_out {
        if let Err(e) = export_csv(&series, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Series written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let sim = scenario.simulation;
        let state = Arc::new(solar_sim::api::AppState {
            plant,
            start: sim.start,
            end: sim.end,
            freq: sim.freq,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(solar_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed on {addr}: {e}");
            process::exit(1);
        }
    }
}

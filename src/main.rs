use clap::{Parser, Subcommand};
use fars::{map_state, summarize_years, write_summary, BaseMap, DataDir};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fars")]
#[command(about = "Summarize and map FARS fatal accident files", long_about = None)]
struct Cli {
    /// Directory holding the accident_<year>.csv.bz2 files
    #[arg(short, long, env = "FARS_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of accidents per month for each year, as CSV
    Summarize {
        #[arg(value_name = "YEAR", required = true)]
        years: Vec<String>,
    },
    /// Plot one state's accidents for one year as an SVG map
    Map {
        state: String,
        year: String,

        /// CSV of state outlines (group,longitude,latitude)
        #[arg(short, long)]
        base_map: Option<PathBuf>,

        /// SVG file to write, defaults to fars_<state>_<year>.svg
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    // Logs go to stderr, stdout is reserved for CSV output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let source = DataDir::new(cli.data_dir);

    match cli.command {
        Commands::Summarize { years } => {
            let summary = summarize_years(&source, &years);
            write_summary(std::io::stdout(), &summary)?;
        }
        Commands::Map {
            state,
            year,
            base_map,
            output,
        } => {
            let base_map = match base_map {
                Some(path) => BaseMap::from_path(path)?,
                None => BaseMap::empty(),
            };
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("fars_{state}_{year}.svg")));
            map_state(&source, state.as_str(), year.as_str(), &base_map, &output)?;
        }
    }
    Ok(())
}

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use raincatch_core::collaborators::google_earth_link;
use raincatch_schemas::{feedback::Feedback, profile::Coordinates};
use std::path::PathBuf;

mod config;
mod workflow;

#[derive(Parser)]
#[command(name = "raincatch", about = "Rooftop rainwater harvesting assessment")]
struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single property profile
    Assess {
        /// YAML file holding one property profile
        #[arg(long)]
        profile: PathBuf,
        /// Seed for placeholder rainfall and groundwater figures
        #[arg(long)]
        seed: Option<u64>,
        /// Years covered by the savings projection
        #[arg(long)]
        years: Option<u32>,
        /// Directory for the result JSON and projection CSV [default: ./data/runs/<timestamp>]
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the record as JSON instead of the summary report
        #[arg(long)]
        json: bool,
    },
    /// Assess every profile in a directory of profile files
    Batch {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Rate the assessment tool
    Feedback {
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Print the Google Earth link for a location
    MapLink {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = config::AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Assess {
            profile,
            seed,
            years,
            output_dir,
            json,
        } => {
            let profile = config::load_profile(&profile)?;
            let regions = config.rainfall_regions()?;
            let mut engine = config.build_engine(seed, regions.clone())?;
            let output_dir = output_dir.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "./data/runs/{}",
                    chrono::Utc::now().format("%Y%m%d_%H%M%S")
                ))
            });
            let options = workflow::AssessOptions {
                output_dir: &output_dir,
                projection_years: years.unwrap_or(config.projection_years),
                regions: &regions,
                json,
            };
            workflow::run_single_assessment(profile, &mut engine, &config, &options)?;
        }
        Commands::Batch { dir, seed } => {
            let profiles = config::load_profiles_from_dir(&dir)?;
            if profiles.is_empty() {
                bail!("No profiles found in {:?}", dir);
            }
            let mut engine = config.build_engine(seed, config.rainfall_regions()?)?;
            workflow::run_batch(profiles, &mut engine, &config)?;
        }
        Commands::Feedback { rating, comments } => {
            workflow::submit_feedback(Feedback { rating, comments }, &config)?;
        }
        Commands::MapLink { lat, lng } => {
            println!(
                "{}",
                google_earth_link(&Coordinates {
                    latitude: lat,
                    longitude: lng,
                })
            );
        }
    }

    Ok(())
}

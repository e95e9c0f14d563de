use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use sprout::cli::commands::{self, InferenceContext, ResultTargets};
use sprout::config::{self, ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use sprout::inference::prompts::LANGUAGES;
use sprout::schedule::SchedulePolicy;

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Sprout - Plant Care Assistant\nIdentify plants, get care guides and diagnoses, and track watering and growth")]
#[command(version)]
struct Cli {
  /// Plant database file
  #[arg(long, global = true, env = "SPROUT_DB")]
  db: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  inference: InferenceArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Args)]
struct InferenceArgs {
  /// API key for the generative model
  #[arg(long, global = true, env = "SPROUT_API_KEY", hide_env_values = true, default_value = "")]
  api_key: String,
  /// Model used for every request
  #[arg(long, global = true, env = "SPROUT_MODEL", default_value = DEFAULT_MODEL)]
  model: String,
  /// Base URL of the inference API
  #[arg(long, global = true, env = "SPROUT_BASE_URL", default_value = DEFAULT_BASE_URL)]
  base_url: String,
  /// Request timeout in seconds
  #[arg(long, global = true, env = "SPROUT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  timeout: u64,
}

/// What to do with a model answer besides printing it
#[derive(Args)]
struct OutputArgs {
  /// Save the result to a text file
  #[arg(long)]
  save: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
  /// Identify a plant from a photo
  Identify {
    /// Photo of the plant
    image: PathBuf,
    /// Also translate the identification into this language
    #[arg(long, value_parser = PossibleValuesParser::new(LANGUAGES))]
    translate: Option<String>,
    /// Track the identified plant under this name
    #[arg(long)]
    track: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Generate a care guide for a plant
  CareGuide {
    /// Plant name (e.g., "Monstera deliciosa")
    plant: String,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Look for diseases or pests in a plant photo
  Diagnose {
    /// Photo of the plant
    image: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Translate text into another language
  Translate {
    /// Target language
    #[arg(short, long, value_parser = PossibleValuesParser::new(LANGUAGES))]
    language: String,
    /// Text to translate
    #[arg(required = true)]
    text: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Manage tracked plants
  #[command(subcommand)]
  Plants(PlantsCommand),
  /// Record a watering for a plant
  Water {
    /// Name of the plant
    plant: String,
    /// Date of the watering (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Record a planned watering instead of a completed one
    #[arg(long)]
    planned: bool,
  },
  /// Generate and query watering schedules
  #[command(subcommand)]
  Schedule(ScheduleCommand),
  /// Record and chart plant growth
  #[command(subcommand)]
  Growth(GrowthCommand),
}

#[derive(Subcommand)]
enum PlantsCommand {
  /// List tracked plants
  List,
  /// Show details of a plant
  Show {
    /// Name of the plant
    name: String,
  },
  /// Add a plant, replacing any plant with the same name
  Add {
    /// Name of the plant
    name: String,
    /// Description or care notes
    info: String,
  },
  /// Stop tracking a plant
  Remove {
    /// Name of the plant
    name: String,
  },
}

#[derive(Subcommand)]
enum ScheduleCommand {
  /// Append a watering window to every plant (or one plant)
  Generate {
    /// Only schedule this plant
    #[arg(long)]
    plant: Option<String>,
    /// First day of the window (defaults to today)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Length of the window in days
    #[arg(long, default_value_t = SchedulePolicy::default().horizon_days)]
    days: u32,
    /// Days between waterings
    #[arg(long, default_value_t = SchedulePolicy::default().interval_days)]
    every: u32,
  },
  /// List plants to water on a date
  Due {
    /// Date to check (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Show the watering events of a plant
  Show {
    /// Name of the plant
    name: String,
  },
}

#[derive(Subcommand)]
enum GrowthCommand {
  /// Record a height measurement
  Add {
    /// Name of the plant
    name: String,
    /// Height in centimetres
    height: u32,
    /// Date of the measurement (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Chart the recorded heights of a plant
  Show {
    /// Name of the plant
    name: String,
  },
}

fn today() -> NaiveDate {
  Local::now().date_naive()
}

#[cfg(not(tarpaulin_include))]
fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("sprout=debug,warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
  };

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

async fn handle(command: Command, context: InferenceContext, database: PathBuf) -> Result<()> {
  let targets = |output: OutputArgs, track: Option<String>| ResultTargets {
    save: output.save,
    track,
    database: Some(database.clone()),
  };

  match command {
    Command::Identify { image, translate, track, output } => {
      commands::identify(&context, &image, translate.as_deref(), &targets(output, track)).await
    }
    Command::CareGuide { plant, output } => commands::care_guide(&context, &plant, &targets(output, None)).await,
    Command::Diagnose { image, output } => commands::diagnose(&context, &image, &targets(output, None)).await,
    Command::Translate { language, text, output } => {
      commands::translate(&context, &language, &text.join(" "), &targets(output, None)).await
    }
    Command::Plants(command) => match command {
      PlantsCommand::List => commands::list_plants(&database),
      PlantsCommand::Show { name } => commands::show_plant(&database, &name),
      PlantsCommand::Add { name, info } => commands::add_plant(&database, &name, &info),
      PlantsCommand::Remove { name } => commands::remove_plant(&database, &name),
    },
    Command::Water { plant, date, planned } => {
      commands::record_watering(&database, &plant, date.unwrap_or_else(today), !planned)
    }
    Command::Schedule(command) => match command {
      ScheduleCommand::Generate { plant, from, days, every } => {
        let policy = SchedulePolicy { horizon_days: days, interval_days: every };
        commands::generate_schedule(&database, from.unwrap_or_else(today), policy, plant.as_deref())
      }
      ScheduleCommand::Due { date } => commands::due_on(&database, date.unwrap_or_else(today)),
      ScheduleCommand::Show { name } => commands::show_schedule(&database, &name),
    },
    Command::Growth(command) => match command {
      GrowthCommand::Add { name, height, date } => {
        commands::add_growth(&database, &name, date.unwrap_or_else(today), height)
      }
      GrowthCommand::Show { name } => commands::show_growth(&database, &name),
    },
  }
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let database = cli.db.unwrap_or_else(config::default_database_path);
  let context = InferenceContext {
    config: ClientConfig {
      base_url: cli.inference.base_url,
      api_key: cli.inference.api_key,
      timeout_secs: cli.inference.timeout,
    },
    model: cli.inference.model,
  };

  handle(cli.command, context, database).await
}

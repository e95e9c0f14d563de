use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Handle;
use chrono::NaiveDate;
use colored::*;

use crate::cli::display;
use crate::config::ClientConfig;
use crate::export::save_text;
use crate::growth::GrowthSeries;
use crate::inference::{prompts, CallHandle, CallOrchestrator, GeminiClient, Slot};
use crate::schedule::{self, SchedulePolicy};
use crate::store::PlantStore;

/// Everything an inference command needs besides its own arguments
pub struct InferenceContext {
  pub config: ClientConfig,
  pub model: String,
}

impl InferenceContext {
  fn orchestrator(&self) -> Result<CallOrchestrator> {
    let client = GeminiClient::new(self.config.clone())?;
    Ok(CallOrchestrator::new(client, Handle::current()))
  }
}

/// What to do with a successful answer besides printing it
#[derive(Default)]
pub struct ResultTargets {
  /// Write the answer to this file
  pub save: Option<PathBuf>,
  /// Track the answer as a plant under this name
  pub track: Option<String>,
  pub database: Option<PathBuf>,
}

pub async fn identify(
  context: &InferenceContext,
  image_path: &Path,
  translate_to: Option<&str>,
  targets: &ResultTargets,
) -> Result<()> {
  let image = read_image(image_path)?;
  let orchestrator = context.orchestrator()?;

  let job = prompts::identify_job(image, &context.model)?;
  let text = await_text(orchestrator.submit(Slot::Identify, job)).await?;
  display::print_result("Identification", &text);

  // saved and tracked text is always the identification itself
  finish(&text, targets)?;

  if let Some(language) = translate_to {
    let job = prompts::translate_job(language, &text, &context.model)?;
    let translated = await_text(orchestrator.submit(Slot::Translate, job)).await?;
    println!();
    display::print_result(&format!("Translation ({language})"), &translated);
  }

  Ok(())
}

pub async fn care_guide(context: &InferenceContext, plant_name: &str, targets: &ResultTargets) -> Result<()> {
  let job = prompts::care_guide_job(plant_name, &context.model)?;
  let orchestrator = context.orchestrator()?;

  let text = await_text(orchestrator.submit(Slot::CareGuide, job)).await?;
  display::print_result(&format!("Care guide for {plant_name}"), &text);

  finish(&text, targets)
}

pub async fn diagnose(context: &InferenceContext, image_path: &Path, targets: &ResultTargets) -> Result<()> {
  let image = read_image(image_path)?;
  let orchestrator = context.orchestrator()?;

  let job = prompts::disease_job(image, &context.model)?;
  let text = await_text(orchestrator.submit(Slot::Disease, job)).await?;
  display::print_result("Diagnosis", &text);

  finish(&text, targets)
}

pub async fn translate(context: &InferenceContext, language: &str, text: &str, targets: &ResultTargets) -> Result<()> {
  let job = prompts::translate_job(language, text, &context.model)?;
  let orchestrator = context.orchestrator()?;

  let translated = await_text(orchestrator.submit(Slot::Translate, job)).await?;
  display::print_result(&format!("Translation ({language})"), &translated);

  finish(&translated, targets)
}

pub fn list_plants(database: &Path) -> Result<()> {
  let store = PlantStore::open(database)?;
  let names = store.names();

  if names.is_empty() {
    println!("No plants tracked yet.");
    return Ok(());
  }

  println!("{} Tracked plants:", "🪴".green());
  for name in names {
    let info = store.info(&name).unwrap_or_default();
    let summary = info.lines().next().unwrap_or_default();
    println!("  {} {}", name.cyan().bold(), summary.dimmed());
  }

  Ok(())
}

pub fn show_plant(database: &Path, name: &str) -> Result<()> {
  let store = PlantStore::open(database)?;
  let record = store.get(name).ok_or_else(|| anyhow!("Plant '{name}' not found"))?;
  display::print_plant(name, &record);
  Ok(())
}

pub fn add_plant(database: &Path, name: &str, info: &str) -> Result<()> {
  let store = PlantStore::open(database)?;
  let replaced = store.contains(name);
  store.add_or_update(name, info)?;

  if replaced {
    println!("{} Replaced plant {}", "✓".green(), name.cyan());
  } else {
    println!("{} Added plant {}", "✓".green(), name.cyan());
  }
  Ok(())
}

pub fn remove_plant(database: &Path, name: &str) -> Result<()> {
  let store = PlantStore::open(database)?;

  if store.remove(name)? {
    println!("{} Removed plant {}", "✓".green(), name.cyan());
  } else {
    println!("Plant {} is not tracked; nothing removed.", name.yellow());
  }
  Ok(())
}

pub fn record_watering(database: &Path, name: &str, date: NaiveDate, watered: bool) -> Result<()> {
  let store = PlantStore::open(database)?;
  store.add_watering_event(name, date, watered)?;

  let verb = if watered { "Watered" } else { "Planned watering for" };
  println!("{} {verb} {} on {}", "💧".blue(), name.cyan(), date.to_string().yellow());
  Ok(())
}

pub fn generate_schedule(database: &Path, today: NaiveDate, policy: SchedulePolicy, plant: Option<&str>) -> Result<()> {
  let store = PlantStore::open(database)?;

  match plant {
    Some(name) => {
      let events = schedule::apply_to_plant(&store, name, today, policy)?;
      println!("{} Added {} watering events for {}", "✓".green(), events.to_string().yellow(), name.cyan());
    }
    None => {
      let plants = schedule::apply_to_all(&store, today, policy)?;
      if plants == 0 {
        println!("No plants tracked yet.");
      } else {
        println!(
          "{} Scheduled watering every {} days for the next {} days on {} plants",
          "✓".green(),
          policy.interval_days,
          policy.horizon_days,
          plants.to_string().yellow()
        );
      }
    }
  }
  Ok(())
}

pub fn due_on(database: &Path, date: NaiveDate) -> Result<()> {
  let store = PlantStore::open(database)?;
  let due = store.plants_due_on(date);

  if due.is_empty() {
    println!("Nothing to water on {}.", date.to_string().yellow());
    return Ok(());
  }

  println!("{} Watering schedule for {}:", "💧".blue(), date.to_string().yellow());
  for name in due {
    println!("  {}: Water today", name.cyan());
  }
  Ok(())
}

pub fn show_schedule(database: &Path, name: &str) -> Result<()> {
  let store = PlantStore::open(database)?;
  let record = store.get(name).ok_or_else(|| anyhow!("Plant '{name}' not found"))?;
  display::print_schedule(name, record.watering_schedule());
  Ok(())
}

pub fn add_growth(database: &Path, name: &str, date: NaiveDate, height: u32) -> Result<()> {
  let store = PlantStore::open(database)?;
  GrowthSeries::new(&store).append(name, date, height)?;

  println!("{} Recorded {} cm for {} on {}", "📏".green(), height.to_string().yellow(), name.cyan(), date);
  Ok(())
}

pub fn show_growth(database: &Path, name: &str) -> Result<()> {
  let store = PlantStore::open(database)?;
  let points = GrowthSeries::new(&store).chart_points(name)?;
  display::print_chart(name, &points);
  Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
  fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))
}

async fn await_text(handle: CallHandle) -> Result<String> {
  Ok(handle.outcome().await.into_result()?)
}

fn finish(text: &str, targets: &ResultTargets) -> Result<()> {
  if let Some(path) = &targets.save {
    save_text(path, text)?;
    println!("{} Results saved to {}", "✓".green(), path.display());
  }

  if let Some(name) = &targets.track {
    let database = targets.database.as_deref().ok_or_else(|| anyhow!("No plant database configured"))?;
    add_plant(database, name, text)?;
  }

  Ok(())
}

//! Display formatting utilities for CLI output

use colored::*;

use crate::growth::ChartPoint;
use crate::store::{PlantRecord, WateringEvent};

const CHART_WIDTH: usize = 40;

/// Print a model answer under a heading
pub fn print_result(title: &str, text: &str) {
  println!("{} {}", "🌿".green(), title.green().bold());
  println!("{}", "─".repeat(title.chars().count() + 3).dimmed());
  println!("{}", text.trim_end());
}

pub fn print_plant(name: &str, record: &PlantRecord) {
  println!("{} {}", "🪴".green(), name.cyan().bold());
  println!("{}", record.info().trim_end());
  println!();
  println!(
    "  {} watering events, {} growth samples",
    record.watering_schedule().len().to_string().yellow(),
    record.growth_data().len().to_string().yellow()
  );
}

pub fn print_schedule(name: &str, events: &[WateringEvent]) {
  if events.is_empty() {
    println!("No watering events for {}.", name.cyan());
    return;
  }

  println!("{} Watering schedule for {}:", "💧".blue(), name.cyan());
  for event in events {
    let line = format_event(event);
    if event.watered {
      println!("  {}", line.green());
    } else {
      println!("  {line}");
    }
  }
}

pub fn print_chart(name: &str, points: &[ChartPoint]) {
  if points.is_empty() {
    println!("No growth data for {}.", name.cyan());
    return;
  }

  println!("{} Growth of {} (Julian day, cm):", "📈".green(), name.cyan());
  for line in chart_lines(points, CHART_WIDTH) {
    println!("  {line}");
  }
}

pub fn format_event(event: &WateringEvent) -> String {
  let state = if event.watered { "watered" } else { "planned" };
  format!("{}  {state}", event.date)
}

/// One bar per point, scaled so the tallest sample spans `width` cells
pub fn chart_lines(points: &[ChartPoint], width: usize) -> Vec<String> {
  let tallest = points.iter().map(|point| point.height).max().unwrap_or(0);

  points
    .iter()
    .map(|point| {
      let bar = "█".repeat(bar_length(point.height, tallest, width));
      format!("{} {bar} {}", point.julian_day, point.height)
    })
    .collect()
}

fn bar_length(height: u32, tallest: u32, width: usize) -> usize {
  if height == 0 || tallest == 0 {
    return 0;
  }
  let scaled = (u64::from(height) * width as u64) / u64::from(tallest);
  (scaled as usize).max(1)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_event() {
    let date = "2024-01-04".parse().unwrap();
    assert_eq!(format_event(&WateringEvent::planned(date)), "2024-01-04  planned");
    assert_eq!(format_event(&WateringEvent::watered(date)), "2024-01-04  watered");
  }

  #[test]
  fn test_bar_length_scales_to_tallest() {
    assert_eq!(bar_length(20, 20, 40), 40);
    assert_eq!(bar_length(10, 20, 40), 20);
    assert_eq!(bar_length(1, 1000, 40), 1);
    assert_eq!(bar_length(0, 20, 40), 0);
  }

  #[test]
  fn test_chart_lines() {
    let points = [ChartPoint { julian_day: 2_460_311, height: 5 }, ChartPoint { julian_day: 2_460_318, height: 10 }];

    let lines = chart_lines(&points, 4);

    assert_eq!(lines, vec!["2460311 ██ 5".to_string(), "2460318 ████ 10".to_string()]);
  }
}

//! Watering calendar generation and due-date queries

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::error::{Result, SproutError};
use crate::store::{PlantStore, WateringEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePolicy {
  /// Length of the generated window, starting today
  pub horizon_days: u32,
  /// Days between two waterings
  pub interval_days: u32,
}

impl Default for SchedulePolicy {
  fn default() -> Self {
    Self { horizon_days: 30, interval_days: 3 }
  }
}

/// Planned (unwatered) events on `today + k * interval_days` for every such
/// day inside `[today, today + horizon_days)`.
pub fn generate(today: NaiveDate, horizon_days: u32, interval_days: u32) -> Result<Vec<WateringEvent>> {
  if interval_days == 0 {
    return Err(SproutError::validation("watering interval must be at least one day"));
  }

  Ok(
    (0..horizon_days)
      .step_by(interval_days as usize)
      .map_while(|offset| today.checked_add_days(Days::new(u64::from(offset))))
      .map(WateringEvent::planned)
      .collect(),
  )
}

pub fn generate_with(today: NaiveDate, policy: SchedulePolicy) -> Result<Vec<WateringEvent>> {
  generate(today, policy.horizon_days, policy.interval_days)
}

/// Watering is due iff the plant has an event on exactly `date`
pub fn is_due(store: &PlantStore, name: &str, date: NaiveDate) -> bool {
  store.has_watering_on(name, date)
}

/// Append a fresh window to one plant. Earlier windows are kept, so
/// overlapping dates accumulate.
pub fn apply_to_plant(store: &PlantStore, name: &str, today: NaiveDate, policy: SchedulePolicy) -> Result<usize> {
  let events = generate_with(today, policy)?;
  store.apply_schedule(name, &events)?;
  debug!(name, events = events.len(), "appended watering schedule");
  Ok(events.len())
}

/// Append a fresh window to every plant; returns the number of plants touched
pub fn apply_to_all(store: &PlantStore, today: NaiveDate, policy: SchedulePolicy) -> Result<usize> {
  let events = generate_with(today, policy)?;
  let plants = store.apply_schedule_to_all(&events)?;
  debug!(plants, events = events.len(), "appended watering schedule to all plants");
  Ok(plants)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn test_default_policy_window() {
    let events = generate_with(date("2024-01-01"), SchedulePolicy::default()).unwrap();

    let dates: Vec<String> = events.iter().map(|event| event.date.to_string()).collect();
    assert_eq!(
      dates,
      vec![
        "2024-01-01",
        "2024-01-04",
        "2024-01-07",
        "2024-01-10",
        "2024-01-13",
        "2024-01-16",
        "2024-01-19",
        "2024-01-22",
        "2024-01-25",
        "2024-01-28"
      ]
    );
    assert!(events.iter().all(|event| !event.watered));
  }

  #[test]
  fn test_window_crosses_month_end() {
    let events = generate(date("2024-02-27"), 5, 2).unwrap();
    let dates: Vec<NaiveDate> = events.iter().map(|event| event.date).collect();
    assert_eq!(dates, vec![date("2024-02-27"), date("2024-02-29"), date("2024-03-02")]);
  }

  #[test]
  fn test_zero_horizon_is_empty() {
    assert!(generate(date("2024-01-01"), 0, 3).unwrap().is_empty());
  }

  #[test]
  fn test_daily_interval() {
    assert_eq!(generate(date("2024-01-01"), 7, 1).unwrap().len(), 7);
  }

  #[test]
  fn test_zero_interval_is_rejected() {
    assert!(matches!(generate(date("2024-01-01"), 30, 0), Err(SproutError::Validation { .. })));
  }

  #[test]
  fn test_window_stops_at_calendar_end() {
    let events = generate(NaiveDate::MAX, 10, 1).unwrap();
    assert_eq!(events.len(), 1);
  }

  #[test]
  fn test_repeated_application_accumulates() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let store = PlantStore::open(temp_dir.path().join("plants.json"))?;
    store.add_or_update("Fern", "Boston fern")?;
    store.add_or_update("Aloe", "Succulent")?;

    assert_eq!(apply_to_all(&store, date("2024-01-01"), SchedulePolicy::default())?, 2);
    assert_eq!(apply_to_all(&store, date("2024-01-02"), SchedulePolicy::default())?, 2);

    let fern = store.get("Fern").unwrap();
    assert_eq!(fern.watering_schedule().len(), 20);
    assert!(is_due(&store, "Fern", date("2024-01-04")));
    assert!(is_due(&store, "Fern", date("2024-01-05")));
    assert!(!is_due(&store, "Fern", date("2024-01-03")));
    Ok(())
  }

  #[test]
  fn test_apply_to_unknown_plant() {
    let temp_dir = TempDir::new().unwrap();
    let store = PlantStore::open(temp_dir.path().join("plants.json")).unwrap();

    let result = apply_to_plant(&store, "Ghost", date("2024-01-01"), SchedulePolicy::default());
    assert!(matches!(result, Err(SproutError::NotFound { .. })));
  }
}

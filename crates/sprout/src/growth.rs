//! Per-plant height history

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, SproutError};
use crate::store::{GrowthSample, PlantStore};

/// Julian day number of 0001-01-01 minus one; `num_days_from_ce` counts that day as 1
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// One point of a growth chart, x-axis in Julian day numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
  pub julian_day: i64,
  pub height: u32,
}

impl From<&GrowthSample> for ChartPoint {
  fn from(sample: &GrowthSample) -> Self {
    Self { julian_day: julian_day(sample.date), height: sample.height }
  }
}

pub fn julian_day(date: NaiveDate) -> i64 {
  i64::from(date.num_days_from_ce()) + JULIAN_DAY_OFFSET
}

/// Read/append view over the growth data held by a [`PlantStore`]
pub struct GrowthSeries<'a> {
  store: &'a PlantStore,
}

impl<'a> GrowthSeries<'a> {
  pub fn new(store: &'a PlantStore) -> Self {
    Self { store }
  }

  pub fn append(&self, name: &str, date: NaiveDate, height: u32) -> Result<()> {
    self.store.add_growth_sample(name, date, height)
  }

  /// Samples in the order they were recorded
  pub fn series_for(&self, name: &str) -> Result<Vec<GrowthSample>> {
    self
      .store
      .get(name)
      .map(|record| record.growth_data().to_vec())
      .ok_or_else(|| SproutError::not_found(name))
  }

  /// Chronologically sorted points; samples sharing a date keep their recorded order
  pub fn chart_points(&self, name: &str) -> Result<Vec<ChartPoint>> {
    let mut samples = self.series_for(name)?;
    samples.sort_by_key(|sample| sample.date);
    Ok(samples.iter().map(ChartPoint::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  fn store_with_fern(temp_dir: &TempDir) -> PlantStore {
    let store = PlantStore::open(temp_dir.path().join("plants.json")).unwrap();
    store.add_or_update("Fern", "Boston fern").unwrap();
    store
  }

  #[test]
  fn test_julian_day_reference_dates() {
    assert_eq!(julian_day(date("2000-01-01")), 2_451_545);
    assert_eq!(julian_day(date("2024-01-01")), 2_460_311);
  }

  #[test]
  fn test_series_keeps_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with_fern(&temp_dir);
    let growth = GrowthSeries::new(&store);

    growth.append("Fern", date("2024-03-10"), 14).unwrap();
    growth.append("Fern", date("2024-03-01"), 12).unwrap();

    let heights: Vec<u32> = growth.series_for("Fern").unwrap().iter().map(|s| s.height).collect();
    assert_eq!(heights, vec![14, 12]);
  }

  #[test]
  fn test_chart_points_sorted_and_stable() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with_fern(&temp_dir);
    let growth = GrowthSeries::new(&store);

    growth.append("Fern", date("2024-03-10"), 14).unwrap();
    growth.append("Fern", date("2024-03-01"), 12).unwrap();
    growth.append("Fern", date("2024-03-10"), 15).unwrap();

    let points = growth.chart_points("Fern").unwrap();
    let heights: Vec<u32> = points.iter().map(|point| point.height).collect();
    assert_eq!(heights, vec![12, 14, 15]);
    assert_eq!(points[1].julian_day - points[0].julian_day, 9);
  }

  #[test]
  fn test_unknown_plant_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with_fern(&temp_dir);
    let growth = GrowthSeries::new(&store);

    assert!(matches!(growth.series_for("Ghost"), Err(SproutError::NotFound { .. })));
    assert!(matches!(growth.append("Ghost", date("2024-03-01"), 3), Err(SproutError::NotFound { .. })));
  }

  #[test]
  fn test_zero_height_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_with_fern(&temp_dir);

    let result = GrowthSeries::new(&store).append("Fern", date("2024-03-01"), 0);
    assert!(matches!(result, Err(SproutError::Validation { .. })));
    assert!(store.get("Fern").unwrap().growth_data().is_empty());
  }
}

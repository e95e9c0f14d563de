use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete plant database keyed by plant name
pub type Snapshot = BTreeMap<String, PlantRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringEvent {
  pub date: NaiveDate,
  pub watered: bool,
}

impl WateringEvent {
  pub fn planned(date: NaiveDate) -> Self {
    Self { date, watered: false }
  }

  pub fn watered(date: NaiveDate) -> Self {
    Self { date, watered: true }
  }
}

/// Height measurement in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSample {
  pub date: NaiveDate,
  pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
  info: String,
  #[serde(default, alias = "wateringSchedule")]
  watering_schedule: Vec<WateringEvent>,
  #[serde(default, alias = "growthData")]
  growth_data: Vec<GrowthSample>,
}

impl PlantRecord {
  pub(crate) fn new(info: String) -> Self {
    Self { info, watering_schedule: Vec::new(), growth_data: Vec::new() }
  }

  pub fn info(&self) -> &str {
    &self.info
  }

  /// Events in insertion order; dates may repeat
  pub fn watering_schedule(&self) -> &[WateringEvent] {
    &self.watering_schedule
  }

  /// Samples in insertion order
  pub fn growth_data(&self) -> &[GrowthSample] {
    &self.growth_data
  }

  pub fn has_watering_on(&self, date: NaiveDate) -> bool {
    self.watering_schedule.iter().any(|event| event.date == date)
  }

  pub(crate) fn push_watering(&mut self, event: WateringEvent) {
    self.watering_schedule.push(event);
  }

  pub(crate) fn push_growth(&mut self, sample: GrowthSample) {
    self.growth_data.push(sample);
  }
}

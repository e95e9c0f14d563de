//! Plant records and their on-disk snapshot

pub mod models;
pub mod plant_store;

pub use models::{GrowthSample, PlantRecord, Snapshot, WateringEvent};
pub use plant_store::PlantStore;

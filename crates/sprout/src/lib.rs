//! Sprout - plant identification, care guides and plant tracking
//!
//! Sends plant photos and names to a generative model for identification,
//! care guides, disease diagnosis and translation, and keeps a small JSON
//! database of tracked plants with their watering calendar and growth history.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod growth;
pub mod inference;
pub mod schedule;
pub mod store;

pub use error::{Result, SproutError};
pub use growth::{ChartPoint, GrowthSeries};
pub use inference::{CallHandle, CallOrchestrator, FailureKind, GeminiClient, InferenceService, Outcome, RequestJob, Slot};
pub use schedule::SchedulePolicy;
pub use store::{GrowthSample, PlantRecord, PlantStore, Snapshot, WateringEvent};

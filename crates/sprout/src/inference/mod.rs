//! Outbound calls to the generative model

pub mod client;
pub mod job;
pub mod orchestrator;
pub mod prompts;
pub mod types;

pub use client::{GeminiClient, InferenceService};
pub use job::{RequestJob, Slot};
pub use orchestrator::{CallHandle, CallOrchestrator, FailureKind, Outcome};

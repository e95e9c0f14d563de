//! Off-thread dispatch of inference jobs
//!
//! Every submission runs in its own task on the runtime the orchestrator was
//! built with, so callers outside that runtime can submit too. Each one
//! resolves to exactly one [`Outcome`]. Each [`Slot`] tracks only its latest submission: an older
//! handle still resolves, but reports itself as superseded so the caller can
//! drop the stale result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{Result, SproutError};
use crate::inference::client::InferenceService;
use crate::inference::job::{RequestJob, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// Network, HTTP status or undecodable body
  Transport,
  /// The model answered but produced nothing usable
  Content,
}

/// Terminal result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Success { text: String },
  Failure { kind: FailureKind, message: String },
}

impl Outcome {
  pub fn success(text: impl Into<String>) -> Self {
    Self::Success { text: text.into() }
  }

  pub fn transport_failure(message: impl Into<String>) -> Self {
    Self::Failure { kind: FailureKind::Transport, message: message.into() }
  }

  pub fn content_failure(message: impl Into<String>) -> Self {
    Self::Failure { kind: FailureKind::Content, message: message.into() }
  }

  pub fn failure_kind(&self) -> Option<FailureKind> {
    match self {
      Self::Success { .. } => None,
      Self::Failure { kind, .. } => Some(*kind),
    }
  }

  /// Answer text on success, failure message otherwise
  pub fn message(&self) -> &str {
    match self {
      Self::Success { text } => text,
      Self::Failure { message, .. } => message,
    }
  }

  pub fn into_result(self) -> Result<String> {
    match self {
      Self::Success { text } => Ok(text),
      Self::Failure { kind: FailureKind::Content, message } => Err(SproutError::content(message)),
      Self::Failure { kind: FailureKind::Transport, message } => Err(SproutError::transport(message)),
    }
  }
}

impl From<Result<String>> for Outcome {
  fn from(result: Result<String>) -> Self {
    match result {
      Ok(text) => Self::success(text),
      Err(SproutError::Content { message }) => Self::content_failure(message),
      Err(other) => Self::transport_failure(other.to_string()),
    }
  }
}

#[derive(Default)]
struct SlotTracker {
  generations: [AtomicU64; 4],
}

impl SlotTracker {
  fn advance(&self, slot: Slot) -> u64 {
    self.generations[slot.index()].fetch_add(1, Ordering::AcqRel) + 1
  }

  fn current(&self, slot: Slot) -> u64 {
    self.generations[slot.index()].load(Ordering::Acquire)
  }
}

/// Runs jobs against an inference backend, one task per submission
#[derive(Clone)]
pub struct CallOrchestrator {
  service: Arc<dyn InferenceService>,
  tracker: Arc<SlotTracker>,
  runtime: Handle,
}

impl CallOrchestrator {
  /// Calls run on `runtime`; `submit` itself may be called from any thread.
  pub fn new(service: impl InferenceService + 'static, runtime: Handle) -> Self {
    Self { service: Arc::new(service), tracker: Arc::new(SlotTracker::default()), runtime }
  }

  /// Dispatch `job` on `slot`, superseding whatever the slot was tracking
  pub fn submit(&self, slot: Slot, job: RequestJob) -> CallHandle {
    let generation = self.tracker.advance(slot);
    let (sender, receiver) = oneshot::channel();
    let service = Arc::clone(&self.service);

    debug!(%slot, generation, model = job.model(), "submitting inference call");

    self.runtime.spawn(async move {
      let outcome = Outcome::from(service.generate(&job).await);
      if let Outcome::Failure { kind, message } = &outcome {
        warn!(%slot, generation, ?kind, "inference call failed: {message}");
      }
      // the handle may already be gone; nobody is left to tell
      let _ = sender.send(outcome);
    });

    CallHandle { slot, generation, tracker: Arc::clone(&self.tracker), receiver }
  }

  /// Generation of the most recent submission on `slot` (0 if none)
  pub fn current_generation(&self, slot: Slot) -> u64 {
    self.tracker.current(slot)
  }
}

/// Pending result of one submission
pub struct CallHandle {
  slot: Slot,
  generation: u64,
  tracker: Arc<SlotTracker>,
  receiver: oneshot::Receiver<Outcome>,
}

impl CallHandle {
  pub fn slot(&self) -> Slot {
    self.slot
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// True once a later submission has been made on the same slot
  pub fn is_superseded(&self) -> bool {
    self.tracker.current(self.slot) != self.generation
  }

  /// Wait for the outcome, whether or not this handle was superseded
  pub async fn outcome(self) -> Outcome {
    match self.receiver.await {
      Ok(outcome) => outcome,
      Err(_) => Outcome::transport_failure("inference task ended without a result"),
    }
  }

  /// Block the current thread until the outcome arrives. For synchronous
  /// callers only; panics if called from inside an async context.
  pub fn blocking_outcome(self) -> Outcome {
    match self.receiver.blocking_recv() {
      Ok(outcome) => outcome,
      Err(_) => Outcome::transport_failure("inference task ended without a result"),
    }
  }

  /// Wait for the outcome, discarding it if the slot moved on meanwhile
  pub async fn current_outcome(self) -> Option<Outcome> {
    let slot = self.slot;
    let generation = self.generation;
    let tracker = Arc::clone(&self.tracker);

    let outcome = self.outcome().await;
    if tracker.current(slot) != generation {
      warn!(%slot, generation, "discarding superseded outcome");
      return None;
    }
    Some(outcome)
  }
}

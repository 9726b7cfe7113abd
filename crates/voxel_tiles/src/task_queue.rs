//! Task queue for batch tile generation.
//!
//! Following the IStage pattern: Enqueue → Tick → Completions
//!
//! Regenerating a set of neighbouring chunks after an edit is one tick:
//! every chunk's request (with its own adjacency registrations) runs in
//! parallel on rayon's pool, and the completions come back tagged with the
//! id handed out at enqueue time.

use rayon::prelude::*;

use crate::pipeline::{generate, GenerationOutput, GenerationRequest};

/// Queued generation request.
#[derive(Clone, Debug)]
pub struct QueuedRequest {
  /// Unique identifier for this request
  pub id: u64,
  pub request: GenerationRequest,
}

/// Completed generation result.
#[derive(Debug)]
pub struct GenerationCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub output: GenerationOutput,
}

/// Generation stage that processes requests in parallel.
#[derive(Debug, Default)]
pub struct GenerationQueue {
  pending: Vec<QueuedRequest>,
  completed: Vec<GenerationCompletion>,
  next_id: u64,
}

impl GenerationQueue {
  pub fn new() -> Self {
    Self::default()
  }

  /// Enqueue a request, returning the assigned ID.
  pub fn enqueue(&mut self, request: GenerationRequest) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(QueuedRequest { id, request });
    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of requests processed this tick.
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();
    let _span = tracing::info_span!("generation_queue::tick", requests = count).entered();

    let completions: Vec<GenerationCompletion> = requests
      .into_par_iter()
      .map(|queued| GenerationCompletion {
        id: queued.id,
        output: generate(&queued.request),
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed results, in enqueue order per tick.
  pub fn drain_completions(&mut self) -> Vec<GenerationCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;

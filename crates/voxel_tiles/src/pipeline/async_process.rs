//! Async Tile Mesher
//!
//! Non-blocking wrapper around `generate`. A run executes on rayon's thread
//! pool and hands its output back through a bounded channel.
//!
//! # Flow
//!
//! ```text
//! Caller                             Async (rayon)
//! ┌──────────────────┐
//! │ start(request)   │──────────────► ┌──────────────┐
//! │  generating = ✓  │                │ classify     │
//! └──────────────────┘                │ place        │
//!                                     │ combine      │
//! ┌──────────────────┐                └──────┬───────┘
//! │ poll()           │ ◄─ None until ready   │
//! │ complete()       │ ◄─────────────────────┘ blocks until ready
//! │  generating = ✗  │
//! └──────────────────┘
//! ```
//!
//! A run cannot be cancelled once started. Starting again while a run is in
//! flight is rejected and leaves the running job untouched.
//!
//! # Usage
//!
//! ```ignore
//! let mut mesher = TileMesher::new();
//! mesher.start(request);
//!
//! // Either poll each frame...
//! if let Some(output) = mesher.poll() { upload(output.mesh); }
//!
//! // ...or block.
//! let output = mesher.complete();
//! ```

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use super::process::generate;
use super::types::{GenerationOutput, GenerationRequest};

/// Non-blocking single-run generation pipeline.
#[derive(Debug, Default)]
pub struct TileMesher {
  /// Receiver for the in-flight run.
  receiver: Option<Receiver<GenerationOutput>>,
}

impl TileMesher {
  pub fn new() -> Self {
    Self { receiver: None }
  }

  /// True while a run is in flight.
  pub fn is_generating(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start a generation run.
  ///
  /// Returns `false` (and logs an error) if a run is already in flight.
  pub fn start(&mut self, request: GenerationRequest) -> bool {
    if self.is_generating() {
      tracing::error!("generation already in progress; call complete() before starting again");
      return false;
    }

    let (sender, receiver) = channel::bounded(1);
    self.receiver = Some(receiver);

    rayon::spawn(move || {
      let output = generate(&request);
      // Receiver dropped = mesher dropped mid-run.
      let _ = sender.send(output);
    });

    true
  }

  /// Poll for the result (non-blocking).
  ///
  /// Returns `Some(output)` once when the run finishes, `None` while it is
  /// running or when nothing was started.
  pub fn poll(&mut self) -> Option<GenerationOutput> {
    let receiver = self.receiver.as_ref()?;

    match receiver.try_recv() {
      Ok(output) => {
        self.receiver = None;
        Some(output)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        tracing::error!("generation task ended without producing output");
        self.receiver = None;
        None
      }
    }
  }

  /// Block until the in-flight run finishes and return its output.
  ///
  /// Returns `None` (and logs a warning) if nothing is running.
  pub fn complete(&mut self) -> Option<GenerationOutput> {
    let Some(receiver) = self.receiver.take() else {
      tracing::warn!("complete() called with no generation in progress");
      return None;
    };

    match receiver.recv() {
      Ok(output) => Some(output),
      Err(_) => {
        tracing::error!("generation task ended without producing output");
        None
      }
    }
  }
}

//! The wait gate: the single blocking point of a node run.
//!
//! The node's control thread blocks here until the host has queued at
//! least one frame on any input port, or the run has been cancelled.
//! The gate is run-wide, not per-port — after a release the node must
//! poll every input port, since the gate does not say which became ready.
//!
//! Cancellation is a latch: once `Cancelled` has been returned, every
//! later call returns `Cancelled` again. Data that was already pending
//! when cancellation arrived is still drained first, so no frame the host
//! delivered before cancelling is silently lost.

use std::sync::{Arc, Condvar, Mutex};

/// Outcome of a blocking wait for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    /// At least one frame is queued across the run's input ports.
    NewDataAvailable,
    /// The run has been cancelled. Terminal: every subsequent wait
    /// returns this again.
    Cancelled,
}

#[derive(Debug, Default)]
struct GateState {
    /// Set by the host after each enqueue; cleared on release.
    pending: bool,
    /// Set once by the host; never cleared.
    cancelled: bool,
    /// True once `Cancelled` has been returned to the node.
    latched: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<GateState>,
    cond: Condvar,
}

/// Node-side blocking handle. One per run.
#[derive(Debug)]
pub struct WaitGate {
    shared: Arc<Shared>,
}

/// Host-side signalling handle. Cloneable so every input feeder can ring
/// the same gate.
#[derive(Debug, Clone)]
pub struct GateSignal {
    shared: Arc<Shared>,
}

impl WaitGate {
    /// Create a gate plus the host-side signal paired with it.
    pub fn new() -> (WaitGate, GateSignal) {
        let shared = Arc::new(Shared::default());
        (
            WaitGate {
                shared: Arc::clone(&shared),
            },
            GateSignal { shared },
        )
    }

    /// Block until new input is available or the run is cancelled.
    ///
    /// Must be called at the top of every loop iteration before draining;
    /// draining without waiting risks a busy loop over empty queues.
    pub fn await_new_input(&self) -> WaitResult {
        let mut state = self
            .shared
            .state
            .lock()
            .expect("wait gate lock poisoned");
        loop {
            if state.latched {
                return WaitResult::Cancelled;
            }
            if state.pending {
                state.pending = false;
                return WaitResult::NewDataAvailable;
            }
            if state.cancelled {
                state.latched = true;
                tracing::debug!("wait gate released: cancelled");
                return WaitResult::Cancelled;
            }
            state = self
                .shared
                .cond
                .wait(state)
                .expect("wait gate lock poisoned");
        }
    }
}

impl GateSignal {
    /// Wake the node: at least one new frame has been queued on some
    /// input port. Called by the host after every enqueue.
    pub fn notify(&self) {
        let mut state = self
            .shared
            .state
            .lock()
            .expect("wait gate lock poisoned");
        state.pending = true;
        self.shared.cond.notify_one();
    }

    /// Latch cancellation. The node observes it at its next (or current)
    /// wait; pending data is still released first.
    pub fn cancel(&self) {
        let mut state = self
            .shared
            .state
            .lock()
            .expect("wait gate lock poisoned");
        if !state.cancelled {
            state.cancelled = true;
            tracing::debug!("run cancellation latched");
        }
        self.shared.cond.notify_all();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.shared
            .state
            .lock()
            .expect("wait gate lock poisoned")
            .cancelled
    }
}

//! Single-flight coordination for token refresh.
//!
//! At most one refresh call may be in flight at any time. The first
//! request to hit a 401 becomes the leader and performs the refresh;
//! requests arriving while it runs become followers and receive the
//! leader's outcome through oneshot channels, released in arrival order.

use tokio::sync::{Mutex, oneshot};

use crate::error::RefreshError;

/// Outcome of a refresh attempt: the new access token, or the shared
/// failure fanned out to every waiter.
pub type RefreshOutcome = Result<String, RefreshError>;

/// What `join` assigned to the caller.
pub enum Role {
    /// Caller must perform the refresh and then call [`RefreshGate::settle`].
    Leader,
    /// Caller waits for the leader's outcome.
    Follower(oneshot::Receiver<RefreshOutcome>),
}

enum Phase {
    Idle,
    // Waiters in arrival order.
    Refreshing(Vec<oneshot::Sender<RefreshOutcome>>),
}

/// Gate serializing refresh attempts.
pub struct RefreshGate {
    phase: Mutex<Phase>,
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Joins the current refresh cycle, starting one if none is running.
    pub async fn join(&self) -> Role {
        let mut phase = self.phase.lock().await;
        match &mut *phase {
            Phase::Idle => {
                *phase = Phase::Refreshing(Vec::new());
                Role::Leader
            }
            Phase::Refreshing(waiters) => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                Role::Follower(rx)
            }
        }
    }

    /// Publishes the leader's outcome to every waiter and reopens the gate.
    ///
    /// Only the leader may call this, exactly once per cycle.
    pub async fn settle(&self, outcome: RefreshOutcome) {
        let mut phase = self.phase.lock().await;
        if let Phase::Refreshing(waiters) = std::mem::replace(&mut *phase, Phase::Idle) {
            for waiter in waiters {
                // A dropped receiver means the request was cancelled.
                let _ = waiter.send(outcome.clone());
            }
        }
    }
}

//! Readiness gate: wait with a deadline until a factory has usable rule data

use crate::error::ReadyError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Readiness of a factory's rule data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    NotReady,
    Ready,
    /// A waiter's deadline passed first. The engine may still promote this to `Ready`.
    TimedOut,
}

impl ReadinessState {
    pub fn is_ready(&self) -> bool {
        *self == ReadinessState::Ready
    }
}

/// Arbitrates waiting on the engine's first complete snapshot.
///
/// Cloning yields another handle to the same state. Every waiter is woken
/// when the engine signals.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    state: Arc<watch::Sender<ReadinessState>>,
}

/// Handed to the synchronization engine so it can promote the gate to ready
#[derive(Debug, Clone)]
pub struct ReadySignal {
    state: Arc<watch::Sender<ReadinessState>>,
}

impl ReadySignal {
    /// Record that a complete snapshot is available. Idempotent.
    pub fn mark_ready(&self) {
        let promoted = self.state.send_if_modified(|state| {
            if state.is_ready() {
                false
            } else {
                *state = ReadinessState::Ready;
                true
            }
        });
        if promoted {
            tracing::debug!("Readiness gate promoted to ready");
        }
    }
}

impl ReadinessGate {
    /// A gate that has not seen any data yet
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ReadinessState::NotReady);
        Self {
            state: Arc::new(tx),
        }
    }

    /// A gate that is ready from the start
    pub fn ready() -> Self {
        let (tx, _rx) = watch::channel(ReadinessState::Ready);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn signal(&self) -> ReadySignal {
        ReadySignal {
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> ReadinessState {
        *self.state.borrow()
    }

    /// Non-blocking readiness check
    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Wait until ready or until `timeout` passes.
    pub async fn await_ready(&self, timeout: Duration) -> Result<(), ReadyError> {
        self.await_ready_or_interrupt(timeout, std::future::pending::<()>())
            .await
    }

    /// Wait until ready, until `timeout` passes, or until `interrupt` completes.
    ///
    /// Interrupting only unwinds this wait; the engine keeps running. Dropping
    /// the returned future cancels the wait the same way.
    pub async fn await_ready_or_interrupt<F>(
        &self,
        timeout: Duration,
        interrupt: F,
    ) -> Result<(), ReadyError>
    where
        F: Future,
    {
        if timeout.is_zero() {
            return Err(ReadyError::InvalidArgument(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let mut rx = self.state.subscribe();

        tokio::select! {
            biased;

            result = tokio::time::timeout(timeout, rx.wait_for(ReadinessState::is_ready)) => {
                match result {
                    Ok(Ok(_)) => Ok(()),
                    // The sender lives as long as this gate
                    Ok(Err(_)) => Err(ReadyError::Interrupted),
                    Err(_) => {
                        self.mark_timed_out();
                        tracing::debug!(timeout_ms = timeout.as_millis() as u64, "Readiness wait timed out");
                        Err(ReadyError::Timeout(timeout))
                    }
                }
            }
            _ = interrupt => {
                tracing::debug!("Readiness wait interrupted");
                Err(ReadyError::Interrupted)
            }
        }
    }

    fn mark_timed_out(&self) {
        self.state.send_if_modified(|state| {
            if *state == ReadinessState::NotReady {
                *state = ReadinessState::TimedOut;
                true
            } else {
                false
            }
        });
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_ready_gate_returns_immediately() {
        let gate = ReadinessGate::ready();
        assert!(gate.is_ready());
        let start = Instant::now();
        gate.await_ready(Duration::from_secs(5)).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let gate = ReadinessGate::ready();
        let result = gate.await_ready(Duration::ZERO).await;
        assert!(matches!(result, Err(ReadyError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_timeout_marks_state() {
        let gate = ReadinessGate::new();
        assert_eq!(gate.state(), ReadinessState::NotReady);
        let result = gate.await_ready(Duration::from_millis(20)).await;
        assert_eq!(result, Err(ReadyError::Timeout(Duration::from_millis(20))));
        assert_eq!(gate.state(), ReadinessState::TimedOut);

        gate.signal().mark_ready();
        assert_eq!(gate.state(), ReadinessState::Ready);
    }

    #[tokio::test]
    async fn test_interrupt_is_distinct_from_timeout() {
        let gate = ReadinessGate::new();
        let result = gate
            .await_ready_or_interrupt(Duration::from_secs(5), async {})
            .await;
        assert_eq!(result, Err(ReadyError::Interrupted));
        // Interruption leaves the state alone
        assert_eq!(gate.state(), ReadinessState::NotReady);
    }

    #[tokio::test]
    async fn test_ready_wins_over_completed_interrupt() {
        let gate = ReadinessGate::ready();
        let result = gate
            .await_ready_or_interrupt(Duration::from_secs(5), async {})
            .await;
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_mark_ready_is_idempotent() {
        let gate = ReadinessGate::new();
        let signal = gate.signal();
        signal.mark_ready();
        signal.mark_ready();
        assert!(gate.is_ready());
    }
}

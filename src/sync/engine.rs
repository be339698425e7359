//! Generic polling engine with generation-fenced commits

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::TransportError;
use crate::sync::state::SyncState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("account id must not be empty")]
    EmptyAccountId,
    #[error("engine is already running")]
    AlreadyRunning,
}

/// One fetch-and-reconcile unit of remote state.
///
/// A source that issues several requests must settle them as a single unit:
/// partial results never escape `fetch`.
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    type Snapshot: Clone + Send + Sync + 'static;

    async fn fetch(&self) -> Result<Self::Snapshot, TransportError>;
}

/// Periodic fetch-and-reconcile loop for one slice of remote state.
///
/// The first tick runs immediately on start; each following tick is
/// scheduled from the completion of the previous one, so ticks of one
/// engine never overlap. `stop` bumps a generation fence, which guarantees
/// an in-flight tick's result is discarded rather than merged late.
pub struct SyncEngine<S: SnapshotSource> {
    inner: Arc<EngineInner<S>>,
    poll_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

struct EngineInner<S: SnapshotSource> {
    source: S,
    state_tx: watch::Sender<SyncState<S::Snapshot>>,
    generation: AtomicU64,
}

impl<S: SnapshotSource> SyncEngine<S> {
    pub fn new(source: S, poll_interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(SyncState::initial());
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(EngineInner {
                source,
                state_tx,
                generation: AtomicU64::new(0),
            }),
            poll_interval,
            shutdown_tx,
            task: None,
        }
    }

    /// Begin the tick loop. The first tick runs before the first sleep.
    pub fn start(&mut self) -> Result<(), SyncError> {
        if self.task.is_some() {
            return Err(SyncError::AlreadyRunning);
        }

        let inner = Arc::clone(&self.inner);
        let period = self.poll_interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        self.task = Some(tokio::spawn(async move {
            loop {
                // The fence token is captured before the fetch suspends;
                // stop() invalidates it while the request is in flight.
                let generation = inner.generation.load(Ordering::SeqCst);
                let result = inner.source.fetch().await;
                if !inner.commit(generation, result) {
                    break;
                }

                tokio::select! {
                    _ = tokio::time::sleep(period) => {}
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("sync loop exited");
        }));

        Ok(())
    }

    /// Cancel the loop. Idempotent; an in-flight tick's eventual result is
    /// discarded, never applied after this returns.
    pub fn stop(&mut self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
        self.task = None;
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Subscribe to state updates
    pub fn subscribe(&self) -> watch::Receiver<SyncState<S::Snapshot>> {
        self.inner.state_tx.subscribe()
    }

    /// Clone of the latest published state
    pub fn state(&self) -> SyncState<S::Snapshot> {
        self.inner.state_tx.borrow().clone()
    }
}

impl<S: SnapshotSource> Drop for SyncEngine<S> {
    fn drop(&mut self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
    }
}

impl<S: SnapshotSource> EngineInner<S> {
    /// Apply a settled tick result unless the engine moved on while the
    /// fetch was in flight. Returns false when the result was fenced out.
    fn commit(&self, generation: u64, result: Result<S::Snapshot, TransportError>) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding superseded tick result");
            return false;
        }

        self.state_tx.send_modify(|state| {
            state.loading = false;
            match result {
                Ok(snapshot) => {
                    state.data = Some(snapshot);
                    state.last_error = None;
                }
                Err(err) => {
                    warn!(error = %err, "sync tick failed, keeping last-known-good data");
                    state.last_error = Some(err);
                }
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Source whose ticks succeed or fail per a fixed script, and which can
    /// optionally hold a fetch open until released.
    struct ScriptedSource {
        script: Vec<Result<u32, TransportError>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<u32, TransportError>>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(script: Vec<Result<u32, TransportError>>, gate: Arc<Notify>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }
    }

    #[async_trait]
    impl SnapshotSource for ScriptedSource {
        type Snapshot = u32;

        async fn fetch(&self) -> Result<u32, TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.script[call.min(self.script.len() - 1)].clone()
        }
    }

    async fn settle() {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn first_tick_runs_immediately_and_clears_loading() {
        let mut engine = SyncEngine::new(
            ScriptedSource::new(vec![Ok(7)]),
            Duration::from_secs(3600),
        );
        assert!(engine.state().loading);

        engine.start().expect("engine starts");
        let mut rx = engine.subscribe();
        rx.changed().await.expect("first tick publishes");

        let state = engine.state();
        assert_eq!(state.data, Some(7));
        assert!(!state.loading);
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn failed_tick_keeps_previous_data() {
        let mut engine = SyncEngine::new(
            ScriptedSource::new(vec![
                Ok(1),
                Err(TransportError::NetworkUnavailable("refused".to_string())),
            ]),
            Duration::from_millis(10),
        );
        engine.start().expect("engine starts");

        let mut rx = engine.subscribe();
        rx.changed().await.expect("tick 1");
        rx.changed().await.expect("tick 2");

        let state = engine.state();
        assert_eq!(state.data, Some(1));
        assert_eq!(
            state.last_error,
            Some(TransportError::NetworkUnavailable("refused".to_string()))
        );
    }

    #[tokio::test]
    async fn recovery_clears_last_error() {
        let mut engine = SyncEngine::new(
            ScriptedSource::new(vec![Err(TransportError::Timeout), Ok(5)]),
            Duration::from_millis(10),
        );
        engine.start().expect("engine starts");

        let mut rx = engine.subscribe();
        rx.changed().await.expect("tick 1");
        assert_eq!(engine.state().last_error, Some(TransportError::Timeout));

        rx.changed().await.expect("tick 2");
        let state = engine.state();
        assert_eq!(state.data, Some(5));
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn stop_before_resolve_discards_late_result() {
        let gate = Arc::new(Notify::new());
        let mut engine = SyncEngine::new(
            ScriptedSource::gated(vec![Ok(99)], Arc::clone(&gate)),
            Duration::from_secs(3600),
        );
        engine.start().expect("engine starts");
        settle().await;

        let before = engine.state();
        engine.stop();

        // Let the in-flight tick resolve late and attempt its commit.
        gate.notify_one();
        settle().await;

        assert_eq!(engine.state(), before);
        assert!(engine.state().data.is_none());
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let mut engine = SyncEngine::new(
            ScriptedSource::new(vec![Ok(1)]),
            Duration::from_secs(3600),
        );
        engine.start().expect("engine starts");
        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let mut engine = SyncEngine::new(
            ScriptedSource::new(vec![Ok(1)]),
            Duration::from_secs(3600),
        );
        engine.start().expect("first start");
        assert_eq!(engine.start(), Err(SyncError::AlreadyRunning));
    }
}

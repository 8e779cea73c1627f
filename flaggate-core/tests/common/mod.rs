//! Shared test doubles for factory construction

#![allow(dead_code)]

use flaggate_core::client::LocalClient;
use flaggate_core::error::RemoteBuildError;
use flaggate_core::factory::ReadySignal;
use flaggate_core::models::ClientConfiguration;
use flaggate_core::sync::{EngineHandle, EngineProvider, StartedEngine};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Engine provider that records every start and hands the ready signal to the test
#[derive(Default)]
pub struct RecordingProvider {
    pub starts: AtomicUsize,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub tokens: Mutex<Vec<String>>,
    pub signals: Mutex<Vec<ReadySignal>>,
    /// Time spent inside the critical section per start
    pub hold: Option<Duration>,
    pub treatments: HashMap<String, String>,
}

impl RecordingProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn holding(hold: Duration) -> Arc<Self> {
        Arc::new(Self {
            hold: Some(hold),
            ..Self::default()
        })
    }

    pub fn with_treatment(flag: &str, treatment: &str) -> Arc<Self> {
        let mut treatments = HashMap::new();
        treatments.insert(flag.to_string(), treatment.to_string());
        Arc::new(Self {
            treatments,
            ..Self::default()
        })
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Ready signal handed to the `index`th engine
    pub fn signal(&self, index: usize) -> ReadySignal {
        self.signals.lock().unwrap()[index].clone()
    }
}

impl EngineProvider for RecordingProvider {
    fn start(
        &self,
        token: &str,
        _config: &Arc<ClientConfiguration>,
        ready: ReadySignal,
    ) -> Result<StartedEngine, RemoteBuildError> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(hold) = self.hold {
            std::thread::sleep(hold);
        }

        self.tokens.lock().unwrap().push(token.to_string());
        self.signals.lock().unwrap().push(ready);
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_sub(1, Ordering::SeqCst);

        Ok(StartedEngine {
            client: Arc::new(LocalClient::new(self.treatments.clone())),
            handle: EngineHandle::detached(),
        })
    }
}

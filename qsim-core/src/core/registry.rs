use crate::core::circuit::QuantumCircuit;
use crate::core::config::EngineConfig;
use crate::core::engine::{EngineResult, StatevectorEngine};
use crate::error::{QuantumError, QuantumResult};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

/// A simulation backend, exposed under a stable snake-case id.
pub trait Engine: Send + Sync {
    fn id(&self) -> &'static str;
    fn run(&self, circuit: &QuantumCircuit, config: &EngineConfig, cancelled: &AtomicBool) -> QuantumResult<EngineResult>;
}

/// Thread-safe engine-discovery registry. Enumeration, lookup, and reload
/// are all protected by one `RwLock`.
pub struct Registry {
    engines: RwLock<HashMap<&'static str, Arc<dyn Engine>>>,
}

impl Registry {
    fn bootstrap() -> HashMap<&'static str, Arc<dyn Engine>> {
        let mut engines: HashMap<&'static str, Arc<dyn Engine>> = HashMap::new();
        let statevector: Arc<dyn Engine> = Arc::new(StatevectorEngine);
        engines.insert(statevector.id(), statevector);
        let noop: Arc<dyn Engine> = Arc::new(NoopEngine);
        engines.insert(noop.id(), noop);
        engines
    }

    pub fn new() -> Self {
        Registry { engines: RwLock::new(Self::bootstrap()) }
    }

    pub fn available(&self) -> Vec<&'static str> {
        let guard = self.engines.read().expect("registry lock poisoned");
        guard.keys().copied().collect()
    }

    pub fn get(&self, id: &str) -> QuantumResult<Arc<dyn Engine>> {
        let guard = self.engines.read().expect("registry lock poisoned");
        guard.get(id).cloned().ok_or_else(|| QuantumError::NotFound { id: id.to_string() })
    }

    pub fn first(&self) -> QuantumResult<Arc<dyn Engine>> {
        let guard = self.engines.read().expect("registry lock poisoned");
        guard.values().next().cloned().ok_or_else(|| QuantumError::NotFound { id: String::new() })
    }

    /// Re-enumerates the compile-time engine list. No reflective plugin
    /// loading.
    pub fn reload(&self) {
        let mut guard = self.engines.write().expect("registry lock poisoned");
        *guard = Self::bootstrap();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// A minimal engine that allocates nothing and always returns `Empty`,
/// used for registry-plumbing tests and as a lookup-failure baseline.
#[derive(Debug, Default)]
struct NoopEngine;

impl Engine for NoopEngine {
    fn id(&self) -> &'static str {
        "noop"
    }

    fn run(&self, circuit: &QuantumCircuit, _config: &EngineConfig, _cancelled: &AtomicBool) -> QuantumResult<EngineResult> {
        Ok(EngineResult::Empty { qubit_count: circuit.qubit_count() })
    }
}

lazy_static! {
    /// Process-wide registry instance, enumerated at first access.
    pub static ref REGISTRY: Registry = Registry::new();
}

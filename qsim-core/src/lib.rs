//! Dense state-vector quantum circuit simulation kernel: complex
//! arithmetic, closed-form gate matrices, a SIMD-dispatched gate kernel, a
//! parallel sweep executor, a measurement sampler, and an engine registry.

pub mod core;
pub mod error;
pub mod maths;

pub use core::circuit::{Operation, QuantumCircuit};
pub use core::config::EngineConfig;
pub use core::custom_gate::CustomGate;
pub use core::engine::{EngineResult, StatevectorEngine};
pub use core::gates::{Gate, GateTag};
pub use core::registry::{Engine, Registry, REGISTRY};
pub use core::statevector::StateVector;
pub use error::{QuantumError, QuantumResult};
pub use maths::Complex;

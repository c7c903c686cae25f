use crate::core::circuit::{Operation, QuantumCircuit};
use crate::core::config::EngineConfig;
use crate::core::gates::{self, Gate, GateTag};
use crate::core::kernel;
use crate::core::registry::Engine;
use crate::core::sampler;
use crate::core::statevector::StateVector;
use crate::error::{QuantumError, QuantumResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The outcome of running a circuit to completion.
#[derive(Debug, Clone)]
pub enum EngineResult {
    StateVector {
        /// Interleaved `[re0, im0, re1, im1, ...]`, little-endian basis
        /// order. Empty when a measurement result omits the state vector.
        amplitudes: Vec<f64>,
        qubit_count: usize,
        gate_count: u64,
        elapsed: Duration,
        histogram: Option<HashMap<String, u64>>,
        total_shots: u64,
    },
    Empty { qubit_count: usize },
}

/// The dense state-vector engine driver.
#[derive(Debug, Default)]
pub struct StatevectorEngine;

impl Engine for StatevectorEngine {
    fn id(&self) -> &'static str {
        "statevector"
    }

    fn run(&self, circuit: &QuantumCircuit, config: &EngineConfig, cancelled: &AtomicBool) -> QuantumResult<EngineResult> {
        let started = Instant::now();
        let num_workers = rayon::current_num_threads();

        let mut sv = StateVector::allocate(circuit.qubit_count() as i64)?;
        let mut gate_count: u64 = 0;

        log::debug!("statevector engine: {} qubit(s), {} op(s)", sv.num_qubits, circuit.operations().len());

        for op in circuit.operations() {
            if cancelled.load(Ordering::Relaxed) {
                return Err(QuantumError::CancelledError);
            }

            match op {
                Operation::Barrier { .. } => {
                    log::trace!("barrier, no-op");
                }
                Operation::Gate { gate, qubits } => {
                    dispatch_gate(&mut sv, gate, qubits, config, num_workers, cancelled)?;
                    gate_count += 1;
                }
            }

            if cfg!(debug_assertions) {
                let drift = (sv.norm() - 1.0).abs();
                if drift > 1e-9 {
                    return Err(QuantumError::NormError { drift });
                }
            }
        }

        let elapsed = started.elapsed();

        if circuit.measurements().is_empty() {
            return Ok(EngineResult::StateVector {
                amplitudes: interleave(&sv),
                qubit_count: sv.num_qubits,
                gate_count,
                elapsed,
                histogram: None,
                total_shots: 1,
            });
        }

        let (histogram, total_shots) = sampler::sample(&sv, circuit.measurements(), config)?;
        Ok(EngineResult::StateVector {
            amplitudes: if config.include_state_vector { interleave(&sv) } else { Vec::new() },
            qubit_count: sv.num_qubits,
            gate_count,
            elapsed,
            histogram: Some(histogram),
            total_shots,
        })
    }
}

fn interleave(sv: &StateVector) -> Vec<f64> {
    let mut out = Vec::with_capacity(sv.logical_size * 2);
    for k in 0..sv.logical_size {
        out.push(sv.real[k]);
        out.push(sv.imag[k]);
    }
    out
}

fn dispatch_gate(
    sv: &mut StateVector,
    gate: &Gate,
    qubits: &[usize],
    config: &EngineConfig,
    num_workers: usize,
    cancelled: &AtomicBool,
) -> QuantumResult<()> {
    match (gate, qubits) {
        (Gate::Fixed(tag @ (GateTag::Cx | GateTag::Cz | GateTag::Swap)), [c, t]) => {
            let m = gates::fixed_matrix4(*tag)?;
            kernel::apply_two_qubit(sv, *c, *t, &m, config, num_workers, cancelled)
        }
        (Gate::Fixed(tag), [q]) => {
            let m = gates::fixed_matrix2(*tag)?;
            kernel::apply_single_qubit(sv, *q, &m, config, num_workers, cancelled)
        }
        (Gate::Rotation(tag, theta), [q]) => {
            let m = gates::rotation_matrix2(*tag, *theta)?;
            kernel::apply_single_qubit(sv, *q, &m, config, num_workers, cancelled)
        }
        (Gate::Custom(custom), [q]) if custom.arity() == 1 => {
            let m = custom.matrix2()?;
            kernel::apply_single_qubit(sv, *q, &m, config, num_workers, cancelled)
        }
        (Gate::Custom(custom), [c, t]) if custom.arity() == 2 => {
            let m = custom.matrix4()?;
            kernel::apply_two_qubit(sv, *c, *t, &m, config, num_workers, cancelled)
        }
        _ => Err(QuantumError::UnsupportedOp {
            name: format!("{:?} applied to {:?}", gate, qubits),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::circuit::QuantumCircuit;

    #[test]
    fn s1_hadamard_single_qubit() {
        let circuit = QuantumCircuit::new(1).h(0);
        let engine = StatevectorEngine;
        let result = engine.run(&circuit, &EngineConfig::default(), &AtomicBool::new(false)).unwrap();
        match result {
            EngineResult::StateVector { amplitudes, .. } => {
                let inv = std::f64::consts::FRAC_1_SQRT_2;
                assert!((amplitudes[0] - inv).abs() < 1e-12);
                assert!(amplitudes[1].abs() < 1e-12);
                assert!((amplitudes[2] - inv).abs() < 1e-12);
                assert!(amplitudes[3].abs() < 1e-12);
            }
            _ => panic!("expected a state vector result"),
        }
    }

    #[test]
    fn s6_rz_two_pi_yields_global_minus_phase() {
        let circuit = QuantumCircuit::new(3).rz(0, 2.0 * std::f64::consts::PI);
        let engine = StatevectorEngine;
        let result = engine.run(&circuit, &EngineConfig::default(), &AtomicBool::new(false)).unwrap();
        match result {
            EngineResult::StateVector { amplitudes, .. } => {
                assert!((amplitudes[0] - (-1.0)).abs() < 1e-9);
                assert!(amplitudes[1].abs() < 1e-9);
                for i in 2..amplitudes.len() {
                    assert!(amplitudes[i].abs() < 1e-9);
                }
            }
            _ => panic!("expected a state vector result"),
        }
    }

    #[test]
    fn malformed_arity_is_unsupported_op() {
        // A single-qubit custom gate dispatched against two qubit
        // arguments has no matching dispatch arm; only the builder
        // prevents this mismatch in normal use.
        use crate::core::custom_gate::CustomGate;
        use std::sync::Arc;

        let bad = Arc::new(CustomGate::single([[crate::Complex::ONE, crate::Complex::ZERO], [crate::Complex::ZERO, crate::Complex::ONE]]));
        let circuit = QuantumCircuit::new(2).custom(bad, vec![0, 1]);
        let engine = StatevectorEngine;
        let result = engine.run(&circuit, &EngineConfig::default(), &AtomicBool::new(false));
        assert!(matches!(result, Err(QuantumError::UnsupportedOp { .. })));
    }

    #[test]
    fn measuring_an_out_of_range_qubit_is_range_error() {
        let circuit = QuantumCircuit::new(2).x(0).measure(5, 0);
        let engine = StatevectorEngine;
        let result = engine.run(&circuit, &EngineConfig::default(), &AtomicBool::new(false));
        assert!(matches!(result, Err(QuantumError::RangeError { index: 5, limit: 2 })));
    }

    #[test]
    fn cancellation_before_first_gate_is_cancelled_error() {
        let circuit = QuantumCircuit::new(2).h(0).cx(0, 1);
        let engine = StatevectorEngine;
        let cancelled = AtomicBool::new(true);
        let result = engine.run(&circuit, &EngineConfig::default(), &cancelled);
        assert!(matches!(result, Err(QuantumError::CancelledError)));
    }

    #[test]
    fn s4_measurement_histogram_is_deterministic() {
        let circuit = QuantumCircuit::new(1).x(0).measure(0, 0);
        let engine = StatevectorEngine;
        let config = EngineConfig { shots: 1024, prng_seed: Some(42), ..EngineConfig::default() };
        let result = engine.run(&circuit, &config, &AtomicBool::new(false)).unwrap();
        match result {
            EngineResult::StateVector { histogram, total_shots, .. } => {
                let hist = histogram.unwrap();
                assert_eq!(total_shots, 1024);
                assert_eq!(hist.get("1"), Some(&1024));
                assert!(hist.get("0").is_none());
            }
            _ => panic!("expected a state vector result"),
        }
    }
}

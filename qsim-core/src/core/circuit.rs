use crate::core::custom_gate::CustomGate;
use crate::core::gates::{Gate, GateTag};
use std::collections::HashMap;
use std::sync::Arc;

/// Either a gate applied to its qubit arguments, or a barrier.
#[derive(Debug, Clone)]
pub enum Operation {
    Gate { gate: Gate, qubits: Vec<usize> },
    Barrier { qubits: Vec<usize> },
}

/// Fluent circuit builder. Qubit-index validation happens at dispatch time
/// inside the engine driver, not at build time, so an out-of-range index
/// surfaces as a per-operation error rather than rejecting the circuit
/// upfront.
#[derive(Debug, Clone)]
pub struct QuantumCircuit {
    num_qubits: usize,
    ops: Vec<Operation>,
    measurements: HashMap<usize, usize>,
}

impl QuantumCircuit {
    pub fn new(num_qubits: usize) -> Self {
        QuantumCircuit {
            num_qubits,
            ops: Vec::new(),
            measurements: HashMap::new(),
        }
    }

    pub fn qubit_count(&self) -> usize {
        self.num_qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn measurements(&self) -> &HashMap<usize, usize> {
        &self.measurements
    }

    fn push_fixed(mut self, tag: GateTag, qubits: Vec<usize>) -> Self {
        self.ops.push(Operation::Gate { gate: Gate::Fixed(tag), qubits });
        self
    }

    fn push_rotation(mut self, tag: GateTag, q: usize, theta: f64) -> Self {
        self.ops.push(Operation::Gate {
            gate: Gate::Rotation(tag, theta),
            qubits: vec![q],
        });
        self
    }

    pub fn h(self, q: usize) -> Self {
        self.push_fixed(GateTag::H, vec![q])
    }

    pub fn x(self, q: usize) -> Self {
        self.push_fixed(GateTag::X, vec![q])
    }

    pub fn y(self, q: usize) -> Self {
        self.push_fixed(GateTag::Y, vec![q])
    }

    pub fn z(self, q: usize) -> Self {
        self.push_fixed(GateTag::Z, vec![q])
    }

    pub fn s(self, q: usize) -> Self {
        self.push_fixed(GateTag::S, vec![q])
    }

    pub fn sdg(self, q: usize) -> Self {
        self.push_fixed(GateTag::Sdg, vec![q])
    }

    pub fn t(self, q: usize) -> Self {
        self.push_fixed(GateTag::T, vec![q])
    }

    pub fn tdg(self, q: usize) -> Self {
        self.push_fixed(GateTag::Tdg, vec![q])
    }

    pub fn cx(self, control: usize, target: usize) -> Self {
        self.push_fixed(GateTag::Cx, vec![control, target])
    }

    pub fn cz(self, control: usize, target: usize) -> Self {
        self.push_fixed(GateTag::Cz, vec![control, target])
    }

    pub fn swap(self, a: usize, b: usize) -> Self {
        self.push_fixed(GateTag::Swap, vec![a, b])
    }

    pub fn rx(self, q: usize, theta: f64) -> Self {
        self.push_rotation(GateTag::Rx, q, theta)
    }

    pub fn ry(self, q: usize, theta: f64) -> Self {
        self.push_rotation(GateTag::Ry, q, theta)
    }

    pub fn rz(self, q: usize, theta: f64) -> Self {
        self.push_rotation(GateTag::Rz, q, theta)
    }

    pub fn custom(mut self, gate: Arc<CustomGate>, qubits: Vec<usize>) -> Self {
        self.ops.push(Operation::Gate { gate: Gate::Custom(gate), qubits });
        self
    }

    /// `qubits` empty means "all qubits".
    pub fn barrier(mut self, qubits: Vec<usize>) -> Self {
        self.ops.push(Operation::Barrier { qubits });
        self
    }

    pub fn measure(mut self, qubit: usize, classical_bit: usize) -> Self {
        self.measurements.insert(qubit, classical_bit);
        self
    }

    pub fn measure_all(mut self) -> Self {
        for q in 0..self.num_qubits {
            self.measurements.insert(q, q);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_circuit_has_two_ops_and_two_measurements() {
        let c = QuantumCircuit::new(2).h(0).cx(0, 1).measure_all();
        assert_eq!(c.operations().len(), 2);
        assert_eq!(c.measurements().len(), 2);
    }

    #[test]
    fn unmeasured_circuit_has_empty_measurement_map() {
        let c = QuantumCircuit::new(1).h(0);
        assert!(c.measurements().is_empty());
    }
}

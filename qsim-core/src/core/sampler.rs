use crate::core::config::EngineConfig;
use crate::core::statevector::StateVector;
use crate::error::{QuantumError, QuantumResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Measurement sampling: builds the cumulative distribution once, then
/// draws `config.shots` independent samples from it. Returns the outcome
/// histogram and the shot count actually drawn.
pub fn sample(sv: &StateVector, measured: &HashMap<usize, usize>, config: &EngineConfig) -> QuantumResult<(HashMap<String, u64>, u64)> {
    let logical_size = sv.logical_size;

    let total: f64 = (0..logical_size).map(|k| sv.real[k] * sv.real[k] + sv.imag[k] * sv.imag[k]).sum();
    if (total - 1.0).abs() > 1e-9 {
        return Err(QuantumError::NormError { drift: (total - 1.0).abs() });
    }

    let mut cdf = Vec::with_capacity(logical_size);
    let mut running = 0.0;
    for k in 0..logical_size {
        running += sv.real[k] * sv.real[k] + sv.imag[k] * sv.imag[k];
        cdf.push(running);
    }
    if let Some(last) = cdf.last_mut() {
        // clamp rounding drift so the binary search always terminates
        *last = 1.0;
    }

    let mut measured_qubits: Vec<usize> = measured.keys().copied().collect();
    measured_qubits.sort_unstable();

    if let Some(&q) = measured_qubits.last() {
        if q >= sv.num_qubits {
            return Err(QuantumError::RangeError { index: q as i64, limit: sv.num_qubits });
        }
    }

    let mut rng = match config.prng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let total_shots = config.shots;
    let mut histogram: HashMap<String, u64> = HashMap::new();

    log::debug!("sampling {} shot(s) over {} measured qubit(s)", total_shots, measured_qubits.len());

    for _ in 0..total_shots {
        let u: f64 = rng.random::<f64>();
        let k = match cdf.binary_search_by(|probe| probe.partial_cmp(&u).unwrap()) {
            Ok(idx) => idx,
            Err(idx) => idx.min(logical_size - 1),
        };
        let key = encode_outcome(k, &measured_qubits);
        *histogram.entry(key).or_insert(0) += 1;
    }

    Ok((histogram, total_shots))
}

/// MSB-first over the measured-qubit list (highest-indexed measured qubit
/// first), while `k` itself stays little-endian internally.
fn encode_outcome(k: usize, measured_qubits: &[usize]) -> String {
    measured_qubits.iter().rev().map(|&q| if (k >> q) & 1 == 1 { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_outcome_is_msb_first_over_measured_qubits() {
        assert_eq!(encode_outcome(0b10, &[0, 1]), "10");
        assert_eq!(encode_outcome(0b01, &[0, 1]), "01");
    }

    #[test]
    fn zero_shots_yields_empty_histogram() {
        let sv = StateVector::allocate(1).unwrap();
        let measured: HashMap<usize, usize> = [(0, 0)].into_iter().collect();
        let config = EngineConfig { shots: 0, ..EngineConfig::default() };
        let (hist, total) = sample(&sv, &measured, &config).unwrap();
        assert!(hist.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let mut sv = StateVector::allocate(1).unwrap();
        sv.real[0] = 0.0;
        sv.real[1] = 1.0; // |1>
        let measured: HashMap<usize, usize> = [(0, 0)].into_iter().collect();
        let config = EngineConfig { shots: 64, prng_seed: Some(7), ..EngineConfig::default() };
        let (hist_a, _) = sample(&sv, &measured, &config).unwrap();
        let (hist_b, _) = sample(&sv, &measured, &config).unwrap();
        assert_eq!(hist_a, hist_b);
        assert_eq!(hist_a.get("1"), Some(&64));
    }

    #[test]
    fn measured_qubit_out_of_range_is_range_error() {
        let sv = StateVector::allocate(2).unwrap();
        let measured: HashMap<usize, usize> = [(5, 0)].into_iter().collect();
        let config = EngineConfig::default();
        assert!(matches!(sample(&sv, &measured, &config), Err(QuantumError::RangeError { index: 5, limit: 2 })));
    }

    #[test]
    fn non_unit_norm_is_norm_error() {
        let mut sv = StateVector::allocate(1).unwrap();
        sv.real[0] = 2.0;
        let measured: HashMap<usize, usize> = [(0, 0)].into_iter().collect();
        let config = EngineConfig::default();
        assert!(matches!(sample(&sv, &measured, &config), Err(QuantumError::NormError { .. })));
    }
}

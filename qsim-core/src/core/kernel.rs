use crate::core::config::EngineConfig;
use crate::core::gates::Gate4;
use crate::core::slicing::{plan_slice_count, plan_slices};
use crate::core::statevector::StateVector;
use crate::core::sweep::for_each_slice_mut;
use crate::error::{QuantumError, QuantumResult};
use crate::maths::simd::{apply_single_qubit_block, Gate2};
use crate::Complex;
use std::sync::atomic::AtomicBool;

/// Applies a single-qubit gate to qubit `q`. Dispatches a parallel sweep
/// whose slice boundaries are aligned to `2^(q+1)`, so the `(k, k')`
/// partner pair a block update touches always lies inside one slice.
pub fn apply_single_qubit(
    sv: &mut StateVector,
    q: usize,
    gate: &Gate2,
    config: &EngineConfig,
    num_workers: usize,
    cancelled: &AtomicBool,
) -> QuantumResult<()> {
    if q >= sv.num_qubits {
        return Err(QuantumError::RangeError {
            index: q as i64,
            limit: sv.num_qubits.saturating_sub(1),
        });
    }

    let required_alignment_exp = (q + 1) as u32;
    let slice_count = plan_slice_count(sv.logical_size, sv.num_qubits, config.force_serial, num_workers, required_alignment_exp);
    let slice_len = sv.logical_size / slice_count;

    log::trace!("single-qubit gate on q={} over {} slice(s)", q, slice_count);

    let real = &mut sv.real[..sv.logical_size];
    let imag = &mut sv.imag[..sv.logical_size];

    for_each_slice_mut(real, imag, slice_len, cancelled, |_base, r, im| {
        apply_single_qubit_block(r, im, q, 0..r.len(), gate);
        Ok(())
    })
}

/// Applies a two-qubit gate over control `c` and target `t`. Slice
/// boundaries are aligned to `2^(max(c,t)+1)`.
pub fn apply_two_qubit(
    sv: &mut StateVector,
    c: usize,
    t: usize,
    gate: &Gate4,
    config: &EngineConfig,
    num_workers: usize,
    cancelled: &AtomicBool,
) -> QuantumResult<()> {
    if c >= sv.num_qubits {
        return Err(QuantumError::RangeError { index: c as i64, limit: sv.num_qubits.saturating_sub(1) });
    }
    if t >= sv.num_qubits {
        return Err(QuantumError::RangeError { index: t as i64, limit: sv.num_qubits.saturating_sub(1) });
    }

    let required_alignment_exp = (c.max(t) + 1) as u32;
    let slice_count = plan_slice_count(sv.logical_size, sv.num_qubits, config.force_serial, num_workers, required_alignment_exp);
    let slice_len = sv.logical_size / slice_count;

    log::trace!("two-qubit gate on c={} t={} over {} slice(s)", c, t, slice_count);

    let real = &mut sv.real[..sv.logical_size];
    let imag = &mut sv.imag[..sv.logical_size];

    for_each_slice_mut(real, imag, slice_len, cancelled, move |_base, r, im| {
        apply_two_qubit_block(r, im, c, t, gate);
        Ok(())
    })
}

/// For each local basis index with both `c` and `t` bits clear, mixes the
/// four partner amplitudes through `gate`'s 4x4 matrix.
fn apply_two_qubit_block(real: &mut [f64], imag: &mut [f64], c: usize, t: usize, gate: &Gate4) {
    let bit_c = 1usize << c;
    let bit_t = 1usize << t;
    let m = &gate.m;

    for k in 0..real.len() {
        if k & bit_c != 0 || k & bit_t != 0 {
            continue;
        }
        let idx = [k, k | bit_t, k | bit_c, k | bit_c | bit_t];
        let amps = [
            Complex::new(real[idx[0]], imag[idx[0]]),
            Complex::new(real[idx[1]], imag[idx[1]]),
            Complex::new(real[idx[2]], imag[idx[2]]),
            Complex::new(real[idx[3]], imag[idx[3]]),
        ];
        for row in 0..4 {
            let mut acc = Complex::ZERO;
            for (col, amp) in amps.iter().enumerate() {
                acc = acc + m[row][col] * *amp;
            }
            real[idx[row]] = acc.re;
            imag[idx[row]] = acc.im;
        }
    }
}

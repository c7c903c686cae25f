use crate::maths::simd::VLEN;

/// Below this amplitude count per slice, parallel overhead is assumed to
/// exceed the gain.
pub const MIN_PER_SLICE: usize = 1024;

/// Decides the slice count `S` (a power of two) for a sweep over
/// `logical_size` amplitudes. `required_alignment_exp` is the minimum
/// `log2` block size the calling kernel needs each slice boundary aligned
/// to: `q+1` for a single-qubit gate on qubit `q`, `max(c,t)+1` for a
/// two-qubit gate.
pub fn plan_slice_count(
    logical_size: usize,
    num_qubits: usize,
    force_serial: bool,
    num_workers: usize,
    required_alignment_exp: u32,
) -> usize {
    if force_serial {
        return 1;
    }
    if num_qubits <= 12 {
        return 1;
    }

    let mut s = largest_pow2_leq(num_workers.max(1));
    while s >= 2 && logical_size / s < MIN_PER_SLICE {
        s /= 2;
    }
    if s < 2 {
        return 1;
    }

    let align = (1usize << required_alignment_exp).max(VLEN);
    while s >= 2 {
        if (logical_size / s) % align == 0 {
            return s;
        }
        s /= 2;
    }
    1
}

/// Partitions `[0, logical_size)` into `slice_count` equal contiguous,
/// disjoint ranges. `logical_size` is always a power of two and
/// `slice_count` divides it evenly, so every slice is exactly the same
/// length. No remainder distribution is needed.
pub fn plan_slices(logical_size: usize, slice_count: usize) -> Vec<std::ops::Range<usize>> {
    let slice_len = logical_size / slice_count;
    (0..slice_count).map(|i| (i * slice_len)..((i + 1) * slice_len)).collect()
}

fn largest_pow2_leq(x: usize) -> usize {
    if x == 0 {
        return 1;
    }
    1usize << (usize::BITS - 1 - x.leading_zeros())
}

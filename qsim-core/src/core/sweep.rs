use crate::error::{QuantumError, QuantumResult};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs `body` once per contiguous chunk of `slice_len` amplitudes across
/// `real`/`imag`, in parallel when there is more than one chunk. `body`
/// receives the chunk's starting index plus its private `real`/`imag`
/// sub-slices. Chunks are disjoint by construction, so no synchronisation
/// between invocations is needed or permitted.
///
/// On the first chunk failure, rayon's `try_for_each` stops handing out new
/// chunks to idle workers and returns that error; chunks already in flight
/// run to completion rather than being interrupted mid-slice. Cancellation
/// is checked only at this fork-join boundary, never inside a chunk body.
pub fn for_each_slice_mut<F>(
    real: &mut [f64],
    imag: &mut [f64],
    slice_len: usize,
    cancelled: &AtomicBool,
    body: F,
) -> QuantumResult<()>
where
    F: Fn(usize, &mut [f64], &mut [f64]) -> QuantumResult<()> + Sync,
{
    if cancelled.load(Ordering::Relaxed) {
        return Err(QuantumError::CancelledError);
    }

    let slice_count = real.len() / slice_len;

    if slice_count <= 1 {
        return body(0, real, imag);
    }

    log::trace!("sweep: {} slices of {} amplitudes", slice_count, slice_len);

    real.par_chunks_mut(slice_len)
        .zip(imag.par_chunks_mut(slice_len))
        .enumerate()
        .try_for_each(|(i, (r, im))| body(i * slice_len, r, im))
        .map_err(|e| QuantumError::SweepError(Box::new(e)))
}

//! SIMD dispatch for the single-qubit gate sweep.
//!
//! The amplitude buffer is SoA (`real`/`imag`), so a gate block (the pair
//! of half-sized runs `[base, base+half)` and `[base+half, base+2·half)`)
//! is two *contiguous* f64 ranges once `half >= VLEN`. That lets the
//! vectorised paths load/store directly instead of gathering scattered
//! lanes.

use crate::Complex;
use std::ops::Range;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// Preferred SIMD lane count for `f64` this crate targets.
pub const VLEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdCapability {
    None,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    Avx2,
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    Avx512,
    #[cfg(target_arch = "aarch64")]
    Neon,
}

impl SimdCapability {
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        {
            if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512dq") {
                return SimdCapability::Avx512;
            }
            if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
                return SimdCapability::Avx2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            return SimdCapability::Neon;
        }

        #[allow(unreachable_code)]
        SimdCapability::None
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimdCapability::None => "scalar",
            #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
            SimdCapability::Avx2 => "AVX2+FMA",
            #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
            SimdCapability::Avx512 => "AVX-512",
            #[cfg(target_arch = "aarch64")]
            SimdCapability::Neon => "NEON",
        }
    }
}

pub fn get_simd_info() -> String {
    format!("SIMD: {}", SimdCapability::detect().name())
}

/// A 2x2 unitary, row-major.
#[derive(Debug, Clone, Copy)]
pub struct Gate2 {
    pub m: [[Complex; 2]; 2],
}

impl Gate2 {
    pub const fn new(m: [[Complex; 2]; 2]) -> Self {
        Gate2 { m }
    }
}

/// Applies `gate` to qubit `q` over the index range `slice` of a
/// `2^num_qubits`-length SoA amplitude buffer. `slice` must already be
/// aligned to `max(VLEN, 2^(q+1))` by the caller (the slicing planner);
/// this function does not re-check it.
pub fn apply_single_qubit_block(real: &mut [f64], imag: &mut [f64], q: usize, slice: Range<usize>, gate: &Gate2) {
    let half = 1usize << q;
    let block = half * 2;
    let cap = SimdCapability::detect();

    let mut base = slice.start;
    while base < slice.end {
        dispatch_block(real, imag, half, base, gate, cap);
        base += block;
    }
}

fn dispatch_block(
    real: &mut [f64],
    imag: &mut [f64],
    half: usize,
    base: usize,
    gate: &Gate2,
    cap: SimdCapability,
) {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        if cap == SimdCapability::Avx512 && half >= 8 {
            #[cfg(target_arch = "x86_64")]
            unsafe {
                apply_block_avx512(real, imag, half, base, gate);
            }
            return;
        }
        if (cap == SimdCapability::Avx512 || cap == SimdCapability::Avx2) && half >= 4 {
            #[cfg(target_arch = "x86_64")]
            unsafe {
                apply_block_avx2(real, imag, half, base, gate);
            }
            return;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if cap == SimdCapability::Neon && half >= 2 {
            unsafe {
                apply_block_neon(real, imag, half, base, gate);
            }
            return;
        }
    }

    let _ = cap;
    apply_block_scalar(real, imag, half, base, gate);
}

fn apply_block_scalar(real: &mut [f64], imag: &mut [f64], half: usize, base: usize, gate: &Gate2) {
    let m = &gate.m;
    for j in 0..half {
        let k = base + j;
        let kp = k + half;

        let a = Complex::new(real[k], imag[k]);
        let b = Complex::new(real[kp], imag[kp]);

        let new_a = m[0][0] * a + m[0][1] * b;
        let new_b = m[1][0] * a + m[1][1] * b;

        real[k] = new_a.re;
        imag[k] = new_a.im;
        real[kp] = new_b.re;
        imag[kp] = new_b.im;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn apply_block_avx2(real: &mut [f64], imag: &mut [f64], half: usize, base: usize, gate: &Gate2) {
    let m = &gate.m;
    let m00r = _mm256_set1_pd(m[0][0].re);
    let m00i = _mm256_set1_pd(m[0][0].im);
    let m01r = _mm256_set1_pd(m[0][1].re);
    let m01i = _mm256_set1_pd(m[0][1].im);
    let m10r = _mm256_set1_pd(m[1][0].re);
    let m10i = _mm256_set1_pd(m[1][0].im);
    let m11r = _mm256_set1_pd(m[1][1].re);
    let m11i = _mm256_set1_pd(m[1][1].im);

    let mut j = 0;
    while j < half {
        let k = base + j;
        let kp = k + half;

        let ar = _mm256_loadu_pd(real[k..].as_ptr());
        let ai = _mm256_loadu_pd(imag[k..].as_ptr());
        let br = _mm256_loadu_pd(real[kp..].as_ptr());
        let bi = _mm256_loadu_pd(imag[kp..].as_ptr());

        let na_re = _mm256_add_pd(
            _mm256_fmsub_pd(ar, m00r, _mm256_mul_pd(ai, m00i)),
            _mm256_fmsub_pd(br, m01r, _mm256_mul_pd(bi, m01i)),
        );
        let na_im = _mm256_add_pd(
            _mm256_fmadd_pd(ar, m00i, _mm256_mul_pd(ai, m00r)),
            _mm256_fmadd_pd(br, m01i, _mm256_mul_pd(bi, m01r)),
        );
        let nb_re = _mm256_add_pd(
            _mm256_fmsub_pd(ar, m10r, _mm256_mul_pd(ai, m10i)),
            _mm256_fmsub_pd(br, m11r, _mm256_mul_pd(bi, m11i)),
        );
        let nb_im = _mm256_add_pd(
            _mm256_fmadd_pd(ar, m10i, _mm256_mul_pd(ai, m10r)),
            _mm256_fmadd_pd(br, m11i, _mm256_mul_pd(bi, m11r)),
        );

        _mm256_storeu_pd(real[k..].as_mut_ptr(), na_re);
        _mm256_storeu_pd(imag[k..].as_mut_ptr(), na_im);
        _mm256_storeu_pd(real[kp..].as_mut_ptr(), nb_re);
        _mm256_storeu_pd(imag[kp..].as_mut_ptr(), nb_im);

        j += 4;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f", enable = "avx512dq")]
unsafe fn apply_block_avx512(real: &mut [f64], imag: &mut [f64], half: usize, base: usize, gate: &Gate2) {
    let m = &gate.m;
    let m00r = _mm512_set1_pd(m[0][0].re);
    let m00i = _mm512_set1_pd(m[0][0].im);
    let m01r = _mm512_set1_pd(m[0][1].re);
    let m01i = _mm512_set1_pd(m[0][1].im);
    let m10r = _mm512_set1_pd(m[1][0].re);
    let m10i = _mm512_set1_pd(m[1][0].im);
    let m11r = _mm512_set1_pd(m[1][1].re);
    let m11i = _mm512_set1_pd(m[1][1].im);

    let mut j = 0;
    while j < half {
        let k = base + j;
        let kp = k + half;

        let ar = _mm512_loadu_pd(real[k..].as_ptr());
        let ai = _mm512_loadu_pd(imag[k..].as_ptr());
        let br = _mm512_loadu_pd(real[kp..].as_ptr());
        let bi = _mm512_loadu_pd(imag[kp..].as_ptr());

        let na_re = _mm512_add_pd(
            _mm512_fmsub_pd(ar, m00r, _mm512_mul_pd(ai, m00i)),
            _mm512_fmsub_pd(br, m01r, _mm512_mul_pd(bi, m01i)),
        );
        let na_im = _mm512_add_pd(
            _mm512_fmadd_pd(ar, m00i, _mm512_mul_pd(ai, m00r)),
            _mm512_fmadd_pd(br, m01i, _mm512_mul_pd(bi, m01r)),
        );
        let nb_re = _mm512_add_pd(
            _mm512_fmsub_pd(ar, m10r, _mm512_mul_pd(ai, m10i)),
            _mm512_fmsub_pd(br, m11r, _mm512_mul_pd(bi, m11i)),
        );
        let nb_im = _mm512_add_pd(
            _mm512_fmadd_pd(ar, m10i, _mm512_mul_pd(ai, m10r)),
            _mm512_fmadd_pd(br, m11i, _mm512_mul_pd(bi, m11r)),
        );

        _mm512_storeu_pd(real[k..].as_mut_ptr(), na_re);
        _mm512_storeu_pd(imag[k..].as_mut_ptr(), na_im);
        _mm512_storeu_pd(real[kp..].as_mut_ptr(), nb_re);
        _mm512_storeu_pd(imag[kp..].as_mut_ptr(), nb_im);

        j += 8;
    }
}

#[cfg(target_arch = "aarch64")]
unsafe fn apply_block_neon(real: &mut [f64], imag: &mut [f64], half: usize, base: usize, gate: &Gate2) {
    let m = &gate.m;
    let m00r = vdupq_n_f64(m[0][0].re);
    let m00i = vdupq_n_f64(m[0][0].im);
    let m01r = vdupq_n_f64(m[0][1].re);
    let m01i = vdupq_n_f64(m[0][1].im);
    let m10r = vdupq_n_f64(m[1][0].re);
    let m10i = vdupq_n_f64(m[1][0].im);
    let m11r = vdupq_n_f64(m[1][1].re);
    let m11i = vdupq_n_f64(m[1][1].im);

    let mut j = 0;
    while j < half {
        let k = base + j;
        let kp = k + half;

        let ar = vld1q_f64(real[k..].as_ptr());
        let ai = vld1q_f64(imag[k..].as_ptr());
        let br = vld1q_f64(real[kp..].as_ptr());
        let bi = vld1q_f64(imag[kp..].as_ptr());

        let na_re = vaddq_f64(vfmsq_f64(vmulq_f64(ar, m00r), ai, m00i), vfmsq_f64(vmulq_f64(br, m01r), bi, m01i));
        let na_im = vaddq_f64(vfmaq_f64(vmulq_f64(ar, m00i), ai, m00r), vfmaq_f64(vmulq_f64(br, m01i), bi, m01r));
        let nb_re = vaddq_f64(vfmsq_f64(vmulq_f64(ar, m10r), ai, m10i), vfmsq_f64(vmulq_f64(br, m11r), bi, m11i));
        let nb_im = vaddq_f64(vfmaq_f64(vmulq_f64(ar, m10i), ai, m10r), vfmaq_f64(vmulq_f64(br, m11i), bi, m11r));

        vst1q_f64(real[k..].as_mut_ptr(), na_re);
        vst1q_f64(imag[k..].as_mut_ptr(), na_im);
        vst1q_f64(real[kp..].as_mut_ptr(), nb_re);
        vst1q_f64(imag[kp..].as_mut_ptr(), nb_im);

        j += 2;
    }
}

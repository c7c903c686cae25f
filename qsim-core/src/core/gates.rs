use crate::error::{QuantumError, QuantumResult};
use crate::maths::simd::Gate2;
use crate::Complex;
use lazy_static::lazy_static;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::sync::Arc;

use crate::core::custom_gate::CustomGate;

/// Stable tag for a fixed or parametrised gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateTag {
    H,
    X,
    Y,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    Cx,
    Cz,
    Swap,
    Rx,
    Ry,
    Rz,
}

const FIXED_TAGS: &[GateTag] = &[
    GateTag::H,
    GateTag::X,
    GateTag::Y,
    GateTag::Z,
    GateTag::S,
    GateTag::Sdg,
    GateTag::T,
    GateTag::Tdg,
    GateTag::Cx,
    GateTag::Cz,
    GateTag::Swap,
];

const ROTATION_TAGS: &[GateTag] = &[GateTag::Rx, GateTag::Ry, GateTag::Rz];

/// A gate value: a fixed unitary, a parametrised rotation, or a custom
/// unitary supplied by the caller.
#[derive(Debug, Clone)]
pub enum Gate {
    Fixed(GateTag),
    Rotation(GateTag, f64),
    Custom(Arc<CustomGate>),
}

impl Gate {
    /// Constructs a fixed-gate value. Fails with `KindError` if `tag` names
    /// a rotation.
    pub fn fixed(tag: GateTag) -> QuantumResult<Gate> {
        if FIXED_TAGS.contains(&tag) {
            Ok(Gate::Fixed(tag))
        } else {
            Err(QuantumError::KindError {
                reason: format!("{:?} is a rotation tag, not a fixed gate", tag),
            })
        }
    }

    /// Constructs a rotation value. Fails with `KindError` if `tag` names a
    /// fixed gate.
    pub fn rotation(tag: GateTag, theta: f64) -> QuantumResult<Gate> {
        if ROTATION_TAGS.contains(&tag) {
            Ok(Gate::Rotation(tag, theta))
        } else {
            Err(QuantumError::KindError {
                reason: format!("{:?} is a fixed tag, not a rotation", tag),
            })
        }
    }

}

/// A 4x4 unitary over a two-qubit local subspace, basis-ordered
/// `(bit_control, bit_target)` as `00, 01, 10, 11`.
#[derive(Debug, Clone, Copy)]
pub struct Gate4 {
    pub m: [[Complex; 4]; 4],
}

impl Gate4 {
    pub const fn new(m: [[Complex; 4]; 4]) -> Self {
        Gate4 { m }
    }
}

lazy_static! {
    pub static ref HADAMARD: Gate2 = Gate2::new([
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]);
    pub static ref PAULI_X: Gate2 = Gate2::new([
        [Complex::ZERO, Complex::ONE],
        [Complex::ONE, Complex::ZERO],
    ]);
    pub static ref PAULI_Y: Gate2 = Gate2::new([
        [Complex::ZERO, Complex::new(0.0, -1.0)],
        [Complex::new(0.0, 1.0), Complex::ZERO],
    ]);
    pub static ref PAULI_Z: Gate2 = Gate2::new([
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::new(-1.0, 0.0)],
    ]);
    pub static ref S_GATE: Gate2 = Gate2::new([
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::I],
    ]);
    pub static ref SDG_GATE: Gate2 = Gate2::new([
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::new(0.0, -1.0)],
    ]);
    pub static ref T_GATE: Gate2 = Gate2::new([
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::from_polar(1.0, FRAC_PI_4)],
    ]);
    pub static ref TDG_GATE: Gate2 = Gate2::new([
        [Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::from_polar(1.0, -FRAC_PI_4)],
    ]);

    /// CX, local basis order `00,01,10,11`: flips the target bit.
    pub static ref CX_MATRIX: Gate4 = Gate4::new([
        [Complex::ONE, Complex::ZERO, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ONE, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ZERO, Complex::ZERO, Complex::ONE],
        [Complex::ZERO, Complex::ZERO, Complex::ONE, Complex::ZERO],
    ]);
    /// CZ: phases the `11` amplitude by -1.
    pub static ref CZ_MATRIX: Gate4 = Gate4::new([
        [Complex::ONE, Complex::ZERO, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ONE, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ZERO, Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::ZERO, Complex::ZERO, Complex::new(-1.0, 0.0)],
    ]);
    /// SWAP: exchanges the `01` and `10` amplitudes.
    pub static ref SWAP_MATRIX: Gate4 = Gate4::new([
        [Complex::ONE, Complex::ZERO, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ZERO, Complex::ONE, Complex::ZERO],
        [Complex::ZERO, Complex::ONE, Complex::ZERO, Complex::ZERO],
        [Complex::ZERO, Complex::ZERO, Complex::ZERO, Complex::ONE],
    ]);
}

/// Closed-form single-qubit rotations, computed once per call and cached
/// by the caller for the lifetime of the gate value.
pub fn rx_matrix(theta: f64) -> Gate2 {
    let (s, c) = (theta / 2.0).sin_cos();
    Gate2::new([
        [Complex::new(c, 0.0), Complex::new(0.0, -s)],
        [Complex::new(0.0, -s), Complex::new(c, 0.0)],
    ])
}

pub fn ry_matrix(theta: f64) -> Gate2 {
    let (s, c) = (theta / 2.0).sin_cos();
    Gate2::new([
        [Complex::new(c, 0.0), Complex::new(-s, 0.0)],
        [Complex::new(s, 0.0), Complex::new(c, 0.0)],
    ])
}

pub fn rz_matrix(theta: f64) -> Gate2 {
    Gate2::new([
        [Complex::from_polar(1.0, -theta / 2.0), Complex::ZERO],
        [Complex::ZERO, Complex::from_polar(1.0, theta / 2.0)],
    ])
}

/// Resolves a fixed single-qubit tag to its constant matrix. Fails with
/// `KindError` for two-qubit tags (handled instead by [`fixed_matrix4`]).
pub fn fixed_matrix2(tag: GateTag) -> QuantumResult<Gate2> {
    match tag {
        GateTag::H => Ok(*HADAMARD),
        GateTag::X => Ok(*PAULI_X),
        GateTag::Y => Ok(*PAULI_Y),
        GateTag::Z => Ok(*PAULI_Z),
        GateTag::S => Ok(*S_GATE),
        GateTag::Sdg => Ok(*SDG_GATE),
        GateTag::T => Ok(*T_GATE),
        GateTag::Tdg => Ok(*TDG_GATE),
        other => Err(QuantumError::KindError {
            reason: format!("{:?} is not a single-qubit fixed gate", other),
        }),
    }
}

/// Resolves a fixed two-qubit tag to its constant matrix.
pub fn fixed_matrix4(tag: GateTag) -> QuantumResult<Gate4> {
    match tag {
        GateTag::Cx => Ok(*CX_MATRIX),
        GateTag::Cz => Ok(*CZ_MATRIX),
        GateTag::Swap => Ok(*SWAP_MATRIX),
        other => Err(QuantumError::KindError {
            reason: format!("{:?} is not a two-qubit fixed gate", other),
        }),
    }
}

/// Resolves a rotation tag + angle to its closed-form matrix.
pub fn rotation_matrix2(tag: GateTag, theta: f64) -> QuantumResult<Gate2> {
    match tag {
        GateTag::Rx => Ok(rx_matrix(theta)),
        GateTag::Ry => Ok(ry_matrix(theta)),
        GateTag::Rz => Ok(rz_matrix(theta)),
        other => Err(QuantumError::KindError {
            reason: format!("{:?} is not a rotation tag", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_mul(a: &[[Complex; 2]; 2], b: &[[Complex; 2]; 2]) -> [[Complex; 2]; 2] {
        let mut out = [[Complex::ZERO; 2]; 2];
        for i in 0..2 {
            for j in 0..2 {
                let mut acc = Complex::ZERO;
                for k in 0..2 {
                    acc = acc + a[i][k] * b[k][j];
                }
                out[i][j] = acc;
            }
        }
        out
    }

    fn dagger(m: &[[Complex; 2]; 2]) -> [[Complex; 2]; 2] {
        [[m[0][0].conj(), m[1][0].conj()], [m[0][1].conj(), m[1][1].conj()]]
    }

    fn assert_identity(m: &[[Complex; 2]; 2]) {
        let id = [[Complex::ONE, Complex::ZERO], [Complex::ZERO, Complex::ONE]];
        for i in 0..2 {
            for j in 0..2 {
                assert!((m[i][j].re - id[i][j].re).abs() < 1e-10);
                assert!((m[i][j].im - id[i][j].im).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn fixed_gates_are_unitary() {
        for g in [&*HADAMARD, &*PAULI_X, &*PAULI_Y, &*PAULI_Z, &*S_GATE, &*SDG_GATE, &*T_GATE, &*TDG_GATE] {
            assert_identity(&mat_mul(&dagger(&g.m), &g.m));
        }
    }

    #[test]
    fn rotations_are_unitary_at_sample_angles() {
        use std::f64::consts::PI;
        for theta in [0.0, PI / 4.0, PI / 2.0, PI, 2.0 * PI] {
            for m in [rx_matrix(theta).m, ry_matrix(theta).m, rz_matrix(theta).m] {
                assert_identity(&mat_mul(&dagger(&m), &m));
            }
        }
    }

    #[test]
    fn h_x_z_swap_are_involutions() {
        assert_identity(&mat_mul(&HADAMARD.m, &HADAMARD.m));
        assert_identity(&mat_mul(&PAULI_X.m, &PAULI_X.m));
        assert_identity(&mat_mul(&PAULI_Z.m, &PAULI_Z.m));
    }

    #[test]
    fn pauli_algebra_holds() {
        let xy = mat_mul(&PAULI_X.m, &PAULI_Y.m);
        let iz = [[Complex::new(0.0, 1.0) * PAULI_Z.m[0][0], Complex::ZERO], [Complex::ZERO, Complex::new(0.0, 1.0) * PAULI_Z.m[1][1]]];
        for i in 0..2 {
            for j in 0..2 {
                assert!((xy[i][j].re - iz[i][j].re).abs() < 1e-10);
                assert!((xy[i][j].im - iz[i][j].im).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn s_squared_is_z_t_squared_is_s_t_to_the_4_is_z() {
        let s2 = mat_mul(&S_GATE.m, &S_GATE.m);
        let t2 = mat_mul(&T_GATE.m, &T_GATE.m);
        let t4 = mat_mul(&t2, &t2);
        for i in 0..2 {
            for j in 0..2 {
                assert!((s2[i][j].re - PAULI_Z.m[i][j].re).abs() < 1e-10);
                assert!((s2[i][j].im - PAULI_Z.m[i][j].im).abs() < 1e-10);
                assert!((t2[i][j].re - S_GATE.m[i][j].re).abs() < 1e-10);
                assert!((t4[i][j].re - PAULI_Z.m[i][j].re).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn rx_pi_is_minus_i_x_up_to_global_phase() {
        use std::f64::consts::PI;
        let m = rx_matrix(PI).m;
        // RX(pi) = -i X exactly (no free global phase left to absorb)
        assert!((m[0][1].im - (-1.0)).abs() < 1e-10);
        assert!((m[1][0].im - (-1.0)).abs() < 1e-10);
        assert!(m[0][0].re.abs() < 1e-10 && m[1][1].re.abs() < 1e-10);
    }

    #[test]
    fn fixed_from_rotation_tag_is_kind_error() {
        assert!(matches!(Gate::fixed(GateTag::Rx), Err(QuantumError::KindError { .. })));
    }

    #[test]
    fn rotation_from_fixed_tag_is_kind_error() {
        assert!(matches!(Gate::rotation(GateTag::H, 0.0), Err(QuantumError::KindError { .. })));
    }
}

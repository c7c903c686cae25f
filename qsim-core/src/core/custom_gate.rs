use crate::core::gates::Gate4;
use crate::error::{QuantumError, QuantumResult};
use crate::maths::simd::Gate2;
use crate::Complex;

/// A caller-supplied unitary matrix gate, generalised from the closed-form
/// gate set (not excluded by any Non-goal). Unlike the fixed/rotation
/// tags, arity is carried by the variant rather than validated against a
/// tag table.
#[derive(Debug, Clone)]
pub enum CustomGate {
    Single([[Complex; 2]; 2]),
    Two([[Complex; 4]; 4]),
}

impl CustomGate {
    pub fn single(m: [[Complex; 2]; 2]) -> Self {
        CustomGate::Single(m)
    }

    pub fn two(m: [[Complex; 4]; 4]) -> Self {
        CustomGate::Two(m)
    }

    pub fn arity(&self) -> usize {
        match self {
            CustomGate::Single(_) => 1,
            CustomGate::Two(_) => 2,
        }
    }

    pub fn matrix2(&self) -> QuantumResult<Gate2> {
        match self {
            CustomGate::Single(m) => Ok(Gate2::new(*m)),
            CustomGate::Two(_) => Err(QuantumError::KindError {
                reason: "custom gate is two-qubit, not single-qubit".into(),
            }),
        }
    }

    pub fn matrix4(&self) -> QuantumResult<Gate4> {
        match self {
            CustomGate::Two(m) => Ok(Gate4::new(*m)),
            CustomGate::Single(_) => Err(QuantumError::KindError {
                reason: "custom gate is single-qubit, not two-qubit".into(),
            }),
        }
    }

    /// Checks `G^dagger G = I` to `tol`. All gate matrices must be unitary.
    pub fn is_unitary(&self, tol: f64) -> bool {
        match self {
            CustomGate::Single(m) => unitary2(m, tol),
            CustomGate::Two(m) => unitary4(m, tol),
        }
    }
}

fn unitary2(m: &[[Complex; 2]; 2], tol: f64) -> bool {
    let dagger = [[m[0][0].conj(), m[1][0].conj()], [m[0][1].conj(), m[1][1].conj()]];
    let mut prod = [[Complex::ZERO; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            let mut acc = Complex::ZERO;
            for k in 0..2 {
                acc = acc + dagger[i][k] * m[k][j];
            }
            prod[i][j] = acc;
        }
    }
    is_identity2(&prod, tol)
}

fn unitary4(m: &[[Complex; 4]; 4], tol: f64) -> bool {
    let mut dagger = [[Complex::ZERO; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            dagger[i][j] = m[j][i].conj();
        }
    }
    let mut prod = [[Complex::ZERO; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            let mut acc = Complex::ZERO;
            for k in 0..4 {
                acc = acc + dagger[i][k] * m[k][j];
            }
            prod[i][j] = acc;
        }
    }
    is_identity4(&prod, tol)
}

fn is_identity2(m: &[[Complex; 2]; 2], tol: f64) -> bool {
    for i in 0..2 {
        for j in 0..2 {
            let expect = if i == j { 1.0 } else { 0.0 };
            if (m[i][j].re - expect).abs() > tol || m[i][j].im.abs() > tol {
                return false;
            }
        }
    }
    true
}

fn is_identity4(m: &[[Complex; 4]; 4], tol: f64) -> bool {
    for i in 0..4 {
        for j in 0..4 {
            let expect = if i == j { 1.0 } else { 0.0 };
            if (m[i][j].re - expect).abs() > tol || m[i][j].im.abs() > tol {
                return false;
            }
        }
    }
    true
}

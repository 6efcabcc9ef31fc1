//! Single-qubit matrices.
//!
//! Only the handful of matrices the gate set lowers to live here, plus the
//! eigendecomposition used to take roots of a target gate when a
//! multi-controlled unitary is split into controlled rotations.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A 2x2 matrix stored row-major as `[u00, u01, u10, u11]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unitary2x2 {
    pub data: [Complex64; 4],
}

/// An eigenvalue and its unit eigenvector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPair {
    pub value: Complex64,
    pub vector: [Complex64; 2],
}

impl Unitary2x2 {
    pub fn new(u00: Complex64, u01: Complex64, u10: Complex64, u11: Complex64) -> Self {
        Self {
            data: [u00, u01, u10, u11],
        }
    }

    pub fn from_real(u00: f64, u01: f64, u10: f64, u11: f64) -> Self {
        Self {
            data: [u00, u01, u10, u11].map(Complex64::from),
        }
    }

    fn diagonal(upper: Complex64, lower: Complex64) -> Self {
        Self::new(upper, ZERO, ZERO, lower)
    }

    /// `cos(θ/2)·I - i·sin(θ/2)·[[0, upper], [lower, 0]]`.
    fn half_turn(theta: f64, upper: Complex64, lower: Complex64) -> Self {
        let (sin, cos) = (theta / 2.0).sin_cos();
        let minus_i_sin = -I * sin;
        Self::new(cos.into(), minus_i_sin * upper, minus_i_sin * lower, cos.into())
    }

    pub fn identity() -> Self {
        Self::diagonal(ONE, ONE)
    }

    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    pub fn z() -> Self {
        Self::diagonal(ONE, -ONE)
    }

    pub fn h() -> Self {
        let r = std::f64::consts::FRAC_1_SQRT_2;
        Self::from_real(r, r, r, -r)
    }

    /// Phase gate `diag(1, e^{iλ})`.
    pub fn p(lambda: f64) -> Self {
        Self::diagonal(ONE, Complex64::from_polar(1.0, lambda))
    }

    /// `P(π/2)`, the square root of Z.
    pub fn s() -> Self {
        Self::p(FRAC_PI_2)
    }

    /// Rotation about X by `theta`.
    pub fn rx(theta: f64) -> Self {
        Self::half_turn(theta, ONE, ONE)
    }

    /// Rotation about Y by `theta`.
    pub fn ry(theta: f64) -> Self {
        Self::half_turn(theta, -I, I)
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    pub fn determinant(&self) -> Complex64 {
        let [a, b, c, d] = self.data;
        a * d - b * c
    }

    pub fn is_unitary(&self) -> bool {
        self.mul(&self.dagger())
            .approx_eq(&Self::identity(), EPSILON * 100.0)
    }

    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Both eigenpairs, or `None` when the eigenvalues coincide.
    pub fn eigen_decomposition(&self) -> Option<[EigenPair; 2]> {
        let [a, b, c, d] = self.data;
        let trace = a + d;
        let discriminant = (trace * trace - 4.0 * self.determinant()).sqrt();
        if discriminant.norm() < EPSILON {
            return None;
        }

        let eigenpair = |value: Complex64| {
            let raw = if b.norm() > EPSILON {
                [b, value - a]
            } else if c.norm() > EPSILON {
                [value - d, c]
            } else if (value - a).norm() <= (value - d).norm() {
                [ONE, ZERO]
            } else {
                [ZERO, ONE]
            };
            let norm = raw[0].norm().hypot(raw[1].norm());
            EigenPair {
                value,
                vector: raw.map(|v| v / norm),
            }
        };

        Some([
            eigenpair((trace + discriminant) / 2.0),
            eigenpair((trace - discriminant) / 2.0),
        ])
    }

    /// The principal `root`-th root, `Σ λ^(1/root) · v v†`.
    ///
    /// `None` for matrices with a repeated eigenvalue.
    pub fn fractional_power(&self, root: f64) -> Option<Self> {
        let exponent = root.abs().recip();
        let data = self.eigen_decomposition()?.into_iter().fold(
            [ZERO; 4],
            |mut acc, EigenPair { value, vector: [v0, v1] }| {
                let scale = value.powf(exponent);
                acc[0] += scale * v0 * v0.conj();
                acc[1] += scale * v0 * v1.conj();
                acc[2] += scale * v1 * v0.conj();
                acc[3] += scale * v1 * v1.conj();
                acc
            },
        );
        Some(Self { data })
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Unitary2x2::mul(&self, &rhs)
    }
}

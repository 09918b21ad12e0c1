//! Fixed-dimension vector algebra for the simulation.
//!
//! `Vector<D>` is a thin, immutable value type over `nalgebra::SVector<f64, D>`.
//! The dimension is a type parameter, so two vectors of different arity can
//! never meet in an arithmetic operation. The only place where arity is
//! checked at runtime is [`Vector::from_slice`], which is how untyped data
//! (YAML, user input) enters the typed world.
//!
//! Every operation returns a new vector; nothing mutates its operands.
//! Addition, subtraction and scaling are the `+`, `-` and `*` operators.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use nalgebra::SVector;

use crate::error::{Error, Result};

/// 2D instantiation used by the default scenarios
pub type Vec2 = Vector<2>;
/// 3D instantiation
pub type Vec3 = Vector<3>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const D: usize>(SVector<f64, D>);

impl<const D: usize> Vector<D> {
    /// Build from a fixed-size array (arity checked by the compiler)
    pub fn new(components: [f64; D]) -> Self {
        Self(SVector::from(components))
    }

    /// Build from an untyped slice, rejecting any slice whose length is not `D`
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        if components.len() != D {
            return Err(Error::DimensionMismatch {
                expected: D,
                found: components.len(),
            });
        }
        Ok(Self(SVector::from_column_slice(components)))
    }

    pub fn zeros() -> Self {
        Self(SVector::zeros())
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Divide by `k`; a zero divisor is reported instead of producing inf/NaN
    pub fn div(&self, k: f64) -> Result<Self> {
        if k == 0.0 {
            return Err(Error::DivideByZero);
        }
        Ok(Self(self.0 / k))
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.0.norm_squared()
    }

    /// Unit vector in the same direction
    ///
    /// Errors:
    /// - `Error::DegenerateVector` if the magnitude is zero
    pub fn unit(&self) -> Result<Self> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(Error::DegenerateVector);
        }
        Ok(Self(self.0 / m))
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Self) -> Self {
        Self((self.0 + other.0) * 0.5)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0.0)
    }
}

impl Vector<2> {
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// z component of the 3D cross product of two in-plane vectors
    pub fn cross(&self, other: &Self) -> f64 {
        self.0[0] * other.0[1] - self.0[1] * other.0[0]
    }
}

impl Vector<3> {
    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(&other.0))
    }
}

impl<const D: usize> Default for Vector<D> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const D: usize> From<[f64; D]> for Vector<D> {
    fn from(components: [f64; D]) -> Self {
        Self::new(components)
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self(self.0 * k)
    }
}

impl<const D: usize> Mul<Vector<D>> for f64 {
    type Output = Vector<D>;

    fn mul(self, v: Vector<D>) -> Vector<D> {
        Vector(v.0 * self)
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl<const D: usize> fmt::Display for Vector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.4}")?;
        }
        write!(f, ")")
    }
}

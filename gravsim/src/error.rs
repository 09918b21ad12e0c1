use thiserror::Error;

use crate::simulation::body::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core and its configuration layer.
///
/// The vector and body variants are contract violations: a caller that hits
/// one has a bug. Nothing in the core retries or swallows them.
#[derive(Debug, Error)]
pub enum Error {
    /// Untyped component data did not match the vector dimension.
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Scalar division by zero.
    #[error("division of a vector by zero")]
    DivideByZero,

    /// Unit vector requested for a zero-magnitude vector.
    #[error("degenerate vector: zero magnitude has no direction")]
    DegenerateVector,

    /// Body mass was zero, negative or not finite.
    #[error("invalid mass {0}: must be finite and > 0")]
    InvalidMass(f64),

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A body id was inserted twice into the same world.
    #[error("duplicate body id {0}")]
    DuplicateId(BodyId),

    /// A merge or lookup referenced a body that is not live.
    #[error("body {0} is not in the live set")]
    UnknownBody(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

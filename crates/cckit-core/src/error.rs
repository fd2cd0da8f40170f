use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplineError {
    #[error("Invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("Geometry error: {0}")]
    Geometry(String),
}

pub type Result<T> = std::result::Result<T, SplineError>;

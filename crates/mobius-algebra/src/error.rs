/// An error type for the algebra module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AlgebraError {
    /// The matrix has a zero determinant and cannot be inverted.
    #[error("Matrix is singular (|det| = {0:e})")]
    SingularMatrix(f64),
}

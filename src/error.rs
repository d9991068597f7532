use ndarray::Array1;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuadProgError<F: Debug> {
    #[error("The equality constraints are linearly dependent, so no point can satisfy all of them at once.")]
    RedundantEqualities,
    #[error("The dual problem is unbounded, meaning the problem is infeasible: no point satisfies all constraints.")]
    Unbounded,
    #[error("The solver encountered numerical problems it could not recover from. Likely causes are a Hessian that is not positive definite or constraints whose scale differs by multiple orders of magnitude.")]
    NumericalProblem,
    #[error("A parameter was set to an invalid value: {0}")]
    InvalidParameter(&'static str),
    #[error("The dimensions of your Hessian, gradient and constraint arrays do not align.")]
    IncompatibleInputDimensions,
    #[error("The solver failed to converge within the maximum number of iterations. Best solution after the final iteration:\n{0:#?}")]
    IterationLimitExceeded(Array1<F>),
}

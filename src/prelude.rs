#[doc(no_inline)]
pub use crate::error::QuadProgError;
#[doc(no_inline)]
pub use crate::quadratic_program::Problem;
#[doc(no_inline)]
pub use crate::solvers::dual_active_set::DualActiveSet;
#[doc(no_inline)]
pub use crate::solvers::ActiveConstraint;
#[doc(no_inline)]
pub use crate::solvers::Solver;

//! # Tenor Math
//!
//! Numerical building blocks for the Tenor credit analytics library.
//!
//! - **Solvers**: Brent, a hybrid Newton/Brent solver used by the yield
//!   curve bootstrap and a bracketed (safeguarded) Newton used by the credit
//!   curve bootstrap
//! - **Functions**: the ε-family `(eˣ − 1)/x` and its derivatives, evaluated
//!   without cancellation near zero
//!
//! Everything here works on plain `f64` closures so that callers can pass
//! analytic derivatives alongside the objective.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod functions;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::functions::{epsilon, epsilon_p, epsilon_pp};
    pub use crate::solvers::{
        brent, expand_upper_bracket, hybrid, newton_bracketed, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};

pub mod calc_engine;
pub mod history;

pub use calc_engine::{calculate, calculate_traced, EvalError};

//! Infix expression evaluation in three passes: tokenize, reorder into
//! postfix with the shunting-yard algorithm, then reduce on a value stack.

mod error;
mod evaluator;
mod format;
mod shunting_yard;
mod token;
mod tokenizer;

pub use error::EvalError;
pub use evaluator::{evaluate_postfix, evaluate_postfix_traced, EvaluationTrace, Step};
pub use format::{format_number, format_with_spaces, render_postfix};
pub use shunting_yard::reorder;
pub use token::{Assoc, BinOp, Function, Operator, Token, OPERATOR_TABLE};
pub use tokenizer::tokenize;

/// Evaluates `expression`, returning the first error any pass runs into.
pub fn calculate(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    let postfix = reorder(tokens)?;
    evaluate_postfix(postfix)
}

/// Like [`calculate`], filling `trace` with the postfix form and each
/// intermediate step when it is in detailed mode.
pub fn calculate_traced(expression: &str, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    let postfix = reorder(tokens)?;
    if trace.detailed_mode {
        trace.postfix = Some(render_postfix(&postfix));
    }
    evaluate_postfix_traced(postfix, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn traced_run_matches_plain_run() {
        let expr = "sqrt((((9*9)/12)+(13-4))*2)^2";
        let mut trace = EvaluationTrace::new(true);
        let traced = calculate_traced(expr, &mut trace).unwrap();

        assert_eq!(traced.to_bits(), calculate(expr).unwrap().to_bits());
        assert_eq!(
            trace.postfix.as_deref(),
            Some("9 9 * 12 / 13 4 - + 2 * sqrt 2 ^")
        );
        assert_eq!(trace.steps.len(), 7);
    }

    #[test]
    fn failing_pass_short_circuits() {
        let mut trace = EvaluationTrace::new(true);
        assert_eq!(
            calculate_traced("(1 + 2", &mut trace),
            Err(EvalError::MismatchedParenthesis)
        );
        assert!(trace.postfix.is_none());
        assert!(trace.steps.is_empty());
    }
}

use super::error::EvalError;
use super::format::format_number;
use super::token::{BinOp, Function, Operator, Token};

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operation: String,
    pub result: f64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub postfix: Option<String>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            postfix: None,
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        log::trace!("{} = {}", operation, result);
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

fn apply_function(func: Function, operand: f64) -> Result<f64, EvalError> {
    match func {
        Function::Sqrt => {
            if operand < 0.0 {
                return Err(EvalError::NegativeSquareRoot);
            }
            // sqrt(-0.0) is -0.0; the root is always reported non-negative
            Ok(operand.sqrt().abs())
        }
    }
}

fn apply_operator(op: &Operator, left: f64, right: f64) -> Result<f64, EvalError> {
    Ok(match op.op {
        BinOp::Add => left + right,
        BinOp::Sub => left - right,
        BinOp::Mul => left * right,
        BinOp::Div => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
        BinOp::Pow => left.powf(right),
    })
}

/// Reduces a postfix token sequence to a single value.
pub fn evaluate_postfix(tokens: Vec<Token>) -> Result<f64, EvalError> {
    evaluate_postfix_traced(tokens, &mut EvaluationTrace::new(false))
}

/// Same as [`evaluate_postfix`], recording every applied operation in `trace`.
pub fn evaluate_postfix_traced(
    tokens: Vec<Token>,
    trace: &mut EvaluationTrace,
) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(n) => stack.push(n),
            Token::Function(func) => {
                let operand = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let result = apply_function(func, operand)?;
                trace.add_step(
                    format!("{}({})", func.name(), format_number(operand)),
                    result,
                );
                stack.push(result);
            }
            Token::Operator(op) => {
                let right = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let left = stack.pop().ok_or(EvalError::MalformedExpression)?;
                let result = apply_operator(&op, left, right)?;
                trace.add_step(
                    format!("{} {} {}", format_number(left), op.sym, format_number(right)),
                    result,
                );
                stack.push(result);
            }
            Token::LeftParen | Token::RightParen => return Err(EvalError::MalformedExpression),
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::MalformedExpression),
    }
}

/// Everything that can go wrong while turning an expression into a number.
///
/// All variants describe bad input; none of them are engine faults. The
/// `Display` text is what front-ends show to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("Expression cannot be empty")]
    EmptyExpression,

    #[error("Invalid character found in expression: '{0}'")]
    InvalidCharacter(char),

    #[error("Malformed number: '{0}'")]
    MalformedNumber(String),

    #[error("Unknown function: '{0}'")]
    UnknownFunction(String),

    #[error("Invalid expression: stray negative sign")]
    StrayNegativeSign,

    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,

    #[error("Invalid expression format")]
    MalformedExpression,

    #[error("Square root of negative number is not allowed")]
    NegativeSquareRoot,

    #[error("Division by zero is not allowed")]
    DivisionByZero,
}

use super::error::EvalError;
use super::token::Token;

/// Reorders infix tokens into postfix (reverse Polish) order.
///
/// A `sqrt` waiting on the stack is emitted as soon as the parenthesised
/// group right after it closes.
pub fn reorder(tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Function(_) | Token::LeftParen => stack.push(token),
            Token::RightParen => {
                loop {
                    match stack.pop() {
                        None => return Err(EvalError::MismatchedParenthesis),
                        Some(Token::LeftParen) => break,
                        Some(top) => output.push(top),
                    }
                }

                if let Some(Token::Function(_)) = stack.last() {
                    output.extend(stack.pop());
                }
            }
            Token::Operator(incoming) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if !top.pops_before(&incoming) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        match top {
            Token::LeftParen | Token::RightParen => {
                return Err(EvalError::MismatchedParenthesis)
            }
            _ => output.push(top),
        }
    }

    log::debug!("reordered into {} postfix tokens", output.len());
    Ok(output)
}

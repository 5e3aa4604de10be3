use std::iter::Peekable;
use std::str::Chars;

use super::error::EvalError;
use super::token::{Function, Operator, Token};

fn is_number_component(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

// A '-' is a sign rather than a subtraction when nothing has been produced
// yet or when it follows an operator or an opening parenthesis.
fn starts_operand(previous: Option<&Token>) -> bool {
    matches!(previous, None | Some(Token::Operator(_)) | Some(Token::LeftParen))
}

fn take_while(chars: &mut Peekable<Chars<'_>>, predicate: fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(&ch) = chars.peek() {
        if !predicate(ch) {
            break;
        }
        taken.push(ch);
        chars.next();
    }
    taken
}

fn parse_number(text: &str) -> Result<Token, EvalError> {
    text.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| EvalError::MalformedNumber(text.to_string()))
}

/// Splits an infix expression into tokens.
///
/// ASCII whitespace is dropped before scanning, so `"1 000"` reads as `1000`.
/// Negative literals are folded into a single `Number` token.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    if expression.trim_matches(|c: char| c.is_ascii_whitespace()).is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let stripped: String = expression
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let mut tokens = Vec::new();
    let mut chars = stripped.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::LeftParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RightParen);
                chars.next();
            }
            '-' if starts_operand(tokens.last()) => {
                chars.next();
                let digits = take_while(&mut chars, is_number_component);
                if digits.is_empty() {
                    return Err(EvalError::StrayNegativeSign);
                }
                tokens.push(parse_number(&format!("-{}", digits))?);
            }
            c if is_number_component(c) => {
                let digits = take_while(&mut chars, is_number_component);
                tokens.push(parse_number(&digits)?);
            }
            c if c.is_ascii_alphabetic() => {
                let name = take_while(&mut chars, |ch| ch.is_ascii_alphabetic());
                match Function::from_name(&name) {
                    Some(func) => tokens.push(Token::Function(func)),
                    None => return Err(EvalError::UnknownFunction(name)),
                }
            }
            c => match Operator::from_symbol(c) {
                Some(op) => {
                    tokens.push(Token::Operator(op));
                    chars.next();
                }
                None => return Err(EvalError::InvalidCharacter(c)),
            },
        }
    }

    log::debug!("tokenized {:?} into {} tokens", expression, tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn op(sym: char) -> Token {
        Token::Operator(Operator::from_symbol(sym).unwrap())
    }

    #[test]
    fn splits_numbers_operators_and_parens() {
        assert_eq!(
            tokenize("2 * (3.5 + 4)").unwrap(),
            vec![
                Token::Number(2.0),
                op('*'),
                Token::LeftParen,
                Token::Number(3.5),
                op('+'),
                Token::Number(4.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn whitespace_is_stripped_before_scanning() {
        assert_eq!(tokenize(" 1 000\t").unwrap(), vec![Token::Number(1000.0)]);
    }

    #[test]
    fn blank_input_is_empty_expression() {
        assert_eq!(tokenize(""), Err(EvalError::EmptyExpression));
        assert_eq!(tokenize("  \t\n "), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn leading_minus_is_a_sign() {
        assert_eq!(tokenize("-3").unwrap(), vec![Token::Number(-3.0)]);
    }

    #[test]
    fn minus_after_operator_or_paren_is_a_sign() {
        assert_eq!(
            tokenize("2 + -2").unwrap(),
            vec![Token::Number(2.0), op('+'), Token::Number(-2.0)]
        );
        assert_eq!(
            tokenize("5*(-2)").unwrap(),
            vec![
                Token::Number(5.0),
                op('*'),
                Token::LeftParen,
                Token::Number(-2.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn minus_after_operand_is_subtraction() {
        assert_eq!(
            tokenize("6-2").unwrap(),
            vec![Token::Number(6.0), op('-'), Token::Number(2.0)]
        );
        assert_eq!(
            tokenize("(1)-2").unwrap(),
            vec![
                Token::LeftParen,
                Token::Number(1.0),
                Token::RightParen,
                op('-'),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn sign_without_digits_is_stray() {
        assert_eq!(tokenize("-"), Err(EvalError::StrayNegativeSign));
        assert_eq!(tokenize("3 * -"), Err(EvalError::StrayNegativeSign));
        assert_eq!(tokenize("-(2)"), Err(EvalError::StrayNegativeSign));
        assert_eq!(tokenize("-sqrt(4)"), Err(EvalError::StrayNegativeSign));
    }

    #[test]
    fn recognises_sqrt_only() {
        assert_eq!(
            tokenize("sqrt(16)").unwrap(),
            vec![
                Token::Function(Function::Sqrt),
                Token::LeftParen,
                Token::Number(16.0),
                Token::RightParen,
            ]
        );
        assert_eq!(
            tokenize("cos(0)"),
            Err(EvalError::UnknownFunction("cos".to_string()))
        );
        assert_eq!(
            tokenize("SQRT(4)"),
            Err(EvalError::UnknownFunction("SQRT".to_string()))
        );
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(EvalError::MalformedNumber("1.2.3".to_string()))
        );
        assert_eq!(tokenize("."), Err(EvalError::MalformedNumber(".".to_string())));
        assert_eq!(
            tokenize("2*-."),
            Err(EvalError::MalformedNumber("-.".to_string()))
        );
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(tokenize("2 & 3"), Err(EvalError::InvalidCharacter('&')));
        assert_eq!(tokenize("10 % 3"), Err(EvalError::InvalidCharacter('%')));
        assert_eq!(tokenize("π"), Err(EvalError::InvalidCharacter('π')));
    }
}

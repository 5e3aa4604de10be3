use super::token::Token;
use super::tokenizer::tokenize;

pub fn format_number(x: f64) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Re-spaces an expression from its tokens: binary operators get a space on
/// each side, parentheses and function names hug their contents.
///
/// Input that does not tokenize is only whitespace-collapsed.
pub fn format_with_spaces(expr: &str) -> String {
    let tokens = match tokenize(expr) {
        Ok(tokens) => tokens,
        Err(_) => return expr.split_whitespace().collect::<Vec<_>>().join(" "),
    };

    let mut result = String::new();
    for token in tokens {
        match token {
            Token::Operator(op) => {
                result.push(' ');
                result.push(op.sym);
                result.push(' ');
            }
            other => result.push_str(&other.to_string()),
        }
    }
    result
}

pub fn render_postfix(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

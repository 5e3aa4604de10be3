/// What a line typed into an interactive front-end asks for.
#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Quit,
    Clear,
    Help,
    History,
    Delete(u64),
    Evaluate { expression: &'a str, detailed: bool },
    Invalid(String),
}

/// Interprets a trimmed, non-empty input line. Anything that is not a
/// known command word is an expression.
pub fn parse_command(input: &str) -> Command<'_> {
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => return Command::Quit,
        "clear" | "reset" => return Command::Clear,
        "help" => return Command::Help,
        "history" => return Command::History,
        _ => {}
    }

    if let Some(delete) = parse_delete(input) {
        return delete;
    }

    let (detailed, expression) = split_details(input);
    if expression.is_empty() {
        return Command::Invalid("Please enter a valid expression after 'details'".to_string());
    }
    Command::Evaluate { expression, detailed }
}

/// Splits off a `details` marker given before or after the expression.
fn split_details(input: &str) -> (bool, &str) {
    let lower = input.to_lowercase();
    if lower.starts_with("details ") || lower == "details" {
        (true, input["details".len()..].trim())
    } else if lower.ends_with(" details") {
        (true, input[..input.len() - " details".len()].trim())
    } else {
        (false, input)
    }
}

fn parse_delete(input: &str) -> Option<Command<'_>> {
    let mut words = input.split_whitespace();
    match words.next()?.to_lowercase().as_str() {
        "delete" | "del" => {}
        _ => return None,
    }
    let id = words.next().map(|w| w.trim_start_matches('#'));
    Some(match (id, words.next()) {
        (Some(id), None) => match id.parse::<u64>() {
            Ok(id) => Command::Delete(id),
            Err(_) => Command::Invalid(format!("Not a calculation id: '{}'", id)),
        },
        _ => Command::Invalid("Usage: delete <id>".to_string()),
    })
}

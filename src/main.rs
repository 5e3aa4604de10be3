#[cfg(any(feature = "tui", feature = "line"))]
mod commands;
#[cfg(all(feature = "line", not(feature = "tui")))]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use anyhow::{Context, Result};
use env_logger::Env;
use shuntcalc::calc_engine::{format_number, format_with_spaces, EvaluationTrace};
use shuntcalc::calculate_traced;

struct OneShot {
    expression: String,
    detailed: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Option<OneShot> {
    let mut detailed = false;
    let mut words = Vec::new();
    for arg in args {
        if arg == "--details" {
            detailed = true;
        } else {
            words.push(arg);
        }
    }
    if words.is_empty() {
        return None;
    }
    Some(OneShot {
        expression: words.join(" "),
        detailed,
    })
}

fn run_once(job: &OneShot) -> Result<()> {
    let mut trace = EvaluationTrace::new(job.detailed);
    let result = calculate_traced(&job.expression, &mut trace)
        .with_context(|| format!("could not evaluate '{}'", job.expression))?;

    println!("{} = {}", format_with_spaces(&job.expression), format_number(result));
    if let Some(postfix) = &trace.postfix {
        println!("  RPN: {}", postfix);
    }
    for (i, step) in trace.steps.iter().enumerate() {
        println!("  Step {}: {} = {}", i + 1, step.operation, format_number(step.result));
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive() -> Result<()> {
    tui_mode::run_tui()
}

#[cfg(all(feature = "line", not(feature = "tui")))]
fn run_interactive() -> Result<()> {
    line_mode::run_line()
}

#[cfg(not(any(feature = "tui", feature = "line")))]
fn run_interactive() -> Result<()> {
    anyhow::bail!("built without an interactive mode; pass an expression as arguments")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match parse_args(std::env::args().skip(1)) {
        Some(job) => run_once(&job),
        None => run_interactive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arguments_are_joined_into_one_expression() {
        let job = parse_args(args(&["2", "*", "(3", "+", "4)"])).unwrap();
        assert_eq!(job.expression, "2 * (3 + 4)");
        assert!(!job.detailed);
    }

    #[test]
    fn details_flag_anywhere() {
        let job = parse_args(args(&["sqrt(16)", "--details"])).unwrap();
        assert_eq!(job.expression, "sqrt(16)");
        assert!(job.detailed);
    }

    #[test]
    fn no_expression_means_interactive() {
        assert!(parse_args(args(&[])).is_none());
        assert!(parse_args(args(&["--details"])).is_none());
    }

    #[test]
    fn one_shot_reports_evaluation_errors() {
        let job = OneShot { expression: "5 / 0".to_string(), detailed: false };
        let err = run_once(&job).unwrap_err();
        assert_eq!(err.to_string(), "could not evaluate '5 / 0'");
        assert_eq!(err.root_cause().to_string(), "Division by zero is not allowed");
    }
}

//! Session log of evaluated expressions.

use std::time::{Duration, Instant};

use crate::calc_engine::{calculate_traced, EvalError, EvaluationTrace, Step};

#[derive(Debug, Clone)]
pub struct Calculation {
    pub id: u64,
    pub expression: String,
    pub result: Result<f64, EvalError>,
    pub detailed_steps: Vec<Step>,
    pub postfix: Option<String>,
    pub detailed_mode: bool,
    pub duration: Duration,
}

/// Calculations in the order they were made. Ids start at 1, grow by one per
/// record and are never handed out twice, even after `remove` or `clear`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Calculation>,
    last_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `expression` and stores the outcome, failures included.
    pub fn record(&mut self, expression: &str, detailed_mode: bool) -> &Calculation {
        let start_time = Instant::now();
        let mut trace = EvaluationTrace::new(detailed_mode);
        let result = calculate_traced(expression, &mut trace);
        let duration = start_time.elapsed();

        self.last_id += 1;
        match &result {
            Ok(value) => log::debug!("#{} {} = {}", self.last_id, expression, value),
            Err(e) => log::debug!("#{} {} failed: {}", self.last_id, expression, e),
        }

        let index = self.entries.len();
        self.entries.push(Calculation {
            id: self.last_id,
            expression: expression.to_string(),
            result,
            detailed_steps: trace.steps,
            postfix: trace.postfix,
            detailed_mode,
            duration,
        });
        &self.entries[index]
    }

    pub fn entries(&self) -> &[Calculation] {
        &self.entries
    }

    /// Newest first.
    pub fn latest(&self) -> impl Iterator<Item = &Calculation> {
        self.entries.iter().rev()
    }

    pub fn get(&self, id: u64) -> Option<&Calculation> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Calculation> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        log::debug!("removing calculation #{}", id);
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} calculations", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
